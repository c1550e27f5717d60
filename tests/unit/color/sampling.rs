//! Tests for random colour and palette sampling

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wordportrait::color::Rgb;
    use wordportrait::color::sampling::{decode_palette, pick_palette_color, random_color};
    use wordportrait::io::configuration::RANDOM_CHANNEL_LIMIT;

    // Tests random colours stay below the channel limit
    // Verified by using the full 0..=255 range
    #[test]
    fn test_random_color_channels_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let color = random_color(&mut rng);
            assert!(color.channels().iter().all(|&c| c < RANDOM_CHANNEL_LIMIT));
        }
    }

    // Tests palette picks always come from the palette
    // Verified by returning a random colour instead
    #[test]
    fn test_pick_palette_color_members() {
        let palette = vec![Rgb::new(1, 2, 3), Rgb::new(200, 100, 50)];
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 2];
        for _ in 0..200 {
            let color = pick_palette_color(&palette, &mut rng);
            let position = palette.iter().position(|&p| p == color);
            assert!(position.is_some());
            if let Some(slot) = position.and_then(|i| seen.get_mut(i)) {
                *slot = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "both entries should be drawn");
    }

    // Tests an empty palette falls back to black
    // Verified by panicking on empty input
    #[test]
    fn test_empty_palette_is_black() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_palette_color(&[], &mut rng), Rgb::BLACK);
    }

    // Tests palette decoding drops bad entries
    // Verified by mapping bad entries to black
    #[test]
    fn test_decode_palette_skips_invalid() {
        let decoded = decode_palette(&["#ff0000", "bogus", "#00f"]);
        assert_eq!(decoded, vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]);
    }
}
