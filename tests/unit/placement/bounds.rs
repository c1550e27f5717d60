//! Tests for word footprint geometry

#[cfg(test)]
mod tests {
    use wordportrait::placement::WordBox;

    // Tests a box is centred on its sample point
    // Verified by anchoring at the top-left instead
    #[test]
    fn test_centered_box() {
        let word_box = WordBox::centered(50.0, 20.0, 30.0, 8.0);
        assert!((word_box.left - 35.0).abs() < f32::EPSILON);
        assert!((word_box.top - 16.0).abs() < f32::EPSILON);
        assert!((word_box.right() - 65.0).abs() < f32::EPSILON);
        assert!((word_box.bottom() - 24.0).abs() < f32::EPSILON);
        assert_eq!(word_box.center(), (50.0, 20.0));
    }

    // Tests probe points are the corners then the centre
    // Verified by omitting the centre probe
    #[test]
    fn test_probe_points() {
        let word_box = WordBox::centered(10.0, 10.0, 4.0, 2.0);
        assert_eq!(
            word_box.probe_points(),
            [(8, 9), (12, 9), (8, 11), (12, 11), (10, 10)]
        );
    }

    // Tests canvas containment at the edges
    // Verified by using a strict comparison on the far edge
    #[test]
    fn test_fits_within() {
        assert!(WordBox::centered(5.0, 5.0, 10.0, 10.0).fits_within(10, 10));
        assert!(!WordBox::centered(4.0, 5.0, 10.0, 10.0).fits_within(10, 10));
        assert!(!WordBox::centered(5.0, 6.0, 10.0, 10.0).fits_within(10, 10));
    }

    // Tests overlap requires positive shared area
    // Verified by treating touching edges as overlapping
    #[test]
    fn test_overlaps() {
        let a = WordBox::centered(10.0, 10.0, 10.0, 10.0);
        let b = WordBox::centered(18.0, 12.0, 10.0, 10.0);
        let touching = WordBox::centered(20.0, 10.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&touching));
    }

    // Tests box geometry is usable in constant expressions
    // Verified by dropping const from the geometry helpers
    #[test]
    fn test_geometry_in_const_context() {
        const BOX: WordBox = WordBox::centered(10.0, 10.0, 8.0, 4.0);
        const OTHER: WordBox = WordBox::centered(17.0, 10.0, 8.0, 4.0);
        const RIGHT: f32 = BOX.right();
        const INSIDE: bool = BOX.fits_within(20, 20);
        const TOUCHING: bool = BOX.overlaps(&OTHER);

        assert!((RIGHT - 14.0).abs() < f32::EPSILON);
        assert!(INSIDE);
        assert!(TOUCHING);
    }
}
