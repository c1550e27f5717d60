//! Tests for argument parsing and command execution

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::path::PathBuf;
    use wordportrait::PortraitError;
    use wordportrait::io::cli::{Cli, PortraitCommand};
    use wordportrait::io::configuration::{ColorMode, PlacementConfig};
    use wordportrait::io::presets::PresetBook;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wordportrait").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    // Tests command-line values override the defaults
    // Verified by ignoring the density flag
    #[test]
    fn test_overrides_applied() {
        let cli = parse(&[
            "cat.png",
            "-W",
            "cat,meow",
            "--hero",
            "CAT",
            "-w",
            "400",
            "-H",
            "300",
            "-d",
            "90",
            "-c",
            "single",
            "--color",
            "#abc",
            "--offset-x",
            "-20",
            "-e",
            "3",
            "-n",
        ]);
        let config = cli.build_config().expect("config should build");

        assert_eq!(config.words, vec!["cat".to_string(), "meow".to_string()]);
        assert_eq!(config.hero_words, vec!["CAT".to_string()]);
        assert_eq!((config.width, config.height), (400, 300));
        assert_eq!(config.density, 90);
        assert_eq!(config.color_mode, ColorMode::Single);
        assert_eq!(config.single_color, "#abc");
        assert!((config.transform.offset_x + 20.0).abs() < f32::EPSILON);
        assert!((config.processing.edge_strength - 3.0).abs() < f32::EPSILON);
        assert!(config.processing.negative);
    }

    // Tests unspecified options keep their defaults
    // Verified by clearing the words when no flag is given
    #[test]
    fn test_defaults_kept() {
        let config = parse(&["cat.png"]).build_config().expect("config should build");
        assert_eq!(config, PlacementConfig::default());
    }

    // Tests malformed colours are rejected with the flag name
    // Verified by accepting any string as a colour
    #[test]
    fn test_bad_colours_rejected() {
        let result = parse(&["cat.png", "--color", "blue"]).build_config();
        assert!(matches!(
            result,
            Err(PortraitError::InvalidParameter {
                parameter: "color",
                ..
            })
        ));

        let result = parse(&["cat.png", "--palette", "#fff,#12"]).build_config();
        assert!(matches!(
            result,
            Err(PortraitError::InvalidParameter {
                parameter: "palette",
                ..
            })
        ));
    }

    // Tests conflicting and dependent flags are enforced by the parser
    // Verified by removing the requires attribute on --preset
    #[test]
    fn test_flag_relations() {
        assert!(Cli::try_parse_from(["wordportrait", "cat.png", "-q", "-v"]).is_err());
        assert!(Cli::try_parse_from(["wordportrait", "cat.png", "-p", "noir"]).is_err());
        assert!(Cli::try_parse_from(["wordportrait"]).is_err());
        assert!(Cli::try_parse_from(["wordportrait", "cat.png", "-c", "sepia"]).is_err());
    }

    // Tests output paths default next to the input
    // Verified by dropping the input directory
    #[test]
    fn test_output_path() {
        let cli = parse(&["photos/cat.jpg"]);
        assert_eq!(cli.output_path(), PathBuf::from("photos/cat_portrait.png"));

        let cli = parse(&["cat.jpg", "-o", "out/result.png"]);
        assert_eq!(cli.output_path(), PathBuf::from("out/result.png"));

        assert!(parse(&["cat.png"]).should_show_progress());
        assert!(!parse(&["cat.png", "-q"]).should_show_progress());
    }

    // Tests presets seed the configuration and flags still override them
    // Verified by applying the preset after the flags
    #[test]
    fn test_preset_then_overrides() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let presets = dir.path().join("presets.json");
        let mut book = PresetBook::new();
        book.insert(
            "bold",
            PlacementConfig {
                density: 30,
                font_size: 20.0,
                ..PlacementConfig::default()
            },
        );
        book.save(&presets).expect("save presets");

        let presets_arg = presets.to_string_lossy().to_string();
        let cli = parse(&["cat.png", "--presets", presets_arg.as_str(), "-p", "bold", "-d", "60"]);
        let config = cli.build_config().expect("config should build");
        assert_eq!(config.density, 60);
        assert!((config.font_size - 20.0).abs() < f32::EPSILON);

        let cli = parse(&["cat.png", "--presets", presets_arg.as_str(), "-p", "missing"]);
        assert!(matches!(
            cli.build_config(),
            Err(PortraitError::UnknownPreset { .. })
        ));
    }

    // Tests words files extend the word list one word per line
    // Verified by replacing flag words with file words
    #[test]
    fn test_words_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let words = dir.path().join("words.txt");
        std::fs::write(&words, "alpha\n\n  beta  \n").expect("write words");

        let words_arg = words.to_string_lossy().to_string();
        let cli = parse(&["cat.png", "-W", "zero", "--words-file", words_arg.as_str()]);
        let config = cli.build_config().expect("config should build");
        assert_eq!(
            config.words,
            vec!["zero".to_string(), "alpha".to_string(), "beta".to_string()]
        );

        let cli = parse(&["cat.png", "--words-file", "no/such/words.txt"]);
        assert!(matches!(
            cli.build_config(),
            Err(PortraitError::FileSystem { .. })
        ));
    }

    // Tests a full command writes the portrait and the requested preset
    // Verified by skipping the export step
    #[test]
    fn test_command_run() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("dark.png");
        RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]))
            .save(&input)
            .expect("write source");
        let output = dir.path().join("out/portrait.png");
        let presets = dir.path().join("presets.json");

        let input_arg = input.to_string_lossy().to_string();
        let output_arg = output.to_string_lossy().to_string();
        let presets_arg = presets.to_string_lossy().to_string();
        let cli = parse(&[
            input_arg.as_str(),
            "-o",
            output_arg.as_str(),
            "-w",
            "120",
            "-H",
            "120",
            "-s",
            "4",
            "--seed",
            "7",
            "-q",
            "--presets",
            presets_arg.as_str(),
            "--save-preset",
            "small",
        ]);

        PortraitCommand::new(cli).run().expect("command should succeed");

        let written = image::open(&output).expect("portrait written");
        assert_eq!((written.width(), written.height()), (120, 120));
        let book = PresetBook::load(&presets).expect("preset file written");
        assert_eq!(book.get("small").expect("preset saved").width, 120);
    }

    // Tests a missing input image fails without writing output
    // Verified by creating the output before loading the source
    #[test]
    fn test_command_missing_input() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = dir.path().join("never.png");
        let output_arg = output.to_string_lossy().to_string();
        let cli = parse(&["no/such/source.png", "-o", output_arg.as_str(), "-q"]);

        let result = PortraitCommand::new(cli).run();
        assert!(matches!(result, Err(PortraitError::ImageLoad { .. })));
        assert!(!output.exists());
    }
}
