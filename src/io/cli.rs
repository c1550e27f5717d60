//! Command-line interface for rendering a single word portrait

use crate::color::parse_hex;
use crate::io::configuration::{ColorMode, OUTPUT_SUFFIX, PlacementConfig};
use crate::io::error::{PortraitError, Result, invalid_parameter};
use crate::io::image::{export_canvas, load_source};
use crate::io::presets::PresetBook;
use crate::io::progress::ProgressReporter;
use crate::pipeline::events::{EventSink, TracingSink};
use crate::pipeline::generator::PortraitGenerator;
use crate::placement::text::{BlockRenderer, FontRenderer, TextRenderer};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(name = "wordportrait")]
#[command(
    author,
    version,
    about = "Render an image as a portrait made of words"
)]
/// Command-line arguments for the portrait generator
///
/// Every placement option is optional so that a loaded preset supplies the
/// value unless the flag overrides it.
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source image to convert
    #[arg(value_name = "IMAGE")]
    pub input: PathBuf,

    /// Output image (defaults to `<IMAGE>_portrait.png` next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Words to place, comma separated
    #[arg(short = 'W', long, value_delimiter = ',')]
    pub words: Vec<String>,

    /// File with one word per line, added to --words
    #[arg(long)]
    pub words_file: Option<PathBuf>,

    /// Hero words reserved for the giant tiers, comma separated
    #[arg(long = "hero", value_delimiter = ',')]
    pub hero_words: Vec<String>,

    /// Canvas width in pixels (100-10000)
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Canvas height in pixels (100-10000)
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Luminance below which pixels receive words (0-255)
    #[arg(short, long)]
    pub density: Option<u8>,

    /// Base font size before tier scaling
    #[arg(short = 's', long)]
    pub font_size: Option<f32>,

    /// How words are coloured
    #[arg(short, long, value_enum)]
    pub color_mode: Option<ColorMode>,

    /// Hex colour for the `single` colour mode
    #[arg(long)]
    pub color: Option<String>,

    /// Hex colours for the `palette` colour mode, comma separated
    #[arg(long, value_delimiter = ',')]
    pub palette: Vec<String>,

    /// Source scale in percent after fitting
    #[arg(long)]
    pub scale: Option<f32>,

    /// Horizontal source offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub offset_x: Option<f32>,

    /// Vertical source offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub offset_y: Option<f32>,

    /// Canvas margin in percent of each dimension
    #[arg(long)]
    pub margin: Option<f32>,

    /// Brightness threshold in percent; brighter pixels are discarded
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Edge emphasis strength (0-10)
    #[arg(short, long)]
    pub edges: Option<f32>,

    /// Invert dark pixels before placement
    #[arg(short, long)]
    pub negative: bool,

    /// Hex tint added by --negative
    #[arg(long)]
    pub negative_color: Option<String>,

    /// TrueType/OpenType font used to draw words (solid blocks if omitted)
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// Random seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON preset file
    #[arg(long)]
    pub presets: Option<PathBuf>,

    /// Preset to start from
    #[arg(short, long, requires = "presets")]
    pub preset: Option<String>,

    /// Store the effective configuration under this name in the preset file
    #[arg(long, requires = "presets")]
    pub save_preset: Option<String>,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log per-tier details
    #[arg(short, long)]
    pub verbose: bool,
}

fn checked_hex(parameter: &'static str, value: &str) -> Result<String> {
    parse_hex(value)
        .map(|_| value.to_string())
        .ok_or_else(|| invalid_parameter(parameter, &value, &"expected #rgb or #rrggbb"))
}

fn read_words(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| PortraitError::FileSystem {
        path: path.to_path_buf(),
        operation: "read words",
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

impl Cli {
    /// Install the `tracing` subscriber at the verbosity requested
    pub fn init_logging(&self) {
        let level = if self.quiet {
            Level::WARN
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Preset (or default) configuration with command-line overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The preset file or the named preset cannot be loaded
    /// - The words file cannot be read
    /// - A colour is not a valid hex colour
    pub fn build_config(&self) -> Result<PlacementConfig> {
        let mut config = match (&self.presets, &self.preset) {
            (Some(path), Some(name)) => PresetBook::load(path)?.get(name)?.clone(),
            _ => PlacementConfig::default(),
        };

        let mut words = self.words.clone();
        if let Some(path) = &self.words_file {
            words.extend(read_words(path)?);
        }
        if !words.is_empty() {
            config.words = words;
        }
        if !self.hero_words.is_empty() {
            config.hero_words.clone_from(&self.hero_words);
        }

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(density) = self.density {
            config.density = density;
        }
        if let Some(font_size) = self.font_size {
            config.font_size = font_size;
        }
        if let Some(mode) = self.color_mode {
            config.color_mode = mode;
        }
        if let Some(color) = &self.color {
            config.single_color = checked_hex("color", color)?;
        }
        if !self.palette.is_empty() {
            config.palette = self
                .palette
                .iter()
                .map(|entry| checked_hex("palette", entry))
                .collect::<Result<_>>()?;
        }

        if let Some(scale) = self.scale {
            config.transform.scale_percent = scale;
        }
        if let Some(offset_x) = self.offset_x {
            config.transform.offset_x = offset_x;
        }
        if let Some(offset_y) = self.offset_y {
            config.transform.offset_y = offset_y;
        }
        if let Some(margin) = self.margin {
            config.transform.margin_percent = margin;
        }

        if let Some(threshold) = self.threshold {
            config.processing.threshold_percent = threshold;
        }
        if let Some(edges) = self.edges {
            config.processing.edge_strength = edges;
        }
        if self.negative {
            config.processing.negative = true;
        }
        if let Some(color) = &self.negative_color {
            config.processing.negative_color = checked_hex("negative-color", color)?;
        }

        Ok(config)
    }

    /// Where the portrait is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.input))
    }

    fn default_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Runs one generation as described by the command line
pub struct PortraitCommand {
    cli: Cli,
    generator: PortraitGenerator,
}

impl PortraitCommand {
    /// Create a command from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            generator: PortraitGenerator::new(),
        }
    }

    /// Load inputs, generate the portrait and write it out
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, loading, generation or export fails.
    pub fn run(&mut self) -> Result<()> {
        let config = self.cli.build_config()?;

        if let (Some(path), Some(name)) = (&self.cli.presets, &self.cli.save_preset) {
            let mut book = PresetBook::load_or_default(path)?;
            book.insert(name.clone(), config.clone());
            book.save(path)?;
            info!(preset = %name, path = %path.display(), "preset saved");
        }

        let source = load_source(&self.cli.input)?;

        let renderer: Box<dyn TextRenderer> = match &self.cli.font {
            Some(path) => Box::new(FontRenderer::from_path(path)?),
            None => {
                info!("no font supplied, drawing words as solid blocks");
                Box::new(BlockRenderer)
            }
        };

        let mut rng = self
            .cli
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let mut sink: Box<dyn EventSink> = if self.cli.should_show_progress() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(TracingSink)
        };

        let outcome = self.generator.generate(
            Some(&source),
            &config,
            renderer.as_ref(),
            &mut rng,
            sink.as_mut(),
        )?;

        let output_path = self.cli.output_path();
        export_canvas(&outcome.canvas, &output_path)?;
        info!(
            path = %output_path.display(),
            placed = outcome.placed_count(),
            "portrait written"
        );

        Ok(())
    }
}
