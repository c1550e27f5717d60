//! Entry point tying preprocessing and placement together

use crate::imaging::layout::process_image;
use crate::io::configuration::PlacementConfig;
use crate::io::error::{PortraitError, Result};
use crate::pipeline::events::{EventSink, GenerationEvent};
use crate::placement::engine::{PlacementOutcome, WordPlacer};
use crate::placement::text::TextRenderer;
use image::DynamicImage;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Runs generations one at a time
///
/// Holds only the in-progress flag, so it can be shared (for example with a
/// worker thread) while concurrent calls are rejected.
#[derive(Debug, Default)]
pub struct PortraitGenerator {
    in_progress: AtomicBool,
}

// Clears the in-progress flag on every exit path
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PortraitError::GenerationInProgress)?;
        Ok(Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl PortraitGenerator {
    /// Create an idle generator
    pub const fn new() -> Self {
        Self {
            in_progress: AtomicBool::new(false),
        }
    }

    /// Whether a run is currently active
    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Turn `source` into a word portrait
    ///
    /// The configuration is normalised first. `sink` receives `Started`, one
    /// `TierCompleted` per tier, then `Completed` or `Failed`. Precondition
    /// failures are returned before any event is emitted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No source image is supplied
    /// - Another run on this generator is still active
    /// - The source cannot be laid out on the canvas
    pub fn generate<R: Rng>(
        &self,
        source: Option<&DynamicImage>,
        config: &PlacementConfig,
        renderer: &dyn TextRenderer,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<PlacementOutcome> {
        let source = source.ok_or(PortraitError::MissingSource)?;
        let _guard = RunGuard::acquire(&self.in_progress)?;

        let config = config.normalized();
        let started = Instant::now();
        sink.notify(&GenerationEvent::Started {
            width: config.width,
            height: config.height,
            tiers: config.tiers.len(),
        });

        match Self::run(source, &config, renderer, rng, sink) {
            Ok(outcome) => {
                sink.notify(&GenerationEvent::Completed {
                    elapsed: started.elapsed(),
                    placed: outcome.placed_count(),
                });
                Ok(outcome)
            }
            Err(error) => {
                sink.notify(&GenerationEvent::Failed {
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }

    fn run<R: Rng>(
        source: &DynamicImage,
        config: &PlacementConfig,
        renderer: &dyn TextRenderer,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<PlacementOutcome> {
        let mask = process_image(
            config.width,
            config.height,
            source,
            &config.transform,
            &config.processing,
        )?;

        let placer = WordPlacer::new(config, renderer);
        Ok(placer.run(&mask, rng, |report| {
            sink.notify(&GenerationEvent::TierCompleted(report.clone()));
        }))
    }
}
