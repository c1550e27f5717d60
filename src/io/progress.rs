//! Terminal progress bar over placement tiers

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::pipeline::events::{EventSink, GenerationEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static TIER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Tiers: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows tier progress and the running word count while a portrait generates
pub struct ProgressReporter {
    bar: ProgressBar,
    placed: usize,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    /// Create a reporter with an empty bar
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// Create a reporter that never draws, for tests and non-interactive use
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(TIER_STYLE.clone());
        Self { bar, placed: 0 }
    }

    /// Words placed so far in the current run
    pub const fn placed(&self) -> usize {
        self.placed
    }

    /// Tiers completed so far in the current run
    pub fn tiers_done(&self) -> u64 {
        self.bar.position()
    }
}

impl EventSink for ProgressReporter {
    fn notify(&mut self, event: &GenerationEvent) {
        match event {
            GenerationEvent::Started { tiers, .. } => {
                self.placed = 0;
                self.bar.reset();
                self.bar.set_length(*tiers as u64);
                self.bar.set_message("0 words");
            }
            GenerationEvent::TierCompleted(report) => {
                self.placed += report.placed;
                self.bar.inc(1);
                self.bar.set_message(format!("{} words", self.placed));
            }
            GenerationEvent::Completed { elapsed, placed } => {
                self.bar.finish_with_message(format!(
                    "{placed} words in {:.2}s",
                    elapsed.as_secs_f64()
                ));
            }
            GenerationEvent::Failed { message } => {
                self.bar.abandon_with_message(format!("failed: {message}"));
            }
        }
    }
}
