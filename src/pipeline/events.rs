//! Fire-and-forget lifecycle notifications emitted by a generation run

use crate::placement::engine::TierReport;
use std::time::Duration;
use tracing::{debug, error, info};

/// Something that happened during a run
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// Preconditions passed and preprocessing is about to start
    Started {
        /// Canvas width after normalisation
        width: u32,
        /// Canvas height after normalisation
        height: u32,
        /// Number of tiers that will run
        tiers: usize,
    },
    /// A size tier spent its attempt budget
    TierCompleted(TierReport),
    /// The run finished
    Completed {
        /// Wall-clock duration of the run
        elapsed: Duration,
        /// Words committed across all tiers
        placed: usize,
    },
    /// The run failed after it started
    Failed {
        /// Human-readable failure description
        message: String,
    },
}

/// Receiver of lifecycle events
///
/// Implemented for any `FnMut(&GenerationEvent)` closure.
pub trait EventSink {
    /// Observe one event
    fn notify(&mut self, event: &GenerationEvent);
}

impl<F: FnMut(&GenerationEvent)> EventSink for F {
    fn notify(&mut self, event: &GenerationEvent) {
        self(event);
    }
}

/// Sink that writes every event to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn notify(&mut self, event: &GenerationEvent) {
        match event {
            GenerationEvent::Started {
                width,
                height,
                tiers,
            } => info!(width, height, tiers, "generation started"),
            GenerationEvent::TierCompleted(report) => debug!(
                tier = report.index,
                scale = report.scale,
                placed = report.placed,
                "tier finished"
            ),
            GenerationEvent::Completed { elapsed, placed } => info!(
                elapsed_ms = elapsed.as_millis(),
                placed,
                "generation complete"
            ),
            GenerationEvent::Failed { message } => error!(%message, "generation failed"),
        }
    }
}
