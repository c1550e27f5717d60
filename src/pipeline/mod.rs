//! Orchestration of a generation run
//!
//! The orchestrator owns no algorithm: it checks preconditions, runs the image
//! processor then the placement engine, and reports lifecycle events.

/// Lifecycle notifications and their sinks
pub mod events;
/// The generation entry point and its re-entry guard
pub mod generator;

pub use events::{EventSink, GenerationEvent, TracingSink};
pub use generator::PortraitGenerator;
