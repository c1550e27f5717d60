//! Tests for lifecycle events and sinks

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use wordportrait::pipeline::{EventSink, GenerationEvent, TracingSink};
    use wordportrait::placement::TierReport;

    fn tier_event() -> GenerationEvent {
        GenerationEvent::TierCompleted(TierReport {
            index: 0,
            scale: 3.0,
            font_size: 36.0,
            attempts: 10,
            placed: 2,
            giant: true,
        })
    }

    // Tests closures receive every event in order
    // Verified by dropping events in the closure adapter
    #[test]
    fn test_closure_sink_collects() {
        let mut seen = Vec::new();
        {
            let mut sink = |event: &GenerationEvent| seen.push(event.clone());
            let sink: &mut dyn EventSink = &mut sink;
            sink.notify(&GenerationEvent::Started {
                width: 100,
                height: 100,
                tiers: 1,
            });
            sink.notify(&tier_event());
            sink.notify(&GenerationEvent::Completed {
                elapsed: Duration::from_millis(5),
                placed: 2,
            });
        }

        assert_eq!(seen.len(), 3);
        assert!(matches!(seen.first(), Some(GenerationEvent::Started { tiers: 1, .. })));
        assert_eq!(seen.get(1), Some(&tier_event()));
        assert!(matches!(seen.last(), Some(GenerationEvent::Completed { placed: 2, .. })));
    }

    // Tests the tracing sink accepts every event kind without a subscriber
    // Verified by panicking on unhandled events
    #[test]
    fn test_tracing_sink_handles_all_events() {
        let mut sink = TracingSink;
        sink.notify(&GenerationEvent::Started {
            width: 10,
            height: 10,
            tiers: 0,
        });
        sink.notify(&tier_event());
        sink.notify(&GenerationEvent::Completed {
            elapsed: Duration::ZERO,
            placed: 0,
        });
        sink.notify(&GenerationEvent::Failed {
            message: "boom".to_string(),
        });
    }
}
