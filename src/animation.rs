//! Append-only animation events emitted as the cytoplasm mutates (§4.3's "graphable" side
//! channel), so an external tool can replay a run node-by-node without re-simulating it.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnimationEvent {
    AddNode { id: usize, label: String },
    LabelNode { id: usize, label: String },
    RemoveNode { id: usize },
    AddEdge { from: usize, to: usize },
    RemoveEdge { from: usize, to: usize },
    /// marks a step boundary, so a replay can batch all events between two of these into one frame
    NextStep,
}

/// where animation events go. `run()` takes this by `&mut dyn AnimationSink` so the driver
/// doesn't need to be generic over the sink implementation.
pub trait AnimationSink {
    fn record(&mut self, event: AnimationEvent);
}

/// discards everything; used in tests and whenever `--animate` isn't passed
pub struct NullSink;

impl AnimationSink for NullSink {
    fn record(&mut self, _event: AnimationEvent) {}
}

/// one JSON object per line, flushed after every event so a killed process still leaves a
/// replayable prefix
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl AnimationSink for JsonlSink {
    fn record(&mut self, event: AnimationEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => {
                if let Err(e) = writeln!(self.writer, "{line}") {
                    log::warn!("animation sink write failed: {e}");
                }
                let _ = self.writer.flush();
            }
            Err(e) => log::warn!("animation event serialization failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_serializes_with_tag() {
        let event = AnimationEvent::AddNode { id: 3, label: "7".into() };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"add_node\""));
        assert!(json.contains("\"id\":3"));
    }

    #[test]
    fn null_sink_accepts_everything() {
        let mut sink = NullSink;
        sink.record(AnimationEvent::NextStep);
    }
}
