//! Recording Data Structures
//!
//! Defines the serialization format for captured trace recordings: the
//! pointer samples of every stroke, tagged with what the drawer intended
//! the stroke to be.

use crate::capture::types::PointerInputEvent;
use crate::seal::geometry::NodeId;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current recording format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// What the drawer intended a stroke to be scored as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrokeIntent {
    /// Trace of the seal edge between two nodes
    Edge { from: NodeId, to: NodeId },
    /// Part of a glyph; strokes sharing a group are recognized together
    Glyph { group: u32 },
    /// The enclosing ring
    Ring,
}

/// One recorded stroke: intent plus its raw pointer samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedStroke {
    pub intent: StrokeIntent,
    pub events: Vec<PointerInputEvent>,
}

/// Recording metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// Unique recording ID
    pub id: Uuid,
    /// Recording name
    pub name: String,
    /// Seal template the session was traced against
    pub seal_id: String,
    /// Recording start time
    pub started_at: DateTime<Utc>,
    /// Recording end time
    pub ended_at: Option<DateTime<Utc>>,
    /// Total stroke count
    pub stroke_count: usize,
    /// Version of the recording format
    pub format_version: String,
}

impl RecordingMetadata {
    /// Create new metadata for a recording
    pub fn new(name: String, seal_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            seal_id,
            started_at: Utc::now(),
            ended_at: None,
            stroke_count: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }

    /// Finalize the recording with end time and stroke count
    pub fn finalize(&mut self, stroke_count: usize) {
        self.ended_at = Some(Utc::now());
        self.stroke_count = stroke_count;
    }
}

/// A complete recording of one tracing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecording {
    /// Recording metadata
    pub metadata: RecordingMetadata,
    /// Recorded strokes in drawing order
    pub strokes: Vec<RecordedStroke>,
}

impl TraceRecording {
    /// Create a new empty recording
    pub fn new(name: String, seal_id: String) -> Self {
        Self {
            metadata: RecordingMetadata::new(name, seal_id),
            strokes: Vec::new(),
        }
    }

    /// Add a stroke to the recording
    pub fn add_stroke(&mut self, intent: StrokeIntent, events: Vec<PointerInputEvent>) {
        self.strokes.push(RecordedStroke { intent, events });
    }

    /// Finalize the recording
    pub fn finalize(&mut self) {
        self.metadata.finalize(self.strokes.len());
    }

    /// Check that every stroke carries at least one sample.
    ///
    /// The evaluator treats an empty stroke as a caller bug, so recordings
    /// are validated at the boundary instead.
    pub fn validate(&self) -> Result<()> {
        for (index, stroke) in self.strokes.iter().enumerate() {
            if stroke.events.is_empty() {
                return Err(Error::Recording(format!(
                    "stroke {index} of recording '{}' has no samples",
                    self.metadata.name
                )));
            }
        }
        Ok(())
    }

    /// Save the recording to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a recording from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let recording: Self = serde_json::from_str(&content)?;
        recording.validate()?;
        Ok(recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, t: f64) -> PointerInputEvent {
        PointerInputEvent::new(x, 0.0, 0.5, t, 0)
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recording.json");

        let mut recording = TraceRecording::new("session-1".to_string(), "triad".to_string());
        recording.add_stroke(
            StrokeIntent::Edge {
                from: NodeId::new("apex"),
                to: NodeId::new("east"),
            },
            vec![sample(0.0, 0.0), sample(10.0, 20.0)],
        );
        recording.add_stroke(StrokeIntent::Ring, vec![sample(5.0, 40.0), sample(6.0, 50.0)]);
        recording.finalize();

        recording.save(&path).expect("saves");
        let loaded = TraceRecording::load(&path).expect("loads");

        assert_eq!(loaded, recording);
        assert_eq!(loaded.metadata.stroke_count, 2);
        assert!(loaded.metadata.ended_at.is_some());
    }

    #[test]
    fn test_validate_rejects_empty_stroke() {
        let mut recording = TraceRecording::new("bad".to_string(), "triad".to_string());
        recording.add_stroke(StrokeIntent::Glyph { group: 0 }, Vec::new());
        assert!(recording.validate().is_err());
    }
}
