//! Recording format and end-to-end scoring

pub mod recording;
pub mod scorer;

pub use recording::{RecordedStroke, RecordingMetadata, StrokeIntent, TraceRecording};
pub use scorer::{ScoreReport, SessionScorer};
