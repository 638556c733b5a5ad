//! # Sigil Tracer
//!
//! A stroke-capture, geometric-matching and coherence-scoring engine for
//! free-hand traced seals.
//!
//! ## Overview
//!
//! This library turns raw pointer samples into normalized stroke
//! descriptions, compares each stroke against canonical shapes (a seal
//! edge, a symbolic glyph, a closed ring) and combines the per-shape
//! scores into one composite artifact with a discrete quality tier.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sigil_tracer::capture::stroke::StrokeEvaluator;
//! use sigil_tracer::capture::types::PointerInputEvent;
//! use sigil_tracer::seal::library as seals;
//! use sigil_tracer::seal::tracer::SealTracer;
//! use sigil_tracer::seal::geometry::NodeId;
//!
//! let geometry = seals::lookup("triad").expect("built-in template");
//! let mut tracer = SealTracer::new(geometry);
//!
//! let mut evaluator = StrokeEvaluator::new();
//! evaluator.push(PointerInputEvent::new(120.0, 80.0, 0.6, 0.0, 0));
//! evaluator.push(PointerInputEvent::new(480.0, 310.0, 0.7, 350.0, 0));
//! let stroke = evaluator.finalize();
//!
//! let result = tracer.attempt_connection(&NodeId::new("apex"), &NodeId::new("east"), &stroke);
//! println!("accuracy {}", result.accuracy);
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`capture`]: Pointer sample ingestion and stroke evaluation
//! - [`geometry`]: Stateless numeric kernel (normalization, resampling,
//!   Fréchet distance, circle fitting)
//! - [`seal`]: Template graphs and edge tracing
//! - [`glyph`]: Symbol recognition and set coherence
//! - [`ring`]: Closed-loop quality analysis
//! - [`artifact`]: Session accumulation and final composition
//! - [`workflow`]: Recording format and end-to-end scoring
//! - [`app`]: CLI and configuration management
//!
//! ## Scoring Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Pointer   │───▶│   Stroke    │───▶│    Shape    │───▶│   Trace     │
//! │   Samples   │    │  Evaluator  │    │   Matchers  │    │   Session   │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Artifact   │◀───│  Composer   │◀───│  Coherence  │◀───│   Placed    │
//! │   + Tier    │    │             │    │   Checker   │    │   Glyphs    │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```

pub mod capture;
pub mod geometry;
pub mod seal;
pub mod glyph;
pub mod ring;
pub mod artifact;
pub mod workflow;
pub mod app;

// Re-export commonly used types
pub use capture::stroke::StrokeEvaluator;
pub use capture::types::{Point, PointerInputEvent, StrokeResult};
pub use seal::tracer::{ConnectionResult, SealTracer};
pub use glyph::recognizer::{Difficulty, GlyphRecognizer, GlyphResult};
pub use ring::matcher::{RingMatcher, RingResult};
pub use artifact::composer::{Composer, SealArtifact, Tier};
pub use artifact::session::TraceSession;

/// Result type alias for the sigil tracer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the sigil tracer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("recording error: {0}")]
    Recording(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
