//! End-to-end session scoring
//!
//! Replays a recorded tracing session through the full pipeline: each
//! stroke is evaluated, routed to its matcher by intent, accumulated into
//! a session and finally composed into the artifact.

use crate::artifact::composer::{Composer, SealArtifact};
use crate::artifact::session::TraceSession;
use crate::capture::stroke::StrokeEvaluator;
use crate::capture::types::StrokeResult;
use crate::glyph::coherence::CoherenceChecker;
use crate::glyph::library as glyph_library;
use crate::glyph::recognizer::{Difficulty, GlyphRecognizer, GlyphResult};
use crate::ring::matcher::{RingMatcher, RingResult};
use crate::seal::geometry::NodeId;
use crate::seal::library as seal_library;
use crate::seal::tracer::ConnectionResult;
use crate::workflow::recording::{StrokeIntent, TraceRecording};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// One scored edge attempt, in replay order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionOutcome {
    pub from: NodeId,
    pub to: NodeId,
    pub result: ConnectionResult,
}

/// One recognition pass over a glyph stroke group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphOutcome {
    pub group: u32,
    pub result: GlyphResult,
}

/// Everything a scored recording produced, serializable for storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub artifact: SealArtifact,
    pub connections: Vec<ConnectionOutcome>,
    pub glyphs: Vec<GlyphOutcome>,
    pub ring: Option<RingResult>,
}

/// Drives recordings through the scoring pipeline
#[derive(Debug, Clone)]
pub struct SessionScorer {
    recognizer: GlyphRecognizer,
    ring_matcher: RingMatcher,
    composer: Composer,
    epsilon: f64,
}

impl SessionScorer {
    /// Scorer over the built-in template libraries
    pub fn new(difficulty: Difficulty, epsilon: f64) -> Self {
        Self {
            recognizer: GlyphRecognizer::new(glyph_library::all(), difficulty),
            ring_matcher: RingMatcher::new(),
            composer: Composer::new(CoherenceChecker::new(glyph_library::standard_rules())),
            epsilon,
        }
    }

    /// Swap recognition difficulty between scoring runs
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.recognizer.set_difficulty(difficulty);
    }

    /// Score a recording end to end.
    ///
    /// The seal template is resolved from the registry; an unknown template
    /// identifier propagates as [`crate::Error::UnknownTemplate`].
    pub fn score(&self, recording: &TraceRecording) -> Result<ScoreReport> {
        recording.validate()?;
        let geometry = seal_library::lookup(&recording.metadata.seal_id)?;
        let mut session = TraceSession::new(geometry);

        let mut evaluator = StrokeEvaluator::with_epsilon(self.epsilon);
        let mut connections = Vec::new();
        let mut ring = None;
        let mut glyph_groups: BTreeMap<u32, Vec<StrokeResult>> = BTreeMap::new();

        for stroke in &recording.strokes {
            evaluator.reset();
            for event in &stroke.events {
                evaluator.push(*event);
            }
            let evaluated = evaluator.finalize();

            match &stroke.intent {
                StrokeIntent::Edge { from, to } => {
                    let result = session.attempt_connection(from, to, &evaluated);
                    if !result.valid {
                        warn!(%from, %to, accuracy = result.accuracy, "edge trace below threshold");
                    }
                    connections.push(ConnectionOutcome {
                        from: from.clone(),
                        to: to.clone(),
                        result,
                    });
                }
                StrokeIntent::Glyph { group } => {
                    glyph_groups.entry(*group).or_default().push(evaluated);
                }
                StrokeIntent::Ring => {
                    let result = self.ring_matcher.evaluate(&evaluated);
                    session.stage_ring(result.clone());
                    ring = Some(result);
                }
            }
        }

        let mut glyphs = Vec::new();
        for (group, strokes) in &glyph_groups {
            let result = self.recognizer.recognize(strokes);
            session.place_glyph(&result);
            glyphs.push(GlyphOutcome {
                group: *group,
                result,
            });
        }

        let artifact = self.composer.compose(&session);
        info!(
            recording = %recording.metadata.name,
            overall = artifact.overall,
            tier = %artifact.tier,
            "recording scored"
        );

        Ok(ScoreReport {
            artifact,
            connections,
            glyphs,
            ring,
        })
    }
}
