//! Artifact composition
//!
//! Pure aggregation of edge integrity, glyph-set coherence and ring
//! strength into one composite score with a discrete quality tier.

use crate::artifact::session::{StagedGlyph, TraceSession};
use crate::glyph::coherence::{CoherenceChecker, CoherenceReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Weight of the seal's edge integrity in the composite
pub const EDGE_WEIGHT: f64 = 0.40;

/// Weight of glyph-set coherence in the composite
pub const COHERENCE_WEIGHT: f64 = 0.35;

/// Weight of ring strength in the composite
pub const RING_WEIGHT: f64 = 0.25;

/// Discrete quality tier of a composed artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// No ring has been traced; the artifact is inert
    Dormant,
    Corrupted,
    Unstable,
    Healthy,
    Charged,
}

impl Tier {
    /// Map a composite score to its tier; no traced ring always means
    /// dormant
    pub fn from_score(overall: f64, has_ring: bool) -> Self {
        if !has_ring {
            return Tier::Dormant;
        }
        if overall >= 0.85 {
            Tier::Charged
        } else if overall >= 0.60 {
            Tier::Healthy
        } else if overall >= 0.30 {
            Tier::Unstable
        } else {
            Tier::Corrupted
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Dormant => "dormant",
            Tier::Corrupted => "corrupted",
            Tier::Unstable => "unstable",
            Tier::Healthy => "healthy",
            Tier::Charged => "charged",
        };
        f.write_str(name)
    }
}

/// The composed fidelity artifact. Pure value object, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealArtifact {
    pub id: Uuid,
    /// Seal template the artifact was traced against
    pub seal_id: String,
    pub composed_at: DateTime<Utc>,
    /// Weighted mean accuracy of the attempted edges
    pub edge_integrity: f64,
    /// Whether every template edge was attempted and valid
    pub edges_complete: bool,
    pub coherence: CoherenceReport,
    /// Ring overall strength; 0 when no ring has been traced
    pub ring_strength: f64,
    pub glyphs: Vec<StagedGlyph>,
    /// Weighted composite score
    pub overall: f64,
    pub tier: Tier,
}

/// Composes a session's accumulated results into the final artifact
#[derive(Debug, Clone, Default)]
pub struct Composer {
    checker: CoherenceChecker,
}

impl Composer {
    pub fn new(checker: CoherenceChecker) -> Self {
        Self { checker }
    }

    /// Compose the final artifact from a session.
    ///
    /// The session is only read; composing twice yields the same scores.
    pub fn compose(&self, session: &TraceSession) -> SealArtifact {
        let edge_integrity = session.tracer().integrity();
        let coherence = self.checker.evaluate(&session.placed_glyph_ids());
        let ring_strength = session.ring().map(|r| r.overall_strength).unwrap_or(0.0);

        let overall = edge_integrity * EDGE_WEIGHT
            + coherence.score * COHERENCE_WEIGHT
            + ring_strength * RING_WEIGHT;
        let tier = Tier::from_score(overall, session.ring().is_some());

        info!(
            seal = %session.tracer().geometry().id,
            edge_integrity, ring_strength, overall, %tier,
            "artifact composed"
        );

        SealArtifact {
            id: Uuid::new_v4(),
            seal_id: session.tracer().geometry().id.clone(),
            composed_at: Utc::now(),
            edge_integrity,
            edges_complete: session.tracer().is_complete(),
            coherence,
            ring_strength,
            glyphs: session.glyphs().cloned().collect(),
            overall,
            tier,
        }
    }
}
