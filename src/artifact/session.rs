//! Artifact-in-progress accumulation
//!
//! One mutable accumulator per artifact: edge attempts live in the seal
//! tracer, placed glyphs are keyed by identifier (re-placing replaces, not
//! appends) and at most one ring result is held. The session is created
//! when the user begins work on a template, mutated by each successful
//! match attempt and read, never mutated, by the composer.

use crate::capture::types::StrokeResult;
use crate::glyph::recognizer::GlyphResult;
use crate::glyph::templates::GlyphId;
use crate::ring::matcher::RingResult;
use crate::seal::geometry::{NodeId, SealGeometry};
use crate::seal::tracer::{ConnectionResult, SealTracer, TracerSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A glyph staged into the artifact with its recognition confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedGlyph {
    pub id: GlyphId,
    pub confidence: f64,
}

/// Read-only view of an in-progress session, serializable for external
/// storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub seal: TracerSnapshot,
    pub glyphs: Vec<StagedGlyph>,
    pub ring: Option<RingResult>,
}

/// Mutable accumulator for one artifact-in-progress.
///
/// Owned exclusively by one drawing session; all mutation happens through
/// the methods below.
#[derive(Debug, Clone)]
pub struct TraceSession {
    tracer: SealTracer,
    glyphs: BTreeMap<GlyphId, StagedGlyph>,
    ring: Option<RingResult>,
}

impl TraceSession {
    /// Begin a session on a seal template
    pub fn new(geometry: SealGeometry) -> Self {
        Self {
            tracer: SealTracer::new(geometry),
            glyphs: BTreeMap::new(),
            ring: None,
        }
    }

    /// Resume a session from a previously serialized tracer snapshot
    pub fn restore(geometry: SealGeometry, snapshot: TracerSnapshot) -> crate::Result<Self> {
        Ok(Self {
            tracer: SealTracer::restore(geometry, snapshot)?,
            glyphs: BTreeMap::new(),
            ring: None,
        })
    }

    /// Score a stroke against the edge between two seal nodes
    pub fn attempt_connection(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        stroke: &StrokeResult,
    ) -> ConnectionResult {
        self.tracer.attempt_connection(from, to, stroke)
    }

    /// Stage a recognized glyph into the artifact.
    ///
    /// Re-placing a glyph identifier replaces the previous placement.
    /// Unrecognized results stage nothing and return false.
    pub fn place_glyph(&mut self, result: &GlyphResult) -> bool {
        let Some(id) = &result.recognized else {
            return false;
        };

        debug!(glyph = %id, confidence = result.confidence, "glyph staged");
        self.glyphs.insert(
            id.clone(),
            StagedGlyph {
                id: id.clone(),
                confidence: result.confidence,
            },
        );
        true
    }

    /// Stage the ring result, replacing any previous one
    pub fn stage_ring(&mut self, ring: RingResult) {
        self.ring = Some(ring);
    }

    pub fn tracer(&self) -> &SealTracer {
        &self.tracer
    }

    pub fn ring(&self) -> Option<&RingResult> {
        self.ring.as_ref()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &StagedGlyph> {
        self.glyphs.values()
    }

    /// Identifiers of the currently placed glyphs
    pub fn placed_glyph_ids(&self) -> Vec<GlyphId> {
        self.glyphs.keys().cloned().collect()
    }

    /// Read-only snapshot of the in-progress state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seal: self.tracer.snapshot(),
            glyphs: self.glyphs.values().cloned().collect(),
            ring: self.ring.clone(),
        }
    }
}
