//! Seal edge tracing
//!
//! Holds one best attempt per template edge and scores each traced stroke
//! against the edge's canonical path via the discrete Fréchet distance.

use crate::capture::types::StrokeResult;
use crate::geometry::frechet::discrete_frechet_distance;
use crate::geometry::path::{normalize_to_unit_space, resample};
use crate::seal::geometry::{NodeId, SealGeometry};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Point count both paths are resampled to before the distance runs
pub const RESAMPLE_POINTS: usize = 32;

/// Fréchet tolerance for templates of at most this many edges
pub const SIMPLE_TOLERANCE: f64 = 0.15;

/// Tighter tolerance once a template has more edges than this
pub const COMPLEX_EDGE_COUNT: usize = 6;

/// Fréchet tolerance for complex templates
pub const COMPLEX_TOLERANCE: f64 = 0.10;

/// Minimum accuracy for an attempt to count as a valid trace
pub const VALIDITY_THRESHOLD: f64 = 0.4;

/// Outcome of one edge trace attempt. Pure value object, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionResult {
    /// Trace accuracy in `[0, 1]`, rounded to 3 decimals
    pub accuracy: f64,
    /// Raw Fréchet deviation in normalized units
    pub deviation: f64,
    /// Whether the attempt clears the validity threshold
    pub valid: bool,
}

impl ConnectionResult {
    /// The neutral result returned when no edge connects the endpoints
    pub fn no_edge() -> Self {
        Self {
            accuracy: 0.0,
            deviation: 1.0,
            valid: false,
        }
    }
}

/// Unordered node-pair key: an edge traced B→A matches an edge defined A→B
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

/// One recorded attempt, as persisted in a [`TracerSnapshot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub result: ConnectionResult,
}

/// Serialized form of a tracer's attempt map, for external save/resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracerSnapshot {
    pub template_id: String,
    pub attempts: Vec<AttemptRecord>,
}

/// Stateful edge matcher for one seal template instance.
///
/// Owned exclusively by one drawing session; no locking discipline needed.
#[derive(Debug, Clone)]
pub struct SealTracer {
    geometry: SealGeometry,
    attempts: BTreeMap<EdgeKey, ConnectionResult>,
}

impl SealTracer {
    pub fn new(geometry: SealGeometry) -> Self {
        Self {
            geometry,
            attempts: BTreeMap::new(),
        }
    }

    /// Rebuild a tracer from a previously serialized attempt map.
    ///
    /// The snapshot must belong to the same template, and every recorded
    /// attempt must reference an existing edge.
    pub fn restore(geometry: SealGeometry, snapshot: TracerSnapshot) -> Result<Self> {
        if geometry.id != snapshot.template_id {
            return Err(Error::Template(format!(
                "snapshot for template '{}' cannot restore into '{}'",
                snapshot.template_id, geometry.id
            )));
        }

        let mut attempts = BTreeMap::new();
        for record in snapshot.attempts {
            if geometry.edge_between(&record.from, &record.to).is_none() {
                return Err(Error::Template(format!(
                    "snapshot references unknown edge {}->{}",
                    record.from, record.to
                )));
            }
            attempts.insert(EdgeKey::new(record.from, record.to), record.result);
        }

        Ok(Self { geometry, attempts })
    }

    /// Serialize the current attempt map
    pub fn snapshot(&self) -> TracerSnapshot {
        TracerSnapshot {
            template_id: self.geometry.id.clone(),
            attempts: self
                .attempts
                .iter()
                .map(|(key, result)| AttemptRecord {
                    from: key.0.clone(),
                    to: key.1.clone(),
                    result: *result,
                })
                .collect(),
        }
    }

    pub fn geometry(&self) -> &SealGeometry {
        &self.geometry
    }

    /// Fréchet tolerance for this template: more complex shapes demand more
    /// precise tracing
    pub fn tolerance(&self) -> f64 {
        if self.geometry.edges.len() > COMPLEX_EDGE_COUNT {
            COMPLEX_TOLERANCE
        } else {
            SIMPLE_TOLERANCE
        }
    }

    /// Score a traced stroke against the edge connecting the two endpoints.
    ///
    /// Without a connecting edge the neutral result is returned and no state
    /// changes. Otherwise the attempt is recorded, overwriting any previous
    /// attempt for that edge.
    pub fn attempt_connection(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        stroke: &StrokeResult,
    ) -> ConnectionResult {
        let Some(edge) = self.geometry.edge_between(from, to) else {
            debug!(%from, %to, "no edge between endpoints");
            return ConnectionResult::no_edge();
        };

        let drawn = resample(&normalize_to_unit_space(&stroke.simplified), RESAMPLE_POINTS);
        let canonical = resample(&normalize_to_unit_space(&edge.path), RESAMPLE_POINTS);

        let deviation = discrete_frechet_distance(&drawn, &canonical);
        let tolerance = self.tolerance();
        let accuracy = round3((1.0 - deviation / tolerance).max(0.0));
        let result = ConnectionResult {
            accuracy,
            deviation,
            valid: accuracy >= VALIDITY_THRESHOLD,
        };

        debug!(%from, %to, deviation, accuracy, valid = result.valid, "edge attempt scored");

        self.attempts
            .insert(EdgeKey::new(from.clone(), to.clone()), result);
        result
    }

    /// Recorded attempt for an edge, if any
    pub fn attempt_for(&self, a: &NodeId, b: &NodeId) -> Option<&ConnectionResult> {
        self.attempts.get(&EdgeKey::new(a.clone(), b.clone()))
    }

    /// Number of edges attempted so far
    pub fn attempted_count(&self) -> usize {
        self.attempts.len()
    }

    /// Weighted mean accuracy over the attempted edges.
    ///
    /// Weighted by each edge's template weight and divided by the weight of
    /// attempted edges only, so integrity rises as more, and more accurate,
    /// edges are attempted.
    pub fn integrity(&self) -> f64 {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for edge in &self.geometry.edges {
            let key = EdgeKey::new(edge.from.clone(), edge.to.clone());
            if let Some(result) = self.attempts.get(&key) {
                weighted_sum += edge.weight * result.accuracy;
                weight_total += edge.weight;
            }
        }

        if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            0.0
        }
    }

    /// Whether every template edge has been attempted and is valid
    pub fn is_complete(&self) -> bool {
        self.geometry.edges.iter().all(|edge| {
            let key = EdgeKey::new(edge.from.clone(), edge.to.clone());
            self.attempts.get(&key).map(|r| r.valid).unwrap_or(false)
        })
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::stroke::StrokeEvaluator;
    use crate::capture::types::{Point, PointerInputEvent};
    use crate::seal::geometry::{SealEdge, SealNode};

    fn make_seal() -> SealGeometry {
        SealGeometry {
            id: "tri".to_string(),
            name: "Triangle".to_string(),
            nodes: vec![
                SealNode {
                    id: NodeId::new("a"),
                    position: Point::new(0.0, 0.0),
                },
                SealNode {
                    id: NodeId::new("b"),
                    position: Point::new(1.0, 0.0),
                },
                SealNode {
                    id: NodeId::new("c"),
                    position: Point::new(0.5, 1.0),
                },
            ],
            edges: vec![
                SealEdge {
                    from: NodeId::new("a"),
                    to: NodeId::new("b"),
                    path: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
                    weight: 0.5,
                },
                SealEdge {
                    from: NodeId::new("b"),
                    to: NodeId::new("c"),
                    path: vec![Point::new(1.0, 0.0), Point::new(0.5, 1.0)],
                    weight: 0.5,
                },
            ],
        }
    }

    fn stroke_along(points: &[(f64, f64)]) -> StrokeResult {
        let mut evaluator = StrokeEvaluator::new();
        for (i, (x, y)) in points.iter().enumerate() {
            evaluator.push(PointerInputEvent::new(*x, *y, 0.5, i as f64 * 10.0, 0));
        }
        evaluator.finalize()
    }

    #[test]
    fn test_canonical_trace_scores_high() {
        let mut tracer = SealTracer::new(make_seal());
        // Trace edge a->b exactly, in raw pixels
        let stroke = stroke_along(&[(0.0, 0.0), (250.0, 0.0), (500.0, 0.0)]);

        let result = tracer.attempt_connection(&NodeId::new("a"), &NodeId::new("b"), &stroke);
        assert!(result.accuracy >= 0.95, "accuracy was {}", result.accuracy);
        assert!(result.valid);
    }

    #[test]
    fn test_reverse_direction_matches() {
        let mut tracer = SealTracer::new(make_seal());
        let stroke = stroke_along(&[(500.0, 0.0), (0.0, 0.0)]);

        let result = tracer.attempt_connection(&NodeId::new("b"), &NodeId::new("a"), &stroke);
        assert!(result.valid);
        assert!(tracer
            .attempt_for(&NodeId::new("a"), &NodeId::new("b"))
            .is_some());
    }

    #[test]
    fn test_missing_edge_neutral_result() {
        let mut tracer = SealTracer::new(make_seal());
        let stroke = stroke_along(&[(0.0, 0.0), (100.0, 100.0)]);

        let result = tracer.attempt_connection(&NodeId::new("a"), &NodeId::new("c"), &stroke);
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.deviation, 1.0);
        assert!(!result.valid);
        assert_eq!(tracer.attempted_count(), 0);
    }

    #[test]
    fn test_reattempt_overwrites() {
        let mut tracer = SealTracer::new(make_seal());
        let a = NodeId::new("a");
        let b = NodeId::new("b");

        let sloppy = stroke_along(&[(0.0, 0.0), (250.0, 180.0), (500.0, 0.0)]);
        let first = tracer.attempt_connection(&a, &b, &sloppy);

        let clean = stroke_along(&[(0.0, 0.0), (500.0, 0.0)]);
        let second = tracer.attempt_connection(&a, &b, &clean);

        assert_eq!(tracer.attempted_count(), 1);
        assert!(second.accuracy > first.accuracy);
        assert_eq!(tracer.attempt_for(&a, &b), Some(&second));
    }

    #[test]
    fn test_integrity_weights_attempted_edges_only() {
        let mut tracer = SealTracer::new(make_seal());
        let clean = stroke_along(&[(0.0, 0.0), (500.0, 0.0)]);
        tracer.attempt_connection(&NodeId::new("a"), &NodeId::new("b"), &clean);

        // Only edge a->b attempted; integrity is its accuracy, undiluted by
        // the untraced edge's weight
        let expected = tracer
            .attempt_for(&NodeId::new("a"), &NodeId::new("b"))
            .expect("attempted")
            .accuracy;
        assert!((tracer.integrity() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_integrity_empty_is_zero() {
        let tracer = SealTracer::new(make_seal());
        assert_eq!(tracer.integrity(), 0.0);
        assert!(!tracer.is_complete());
    }

    #[test]
    fn test_completion_requires_all_valid() {
        let mut tracer = SealTracer::new(make_seal());

        let ab = stroke_along(&[(0.0, 0.0), (500.0, 0.0)]);
        tracer.attempt_connection(&NodeId::new("a"), &NodeId::new("b"), &ab);
        assert!(!tracer.is_complete());

        let bc = stroke_along(&[(500.0, 0.0), (250.0, 500.0)]);
        tracer.attempt_connection(&NodeId::new("b"), &NodeId::new("c"), &bc);
        assert!(tracer.is_complete());
    }

    #[test]
    fn test_tolerance_tightens_for_complex_seals() {
        let mut seal = make_seal();
        assert_eq!(SealTracer::new(seal.clone()).tolerance(), SIMPLE_TOLERANCE);

        // Pad to more than six edges
        for i in 0..6 {
            seal.edges.push(SealEdge {
                from: NodeId::new("a"),
                to: NodeId::new(format!("x{i}")),
                path: vec![Point::new(0.0, 0.0), Point::new(0.1, 0.1)],
                weight: 0.0,
            });
        }
        assert_eq!(SealTracer::new(seal).tolerance(), COMPLEX_TOLERANCE);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut tracer = SealTracer::new(make_seal());
        let stroke = stroke_along(&[(0.0, 0.0), (500.0, 0.0)]);
        tracer.attempt_connection(&NodeId::new("a"), &NodeId::new("b"), &stroke);

        let snapshot = tracer.snapshot();
        let restored = SealTracer::restore(make_seal(), snapshot).expect("restores");

        assert_eq!(restored.attempted_count(), 1);
        assert!((restored.integrity() - tracer.integrity()).abs() < 1e-12);
    }

    #[test]
    fn test_restore_rejects_wrong_template() {
        let tracer = SealTracer::new(make_seal());
        let mut snapshot = tracer.snapshot();
        snapshot.template_id = "other".to_string();

        assert!(SealTracer::restore(make_seal(), snapshot).is_err());
    }

    #[test]
    fn test_restore_rejects_unknown_edge() {
        let snapshot = TracerSnapshot {
            template_id: "tri".to_string(),
            attempts: vec![AttemptRecord {
                from: NodeId::new("a"),
                to: NodeId::new("ghost"),
                result: ConnectionResult::no_edge(),
            }],
        };
        assert!(SealTracer::restore(make_seal(), snapshot).is_err());
    }
}
