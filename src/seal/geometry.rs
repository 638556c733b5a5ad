//! Seal template data model
//!
//! A seal template is a set of named nodes with normalized positions and a
//! set of weighted edges, each carrying the canonical path a trace is
//! scored against. Template data is immutable input supplied by a registry.

use crate::capture::types::Point;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Permitted drift of a template's total edge weight from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Opaque node identifier.
///
/// A newtype so node ids cannot be mixed up with glyph ids at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named anchor point of a seal template, in `[0, 1]` normalized space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealNode {
    pub id: NodeId,
    pub position: Point,
}

/// An undirected template edge with its canonical path and importance weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Canonical path in normalized space, at least two points
    pub path: Vec<Point>,
    /// Importance weight in `[0, 1]`; weights of one template sum to ≈1.0
    pub weight: f64,
}

impl SealEdge {
    /// Whether this edge connects the two endpoints, in either direction
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }
}

/// A complete seal template graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealGeometry {
    /// Template identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    pub nodes: Vec<SealNode>,
    pub edges: Vec<SealEdge>,
}

impl SealGeometry {
    /// Look up the edge connecting two endpoints, in either direction
    pub fn edge_between(&self, a: &NodeId, b: &NodeId) -> Option<&SealEdge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    /// Check the structural contract every authored template must satisfy.
    ///
    /// Edge weights are the importance basis for integrity scoring, so their
    /// sum must stay at ≈1.0.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::Template(format!("seal '{}' has no nodes", self.id)));
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(&node.id) {
                return Err(Error::Template(format!(
                    "seal '{}' repeats node '{}'",
                    self.id, node.id
                )));
            }
        }

        if self.edges.is_empty() {
            return Err(Error::Template(format!("seal '{}' has no edges", self.id)));
        }

        let mut weight_sum = 0.0;
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains(endpoint) {
                    return Err(Error::Template(format!(
                        "seal '{}' edge references unknown node '{}'",
                        self.id, endpoint
                    )));
                }
            }
            if edge.path.len() < 2 {
                return Err(Error::Template(format!(
                    "seal '{}' edge {}->{} has a canonical path of fewer than 2 points",
                    self.id, edge.from, edge.to
                )));
            }
            if !(0.0..=1.0).contains(&edge.weight) {
                return Err(Error::Template(format!(
                    "seal '{}' edge {}->{} weight {} outside [0, 1]",
                    self.id, edge.from, edge.to, edge.weight
                )));
            }
            weight_sum += edge.weight;
        }

        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::Template(format!(
                "seal '{}' edge weights sum to {weight_sum}, expected ≈1.0",
                self.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_seal(weight_a: f64, weight_b: f64) -> SealGeometry {
        SealGeometry {
            id: "test".to_string(),
            name: "Test".to_string(),
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
                    weight: weight_a,
                },
                SealEdge {
                    from: NodeId::new("b"),
                    to: NodeId::new("c"),
                    path: vec![Point::new(1.0, 0.0), Point::new(0.5, 1.0)],
                    weight: weight_b,
                },
            ],
        }
    }

    #[test]
    fn test_validate_accepts_unit_weight_sum() {
        assert!(two_node_seal(0.5, 0.5).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_weight_sum() {
        assert!(two_node_seal(0.5, 0.2).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_endpoint() {
        let mut seal = two_node_seal(0.5, 0.5);
        seal.edges[0].to = NodeId::new("ghost");
        assert!(seal.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_path() {
        let mut seal = two_node_seal(0.5, 0.5);
        seal.edges[0].path.truncate(1);
        assert!(seal.validate().is_err());
    }

    #[test]
    fn test_edge_between_either_direction() {
        let seal = two_node_seal(0.5, 0.5);
        let a = NodeId::new("a");
        let b = NodeId::new("b");
        let c = NodeId::new("c");

        assert!(seal.edge_between(&a, &b).is_some());
        assert!(seal.edge_between(&b, &a).is_some());
        assert!(seal.edge_between(&a, &c).is_none());
    }
}
