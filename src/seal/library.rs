//! Built-in seal templates
//!
//! A small data-only registry standing in for the external template store.
//! Templates are constructed on demand; the core keeps no process-wide
//! mutable state.

use crate::capture::types::Point;
use crate::seal::geometry::{NodeId, SealEdge, SealGeometry, SealNode};
use crate::{Error, Result};

/// Identifiers of every built-in seal
pub fn ids() -> Vec<&'static str> {
    vec!["triad", "warding-star"]
}

/// Look up a built-in seal template by identifier.
///
/// Unknown identifiers are a configuration error, not a match failure.
pub fn lookup(id: &str) -> Result<SealGeometry> {
    match id {
        "triad" => Ok(triad()),
        "warding-star" => Ok(warding_star()),
        _ => Err(Error::UnknownTemplate(id.to_string())),
    }
}

/// All built-in seal templates
pub fn all() -> Vec<SealGeometry> {
    ids().into_iter()
        .map(|id| lookup(id).expect("built-in id"))
        .collect()
}

fn node(id: &str, x: f64, y: f64) -> SealNode {
    SealNode {
        id: NodeId::new(id),
        position: Point::new(x, y),
    }
}

fn edge(from: &str, to: &str, path: &[(f64, f64)], weight: f64) -> SealEdge {
    SealEdge {
        from: NodeId::new(from),
        to: NodeId::new(to),
        path: path.iter().map(|(x, y)| Point::new(*x, *y)).collect(),
        weight,
    }
}

/// Three nodes, three straight edges. The simplest teachable seal.
fn triad() -> SealGeometry {
    SealGeometry {
        id: "triad".to_string(),
        name: "Triad".to_string(),
        nodes: vec![
            node("apex", 0.5, 0.1),
            node("east", 0.9, 0.85),
            node("west", 0.1, 0.85),
        ],
        edges: vec![
            edge("apex", "east", &[(0.5, 0.1), (0.9, 0.85)], 0.34),
            edge("east", "west", &[(0.9, 0.85), (0.1, 0.85)], 0.33),
            edge("west", "apex", &[(0.1, 0.85), (0.5, 0.1)], 0.33),
        ],
    }
}

/// Five-pointed star around a core node: seven edges, so tracing runs at
/// the tighter complex-template tolerance.
fn warding_star() -> SealGeometry {
    SealGeometry {
        id: "warding-star".to_string(),
        name: "Warding Star".to_string(),
        nodes: vec![
            node("crown", 0.5, 0.05),
            node("dawn", 0.93, 0.36),
            node("dusk", 0.07, 0.36),
            node("ember", 0.76, 0.88),
            node("ash", 0.24, 0.88),
            node("core", 0.5, 0.5),
        ],
        edges: vec![
            edge("crown", "ember", &[(0.5, 0.05), (0.76, 0.88)], 0.16),
            edge("ember", "dusk", &[(0.76, 0.88), (0.07, 0.36)], 0.16),
            edge("dusk", "dawn", &[(0.07, 0.36), (0.93, 0.36)], 0.16),
            edge("dawn", "ash", &[(0.93, 0.36), (0.24, 0.88)], 0.16),
            edge("ash", "crown", &[(0.24, 0.88), (0.5, 0.05)], 0.16),
            edge("crown", "core", &[(0.5, 0.05), (0.48, 0.2), (0.52, 0.35), (0.5, 0.5)], 0.10),
            edge("core", "ember", &[(0.5, 0.5), (0.58, 0.63), (0.68, 0.76), (0.76, 0.88)], 0.10),
        ],
    }
}
