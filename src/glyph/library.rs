//! Built-in glyph templates and coherence rules
//!
//! A small data-only registry standing in for the external template store,
//! plus the standard rule tables the coherence checker evaluates.

use crate::capture::types::Point;
use crate::glyph::coherence::{ChainRule, CoherenceRules};
use crate::glyph::templates::{GlyphId, GlyphTemplate, StructuralInvariants, WindingDirection};
use crate::{Error, Result};

/// Identifiers of every built-in glyph
pub fn ids() -> Vec<&'static str> {
    vec![
        "ember-sun",
        "keel-moon",
        "twin-serpent",
        "knot-of-ash",
        "crossed-gate",
    ]
}

/// Look up a built-in glyph template by identifier.
///
/// Unknown identifiers are a configuration error, not a match failure.
pub fn lookup(id: &str) -> Result<GlyphTemplate> {
    match id {
        "ember-sun" => Ok(ember_sun()),
        "keel-moon" => Ok(keel_moon()),
        "twin-serpent" => Ok(twin_serpent()),
        "knot-of-ash" => Ok(knot_of_ash()),
        "crossed-gate" => Ok(crossed_gate()),
        _ => Err(Error::UnknownTemplate(id.to_string())),
    }
}

/// All built-in glyph templates
pub fn all() -> Vec<GlyphTemplate> {
    ids().into_iter()
        .map(|id| lookup(id).expect("built-in id"))
        .collect()
}

/// Standard rule tables for the built-in glyph set
pub fn standard_rules() -> CoherenceRules {
    CoherenceRules {
        contradictions: vec![(GlyphId::new("ember-sun"), GlyphId::new("keel-moon"))],
        chains: vec![ChainRule {
            trigger: GlyphId::new("knot-of-ash"),
            companions: vec![GlyphId::new("crossed-gate")],
        }],
        categories: vec![
            (GlyphId::new("ember-sun"), "celestial".to_string()),
            (GlyphId::new("keel-moon"), "celestial".to_string()),
            (GlyphId::new("twin-serpent"), "beast".to_string()),
            (GlyphId::new("knot-of-ash"), "binding".to_string()),
            (GlyphId::new("crossed-gate"), "binding".to_string()),
        ],
    }
}

fn path(points: &[(f64, f64)]) -> Vec<Point> {
    points.iter().map(|(x, y)| Point::new(*x, *y)).collect()
}

/// Closed counter-clockwise octagon ring
fn ember_sun() -> GlyphTemplate {
    let octagon: Vec<Point> = (0..=8)
        .map(|i| {
            let angle = i as f64 / 8.0 * std::f64::consts::TAU;
            Point::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        })
        .collect();

    GlyphTemplate {
        id: GlyphId::new("ember-sun"),
        name: "Ember Sun".to_string(),
        required_strokes: 1,
        invariants: StructuralInvariants {
            closed: Some(true),
            self_intersecting: Some(false),
            winding: Some(WindingDirection::CounterClockwise),
        },
        path: octagon,
    }
}

/// Open crescent arc, 240 degrees of a circle
fn keel_moon() -> GlyphTemplate {
    let arc: Vec<Point> = (0..9)
        .map(|i| {
            let angle = (60.0 + i as f64 * 30.0).to_radians();
            Point::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        })
        .collect();

    GlyphTemplate {
        id: GlyphId::new("keel-moon"),
        name: "Keel Moon".to_string(),
        required_strokes: 1,
        invariants: StructuralInvariants {
            closed: Some(false),
            self_intersecting: Some(false),
            winding: None,
        },
        path: arc,
    }
}

/// Open S-curve
fn twin_serpent() -> GlyphTemplate {
    let curve: Vec<Point> = (0..10)
        .map(|i| {
            let t = i as f64 / 9.0;
            Point::new(t, 0.5 + 0.4 * (t * std::f64::consts::TAU).sin())
        })
        .collect();

    GlyphTemplate {
        id: GlyphId::new("twin-serpent"),
        name: "Twin Serpent".to_string(),
        required_strokes: 1,
        invariants: StructuralInvariants {
            closed: Some(false),
            self_intersecting: Some(false),
            winding: None,
        },
        path: curve,
    }
}

/// Open bowtie: the one built-in glyph that must cross itself
fn knot_of_ash() -> GlyphTemplate {
    GlyphTemplate {
        id: GlyphId::new("knot-of-ash"),
        name: "Knot of Ash".to_string(),
        required_strokes: 1,
        invariants: StructuralInvariants {
            closed: Some(false),
            self_intersecting: Some(true),
            winding: None,
        },
        path: path(&[
            (0.0, 0.1),
            (0.15, 0.22),
            (0.3, 0.34),
            (0.7, 0.66),
            (0.85, 0.78),
            (1.0, 0.9),
            (1.0, 0.63),
            (1.0, 0.37),
            (1.0, 0.1),
            (0.7, 0.34),
            (0.3, 0.66),
            (0.15, 0.78),
            (0.0, 0.9),
        ]),
    }
}

/// Two crossing diagonals, normally drawn as two strokes
fn crossed_gate() -> GlyphTemplate {
    GlyphTemplate {
        id: GlyphId::new("crossed-gate"),
        name: "Crossed Gate".to_string(),
        required_strokes: 2,
        invariants: StructuralInvariants {
            closed: None,
            self_intersecting: Some(true),
            winding: None,
        },
        path: path(&[
            (0.0, 1.0),
            (0.3, 0.7),
            (0.7, 0.3),
            (1.0, 0.0),
            (0.0, 0.0),
            (0.3, 0.3),
            (0.7, 0.7),
            (1.0, 1.0),
        ]),
    }
}
