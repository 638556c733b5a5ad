//! Glyph template data model

use crate::capture::types::Point;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Bounds on a glyph template's canonical path length
pub const MIN_CANONICAL_POINTS: usize = 8;
pub const MAX_CANONICAL_POINTS: usize = 17;

/// Opaque glyph identifier.
///
/// A newtype so glyph ids cannot be mixed up with node ids at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphId(String);

impl GlyphId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Winding direction of a closed stroke, from the shoelace sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindingDirection {
    Clockwise,
    CounterClockwise,
}

/// Structural constraints a drawn path must satisfy before shape scoring.
///
/// `None` leaves the property unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuralInvariants {
    /// Must (true) or must not (false) form a closed loop
    pub closed: Option<bool>,
    /// Must (true) or must not (false) cross itself
    pub self_intersecting: Option<bool>,
    /// Required winding direction
    pub winding: Option<WindingDirection>,
}

/// A canonical glyph shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphTemplate {
    pub id: GlyphId,
    pub name: String,
    /// Stroke count the glyph is normally drawn with
    pub required_strokes: usize,
    pub invariants: StructuralInvariants,
    /// Canonical path of 8–17 normalized points
    pub path: Vec<Point>,
}

impl GlyphTemplate {
    pub fn validate(&self) -> Result<()> {
        if self.required_strokes == 0 {
            return Err(Error::Template(format!(
                "glyph '{}' requires zero strokes",
                self.id
            )));
        }
        if self.path.len() < MIN_CANONICAL_POINTS || self.path.len() > MAX_CANONICAL_POINTS {
            return Err(Error::Template(format!(
                "glyph '{}' canonical path has {} points, expected {}..={}",
                self.id,
                self.path.len(),
                MIN_CANONICAL_POINTS,
                MAX_CANONICAL_POINTS
            )));
        }
        Ok(())
    }
}
