//! Core types for stroke capture
//!
//! Defines the fundamental data structures used throughout the scoring pipeline.

use serde::{Deserialize, Serialize};

/// Pressure substituted when the device reports none (exactly 0)
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// Number of samples in a stroke's fixed-length pressure profile
pub const PRESSURE_PROFILE_LEN: usize = 20;

/// Plain 2-D coordinate.
///
/// Units vary by context: raw device pixels during capture, `[0, 1]`
/// normalized space for template comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Perpendicular distance to the line through `line_start` and `line_end`
    pub fn perpendicular_distance(&self, line_start: &Point, line_end: &Point) -> f64 {
        let dx = line_end.x - line_start.x;
        let dy = line_end.y - line_start.y;

        let line_length_sq = dx * dx + dy * dy;

        if line_length_sq < 1e-10 {
            // Line segment is actually a point
            return self.distance_to(line_start);
        }

        let numerator = ((self.x - line_start.x) * dy - (self.y - line_start.y) * dx).abs();
        numerator / line_length_sq.sqrt()
    }
}

/// A single normalized pointer sample fed into the evaluator.
///
/// The core does not distinguish touch, stylus or mouse; the input layer
/// hands over already-normalized samples in non-decreasing timestamp order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInputEvent {
    /// X coordinate (raw device pixels)
    pub x: f64,
    /// Y coordinate (raw device pixels)
    pub y: f64,
    /// Contact pressure in `[0, 1]`; 0 means the device reports none
    pub pressure: f64,
    /// Milliseconds since an arbitrary stroke-local epoch
    pub timestamp_ms: f64,
    /// Identifier of the contributing pointer
    pub pointer_id: u32,
}

impl PointerInputEvent {
    pub fn new(x: f64, y: f64, pressure: f64, timestamp_ms: f64, pointer_id: u32) -> Self {
        Self {
            x,
            y,
            pressure,
            timestamp_ms,
            pointer_id,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Normalized description of one completed stroke.
///
/// Produced by [`super::stroke::StrokeEvaluator::finalize`] and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeResult {
    /// Raw path as sampled from the device
    pub points: Vec<Point>,
    /// Ramer-Douglas-Peucker simplified path
    pub simplified: Vec<Point>,
    /// Mean of the smoothed instantaneous velocities (pixels/ms)
    pub average_velocity: f64,
    /// Pressure resampled to a fixed number of arc-length-even samples
    pub pressure_profile: Vec<f64>,
    /// Signed curvature at each interior point of the simplified path
    pub curvature: Vec<f64>,
    /// Total stroke duration (ms)
    pub duration_ms: f64,
    /// First raw sample position
    pub start: Point,
    /// Last raw sample position
    pub end: Point,
    /// Total arc length of the raw path (pixels)
    pub path_length: f64,
}

impl StrokeResult {
    /// Number of raw samples behind this stroke
    pub fn sample_count(&self) -> usize {
        self.points.len()
    }

    /// Whether the pressure profile carries a real signal rather than the
    /// substituted device default throughout
    pub fn has_pressure_signal(&self) -> bool {
        self.pressure_profile
            .iter()
            .any(|&p| (p - DEFAULT_PRESSURE).abs() > 1e-9)
    }
}
