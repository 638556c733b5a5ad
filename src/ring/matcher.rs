//! Ring quality analysis
//!
//! Fits a circle to a traced ring and grades how round, how closed and how
//! evenly pressured the trace is, flagging the arc segments the drawer
//! traced poorly.

use crate::capture::types::{Point, StrokeResult};
use crate::geometry::circle::{
    fit_circle, point_angle_on_circle, point_deviation_from_circle, rms_deviation,
    standard_deviation, CircleFit,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of angular buckets in the weak-point analysis
pub const SEGMENT_COUNT: usize = 8;

/// A bucket is weak once its mean deviation exceeds the overall mean by
/// this factor
pub const DISPROPORTION_FACTOR: f64 = 1.5;

/// Noise floor as a fraction of the fitted radius; keeps near-perfect
/// circles unflagged
pub const NOISE_FLOOR_RATIO: f64 = 0.05;

/// Consistency assigned when the pressure profile is uniformly the
/// substituted device default (no real signal to measure spread of)
pub const DEFAULT_PRESSURE_CONSISTENCY: f64 = 0.7;

/// Weights of the overall-strength composite
pub const CIRCULARITY_WEIGHT: f64 = 0.50;
pub const CLOSURE_WEIGHT: f64 = 0.30;
pub const CONSISTENCY_WEIGHT: f64 = 0.20;

/// An arc segment whose fit is disproportionately worse than the rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeakArc {
    /// Start of the arc (radians, `[0, 2π)`)
    pub start_angle: f64,
    /// End of the arc (radians)
    pub end_angle: f64,
    /// Mean radial deviation of the points in this arc
    pub mean_deviation: f64,
}

/// Quality grade of one traced ring. Pure value object, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingResult {
    /// How round the trace is: `1 − rms(radial deviation) / radius`
    pub circularity: f64,
    /// How closed the trace is: `1 − endpoint gap / diameter`
    pub closure: f64,
    /// How even the pressure was along the trace
    pub consistency: f64,
    /// Weighted composite of the three grades
    pub overall_strength: f64,
    /// Arcs the drawer traced poorly
    pub weak_points: Vec<WeakArc>,
    /// Fitted circle center
    pub center: Point,
    /// Fitted circle radius
    pub radius: f64,
}

/// Grades traced rings against their least-squares circle fit
#[derive(Debug, Clone, Copy, Default)]
pub struct RingMatcher;

impl RingMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Grade a traced ring.
    ///
    /// The circle is fitted to the raw (pre-simplification) points. A
    /// degenerate fit (zero radius) yields the neutral all-zero result.
    pub fn evaluate(&self, stroke: &StrokeResult) -> RingResult {
        let fit = fit_circle(&stroke.points);

        if fit.radius <= f64::EPSILON {
            return RingResult {
                circularity: 0.0,
                closure: 0.0,
                consistency: 0.0,
                overall_strength: 0.0,
                weak_points: Vec::new(),
                center: fit.center,
                radius: 0.0,
            };
        }

        let deviations: Vec<f64> = stroke
            .points
            .iter()
            .map(|p| point_deviation_from_circle(p, fit.center.x, fit.center.y, fit.radius))
            .collect();

        let circularity = (1.0 - rms_deviation(&deviations) / fit.radius).max(0.0);
        let closure = (1.0 - stroke.start.distance_to(&stroke.end) / (2.0 * fit.radius)).max(0.0);
        let consistency = self.pressure_consistency(stroke);

        let overall_strength = circularity * CIRCULARITY_WEIGHT
            + closure * CLOSURE_WEIGHT
            + consistency * CONSISTENCY_WEIGHT;

        let weak_points = self.weak_arcs(&stroke.points, &deviations, &fit);

        debug!(
            circularity,
            closure,
            consistency,
            overall_strength,
            weak_arcs = weak_points.len(),
            "ring graded"
        );

        RingResult {
            circularity,
            closure,
            consistency,
            overall_strength,
            weak_points,
            center: fit.center,
            radius: fit.radius,
        }
    }

    /// Spread of the pressure profile, or the fixed fallback when the
    /// profile carries no real signal
    fn pressure_consistency(&self, stroke: &StrokeResult) -> f64 {
        if !stroke.has_pressure_signal() {
            return DEFAULT_PRESSURE_CONSISTENCY;
        }
        (1.0 - standard_deviation(&stroke.pressure_profile) * 4.0).max(0.0)
    }

    /// Bucket points by angular position around the fitted circle and flag
    /// buckets whose mean radial deviation is disproportionately high.
    fn weak_arcs(&self, points: &[Point], deviations: &[f64], fit: &CircleFit) -> Vec<WeakArc> {
        let overall_mean = deviations.iter().sum::<f64>() / deviations.len() as f64;
        let floor = (overall_mean * DISPROPORTION_FACTOR).max(fit.radius * NOISE_FLOOR_RATIO);

        let mut sums = [0.0; SEGMENT_COUNT];
        let mut counts = [0usize; SEGMENT_COUNT];
        let bucket_span = std::f64::consts::TAU / SEGMENT_COUNT as f64;

        for (point, deviation) in points.iter().zip(deviations) {
            let angle = point_angle_on_circle(point, fit.center.x, fit.center.y);
            let bucket = ((angle / bucket_span) as usize).min(SEGMENT_COUNT - 1);
            sums[bucket] += deviation;
            counts[bucket] += 1;
        }

        let mut weak = Vec::new();
        for bucket in 0..SEGMENT_COUNT {
            if counts[bucket] == 0 {
                continue;
            }
            let mean = sums[bucket] / counts[bucket] as f64;
            if mean > floor {
                weak.push(WeakArc {
                    start_angle: bucket as f64 * bucket_span,
                    end_angle: (bucket + 1) as f64 * bucket_span,
                    mean_deviation: mean,
                });
            }
        }

        weak
    }
}
