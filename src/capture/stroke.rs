//! Stroke Evaluation
//!
//! Accumulates raw pointer samples one at a time and, on finalize, turns
//! them into an immutable [`StrokeResult`]: simplified path, velocity,
//! pressure profile and curvature.

use crate::capture::types::{
    Point, PointerInputEvent, StrokeResult, DEFAULT_PRESSURE, PRESSURE_PROFILE_LEN,
};
use crate::geometry::path::path_length;
use tracing::debug;

/// Default epsilon for RDP simplification (raw pixels)
pub const DEFAULT_RDP_EPSILON: f64 = 2.0;

/// Trailing window size for velocity smoothing
pub const VELOCITY_WINDOW: usize = 5;

/// Stateful accumulator turning raw pointer samples into a [`StrokeResult`].
///
/// Samples must be appended in non-decreasing timestamp order. The same
/// instance can be reused across strokes via [`StrokeEvaluator::reset`].
#[derive(Debug, Clone)]
pub struct StrokeEvaluator {
    samples: Vec<PointerInputEvent>,
    epsilon: f64,
}

impl StrokeEvaluator {
    /// Create an evaluator with the default simplification epsilon
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            epsilon: DEFAULT_RDP_EPSILON,
        }
    }

    /// Create an evaluator with a custom simplification epsilon.
    ///
    /// Clamps epsilon to the range \[0.001, 100.0\] to prevent degenerate
    /// behavior.
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            samples: Vec::new(),
            epsilon: epsilon.clamp(0.001, 100.0),
        }
    }

    /// Ingest one pointer sample.
    ///
    /// A pressure of exactly 0 (device reports none) is substituted with
    /// the default pressure at ingestion time.
    pub fn push(&mut self, mut event: PointerInputEvent) {
        if event.pressure == 0.0 {
            event.pressure = DEFAULT_PRESSURE;
        }
        self.samples.push(event);
    }

    /// Number of accumulated samples
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Whether enough samples have accumulated to finalize
    pub fn is_minimum_length(&self) -> bool {
        !self.samples.is_empty()
    }

    /// Clear all accumulated state so the instance can take the next stroke
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Produce the immutable stroke description.
    ///
    /// # Panics
    ///
    /// Panics if no samples have been accumulated. Callers must check
    /// [`StrokeEvaluator::is_minimum_length`] first; an empty finalize is a
    /// caller bug, not a recoverable input condition.
    pub fn finalize(&self) -> StrokeResult {
        assert!(
            !self.samples.is_empty(),
            "StrokeEvaluator::finalize called with no accumulated samples"
        );

        let points: Vec<Point> = self.samples.iter().map(|s| s.position()).collect();
        let simplified = rdp_simplify(&points, self.epsilon);
        let length = path_length(&points);
        let duration_ms = self.samples.last().expect("non-empty").timestamp_ms
            - self.samples[0].timestamp_ms;

        let result = StrokeResult {
            start: points[0],
            end: *points.last().expect("non-empty"),
            average_velocity: self.average_velocity(),
            pressure_profile: self.pressure_profile(&points, length),
            curvature: signed_curvature(&simplified),
            duration_ms,
            path_length: length,
            simplified,
            points,
        };

        debug!(
            samples = result.points.len(),
            simplified = result.simplified.len(),
            length = result.path_length,
            "stroke finalized"
        );

        result
    }

    /// Mean of the trailing-window-smoothed instantaneous velocities
    /// (pixels/ms).
    ///
    /// Velocities divide by the inter-sample time delta, so sample pairs
    /// with a non-positive delta are skipped.
    fn average_velocity(&self) -> f64 {
        let mut velocities = Vec::with_capacity(self.samples.len().saturating_sub(1));
        for pair in self.samples.windows(2) {
            let dt = pair[1].timestamp_ms - pair[0].timestamp_ms;
            if dt <= 0.0 {
                continue;
            }
            let dist = pair[0].position().distance_to(&pair[1].position());
            velocities.push(dist / dt);
        }

        if velocities.is_empty() {
            return 0.0;
        }

        // Trailing window, shrinking near the start
        let mut smoothed_sum = 0.0;
        for i in 0..velocities.len() {
            let window_start = i.saturating_sub(VELOCITY_WINDOW - 1);
            let window = &velocities[window_start..=i];
            smoothed_sum += window.iter().sum::<f64>() / window.len() as f64;
        }

        smoothed_sum / velocities.len() as f64
    }

    /// Pressure resampled to a fixed number of values at even arc-length
    /// spacing along the raw (pre-simplification) path.
    fn pressure_profile(&self, points: &[Point], total_length: f64) -> Vec<f64> {
        let pressures: Vec<f64> = self.samples.iter().map(|s| s.pressure).collect();

        if pressures.len() == 1 || total_length <= 0.0 {
            return vec![pressures[0]; PRESSURE_PROFILE_LEN];
        }

        // Cumulative arc length per sample
        let mut cumulative = Vec::with_capacity(points.len());
        cumulative.push(0.0);
        for pair in points.windows(2) {
            let last = *cumulative.last().expect("non-empty");
            cumulative.push(last + pair[0].distance_to(&pair[1]));
        }

        let mut profile = Vec::with_capacity(PRESSURE_PROFILE_LEN);
        let mut segment = 0;
        for k in 0..PRESSURE_PROFILE_LEN {
            let target = total_length * k as f64 / (PRESSURE_PROFILE_LEN - 1) as f64;

            while segment + 1 < cumulative.len() - 1 && cumulative[segment + 1] < target {
                segment += 1;
            }

            let span = cumulative[segment + 1] - cumulative[segment];
            let t = if span > 0.0 {
                ((target - cumulative[segment]) / span).clamp(0.0, 1.0)
            } else {
                0.0
            };
            profile.push(pressures[segment] * (1.0 - t) + pressures[segment + 1] * t);
        }

        profile
    }
}

impl Default for StrokeEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Ramer-Douglas-Peucker simplification with a perpendicular-distance
/// tolerance. A path of two or fewer points is returned unchanged.
pub fn rdp_simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let (max_dist, max_index) = find_max_distance(points);

    if max_dist > epsilon {
        // Recursively simplify both halves
        let mut left = rdp_simplify(&points[..=max_index], epsilon);
        let right = rdp_simplify(&points[max_index..], epsilon);

        // Remove the duplicate point at the junction
        left.pop();
        left.extend(right);
        left
    } else {
        // All points are within epsilon of the line, keep only endpoints
        match (points.first(), points.last()) {
            (Some(&first), Some(&last)) => vec![first, last],
            _ => points.to_vec(),
        }
    }
}

/// Find the interior point with maximum perpendicular distance from the
/// line between the first and last point
fn find_max_distance(points: &[Point]) -> (f64, usize) {
    let start = &points[0];
    let end = match points.last() {
        Some(p) => p,
        None => return (0.0, 0),
    };

    let mut max_dist = 0.0;
    let mut max_index = 0;

    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = point.perpendicular_distance(start, end);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    (max_dist, max_index)
}

/// Signed curvature at each interior point of a simplified path.
///
/// Cross product of the two adjacent direction vectors divided by the
/// product of their magnitudes; degenerate (zero-length) segments
/// contribute 0. Paths of fewer than three points have no interior and
/// yield an empty array.
pub fn signed_curvature(points: &[Point]) -> Vec<f64> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut curvature = Vec::with_capacity(points.len() - 2);
    for window in points.windows(3) {
        let v1 = (window[1].x - window[0].x, window[1].y - window[0].y);
        let v2 = (window[2].x - window[1].x, window[2].y - window[1].y);

        let cross = v1.0 * v2.1 - v1.1 * v2.0;
        let magnitude = (v1.0 * v1.0 + v1.1 * v1.1).sqrt() * (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

        curvature.push(if magnitude > 0.0 { cross / magnitude } else { 0.0 });
    }

    curvature
}
