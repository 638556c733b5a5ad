//! Path normalization and resampling
//!
//! Shared groundwork for every shape matcher: paths are brought into a
//! common unit space and resampled to a fixed point count before any
//! distance metric runs.

use crate::capture::types::Point;

/// Total arc length of a polyline
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Index of the point nearest to `target`, ties broken by first occurrence
pub fn nearest_point_index(points: &[Point], target: &Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in points.iter().enumerate() {
        let dist = point.distance_to(target);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

/// Translate a path so the bounding box's minimum corner is the origin,
/// then scale by the larger bounding-box extent.
///
/// Scaling is uniform, preserving aspect ratio rather than stretching each
/// axis independently. Degenerate inputs (single point or zero extent) are
/// returned unchanged; empty input returns empty.
pub fn normalize_to_unit_space(points: &[Point]) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let scale = (max_x - min_x).max(max_y - min_y);
    if scale <= 0.0 {
        return points.to_vec();
    }

    points
        .iter()
        .map(|p| Point::new((p.x - min_x) / scale, (p.y - min_y) / scale))
        .collect()
}

/// Produce exactly `n` points evenly spaced by arc length along the
/// original polyline, linearly interpolated between the original points.
///
/// Inputs with fewer than two points are padded by repeating the last (or
/// only) point; an empty input yields `n` origin points.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    assert!(n >= 2, "resample requires n >= 2, got {n}");

    if points.len() < 2 {
        let fill = points.last().copied().unwrap_or_default();
        return vec![fill; n];
    }

    // Cumulative-length table over the original points
    let mut cumulative = Vec::with_capacity(points.len());
    cumulative.push(0.0);
    for pair in points.windows(2) {
        let last = *cumulative.last().expect("non-empty");
        cumulative.push(last + pair[0].distance_to(&pair[1]));
    }

    let total = *cumulative.last().expect("non-empty");
    if total <= 0.0 {
        return vec![points[0]; n];
    }

    let mut resampled = Vec::with_capacity(n);
    let mut segment = 0;
    for k in 0..n {
        let target = total * k as f64 / (n - 1) as f64;

        while segment + 1 < cumulative.len() - 1 && cumulative[segment + 1] < target {
            segment += 1;
        }

        let span = cumulative[segment + 1] - cumulative[segment];
        let t = if span > 0.0 {
            ((target - cumulative[segment]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let a = points[segment];
        let b = points[segment + 1];
        resampled.push(Point::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
        ));
    }

    resampled
}
