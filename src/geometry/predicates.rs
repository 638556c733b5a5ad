//! Winding, closure and self-intersection predicates

use crate::capture::types::Point;
use crate::geometry::path::path_length;

/// Default ratio of path length under which a stroke counts as closed
pub const DEFAULT_CLOSURE_RATIO: f64 = 0.15;

/// Shoelace signed area of a polygon.
///
/// The sign encodes winding direction (positive for counter-clockwise in
/// y-up coordinates). Fewer than three points have no area.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area / 2.0
}

/// Whether the straight-line gap between first and last point is small
/// relative to the traced length.
///
/// True iff `dist(first, last) < ratio × path_length`. Paths of fewer than
/// two points are never closed.
pub fn is_closed(points: &[Point], ratio: f64) -> bool {
    if points.len() < 2 {
        return false;
    }

    let total = path_length(points);
    if total <= 0.0 {
        return false;
    }

    let gap = points[0].distance_to(points.last().expect("len >= 2"));
    gap < ratio * total
}

/// Orientation of the ordered triple (a, b, c): positive for a left turn,
/// negative for a right turn, zero for collinear
fn orientation(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper crossing test: the segments straddle each other strictly
fn segments_properly_cross(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

/// Whether any two non-adjacent segments of the polyline properly cross.
///
/// Requires at least four points; shorter paths cannot self-intersect.
pub fn self_intersects(points: &[Point]) -> bool {
    if points.len() < 4 {
        return false;
    }

    let segment_count = points.len() - 1;
    for i in 0..segment_count {
        for j in (i + 2)..segment_count {
            if segments_properly_cross(&points[i], &points[i + 1], &points[j], &points[j + 1]) {
                return true;
            }
        }
    }

    false
}
