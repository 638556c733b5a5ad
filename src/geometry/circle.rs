//! Least-squares circle fitting and radial statistics

use crate::capture::types::Point;

/// Fitted circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFit {
    pub center: Point,
    pub radius: f64,
}

/// Least-squares algebraic circle fit.
///
/// Solves the linear system derived from `x² + y² + Dx + Ey + F = 0` for
/// the three unknowns via normal equations over three or more points, with
/// `center = (-D/2, -E/2)` and `radius = sqrt((D² + E²)/4 - F)`.
///
/// Degenerate cases: one point yields radius 0 centered on the point; two
/// points yield their midpoint and half the separation; collinear inputs
/// (singular system) fall back to the centroid and the mean point-to-centroid
/// distance.
pub fn fit_circle(points: &[Point]) -> CircleFit {
    match points.len() {
        0 => CircleFit {
            center: Point::default(),
            radius: 0.0,
        },
        1 => CircleFit {
            center: points[0],
            radius: 0.0,
        },
        2 => CircleFit {
            center: Point::new(
                (points[0].x + points[1].x) / 2.0,
                (points[0].y + points[1].y) / 2.0,
            ),
            radius: points[0].distance_to(&points[1]) / 2.0,
        },
        _ => fit_circle_algebraic(points),
    }
}

fn fit_circle_algebraic(points: &[Point]) -> CircleFit {
    // Normal equations A^T A [D E F]^T = A^T b with rows [x y 1] and
    // b = -(x² + y²)
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    let mut bx = 0.0;
    let mut by = 0.0;
    let mut b1 = 0.0;
    let n = points.len() as f64;

    for p in points {
        let rhs = -(p.x * p.x + p.y * p.y);
        sxx += p.x * p.x;
        sxy += p.x * p.y;
        syy += p.y * p.y;
        sx += p.x;
        sy += p.y;
        bx += p.x * rhs;
        by += p.y * rhs;
        b1 += rhs;
    }

    match solve_3x3(
        [[sxx, sxy, sx], [sxy, syy, sy], [sx, sy, n]],
        [bx, by, b1],
    ) {
        Some([d, e, f]) => {
            let center = Point::new(-d / 2.0, -e / 2.0);
            let radius_sq = (d * d + e * e) / 4.0 - f;
            CircleFit {
                center,
                radius: radius_sq.max(0.0).sqrt(),
            }
        }
        None => fit_circle_fallback(points),
    }
}

/// Collinear points leave the normal equations singular; approximate with
/// the centroid and the mean distance to it
fn fit_circle_fallback(points: &[Point]) -> CircleFit {
    let n = points.len() as f64;
    let center = Point::new(
        points.iter().map(|p| p.x).sum::<f64>() / n,
        points.iter().map(|p| p.y).sum::<f64>() / n,
    );
    let radius = points.iter().map(|p| p.distance_to(&center)).sum::<f64>() / n;
    CircleFit { center, radius }
}

/// Solve a 3×3 linear system by Gaussian elimination with partial pivoting.
/// Returns None when the matrix is (near-)singular.
fn solve_3x3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let pivot_row = (col..3)
            .max_by(|&r1, &r2| {
                a[r1][col]
                    .abs()
                    .partial_cmp(&a[r2][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("non-empty range");

        if a[pivot_row][col].abs() < 1e-12 {
            return None;
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; 3];
    for row in (0..3).rev() {
        let mut sum = b[row];
        for k in (row + 1)..3 {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    Some(x)
}

/// Absolute radial deviation of a point from a fitted circle
pub fn point_deviation_from_circle(p: &Point, cx: f64, cy: f64, r: f64) -> f64 {
    (p.distance_to(&Point::new(cx, cy)) - r).abs()
}

/// Root mean square of a value series; 0 for empty input
pub fn rms_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Population standard deviation (divide by n, not n-1); 0 for empty input
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Angle of a point around a circle center, normalized to `[0, 2π)`
pub fn point_angle_on_circle(p: &Point, cx: f64, cy: f64) -> f64 {
    let angle = (p.y - cy).atan2(p.x - cx);
    if angle < 0.0 {
        angle + std::f64::consts::TAU
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_cardinal_points() {
        let points = vec![
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1.0, 0.0),
            Point::new(0.0, -1.0),
        ];
        let fit = fit_circle(&points);
        assert!(fit.center.x.abs() < 1e-9);
        assert!(fit.center.y.abs() < 1e-9);
        assert!((fit.radius - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_offset_circle() {
        let points: Vec<Point> = (0..12)
            .map(|i| {
                let angle = i as f64 / 12.0 * std::f64::consts::TAU;
                Point::new(5.0 + 3.0 * angle.cos(), -2.0 + 3.0 * angle.sin())
            })
            .collect();
        let fit = fit_circle(&points);
        assert!((fit.center.x - 5.0).abs() < 1e-9);
        assert!((fit.center.y + 2.0).abs() < 1e-9);
        assert!((fit.radius - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_single_point() {
        let fit = fit_circle(&[Point::new(4.0, 7.0)]);
        assert_eq!(fit.center, Point::new(4.0, 7.0));
        assert_eq!(fit.radius, 0.0);
    }

    #[test]
    fn test_fit_two_points() {
        let fit = fit_circle(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
        assert_eq!(fit.center, Point::new(2.0, 0.0));
        assert!((fit.radius - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_empty() {
        let fit = fit_circle(&[]);
        assert_eq!(fit.radius, 0.0);
    }

    #[test]
    fn test_fit_collinear_falls_back() {
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f64, 0.0)).collect();
        let fit = fit_circle(&points);
        // Centroid fallback: finite values, not NaN
        assert!(fit.center.x.is_finite());
        assert!(fit.radius.is_finite());
        assert!((fit.center.x - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_point_deviation() {
        let p = Point::new(3.0, 0.0);
        assert!((point_deviation_from_circle(&p, 0.0, 0.0, 2.0) - 1.0).abs() < 1e-9);
        assert!((point_deviation_from_circle(&p, 0.0, 0.0, 4.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rms_deviation() {
        assert_eq!(rms_deviation(&[]), 0.0);
        assert!((rms_deviation(&[3.0, 4.0]) - (12.5_f64).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_standard_deviation_population() {
        // Population stddev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((standard_deviation(&values) - 2.0).abs() < 1e-9);
        assert_eq!(standard_deviation(&[]), 0.0);
    }

    #[test]
    fn test_point_angle_quadrants() {
        use std::f64::consts::{FRAC_PI_2, PI, TAU};

        let east = point_angle_on_circle(&Point::new(1.0, 0.0), 0.0, 0.0);
        let north = point_angle_on_circle(&Point::new(0.0, 1.0), 0.0, 0.0);
        let west = point_angle_on_circle(&Point::new(-1.0, 0.0), 0.0, 0.0);
        let south = point_angle_on_circle(&Point::new(0.0, -1.0), 0.0, 0.0);

        assert!(east.abs() < 1e-9);
        assert!((north - FRAC_PI_2).abs() < 1e-9);
        assert!((west - PI).abs() < 1e-9);
        assert!((south - 3.0 * TAU / 4.0).abs() < 1e-9);
    }
}
