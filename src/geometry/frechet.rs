//! Discrete Fréchet distance
//!
//! The governing metric for "does this freehand path trace that canonical
//! path". Unlike pointwise RMS it tolerates speed variation along the path
//! while still penalizing spatial deviation.

use crate::capture::types::Point;

/// Classic dynamic-programming discrete Fréchet distance between two point
/// sequences, using Euclidean inter-point distance as the base metric.
///
/// The sequences may differ in length. Returns 0 if either input is empty.
pub fn discrete_frechet_distance(a: &[Point], b: &[Point]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let n = a.len();
    let m = b.len();
    let mut ca = vec![vec![0.0_f64; m]; n];

    for i in 0..n {
        for j in 0..m {
            let d = a[i].distance_to(&b[j]);
            ca[i][j] = if i == 0 && j == 0 {
                d
            } else if i == 0 {
                ca[0][j - 1].max(d)
            } else if j == 0 {
                ca[i - 1][0].max(d)
            } else {
                let reach = ca[i - 1][j].min(ca[i - 1][j - 1]).min(ca[i][j - 1]);
                reach.max(d)
            };
        }
    }

    ca[n - 1][m - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_paths_distance_zero() {
        let path: Vec<Point> = (0..10)
            .map(|i| Point::new(i as f64, (i as f64).sin()))
            .collect();
        assert!(discrete_frechet_distance(&path, &path) < 1e-12);
    }

    #[test]
    fn test_parallel_lines_distance_is_offset() {
        let a: Vec<Point> = (0..20).map(|i| Point::new(i as f64, 0.0)).collect();
        let b: Vec<Point> = (0..20).map(|i| Point::new(i as f64, 3.0)).collect();
        assert!((discrete_frechet_distance(&a, &b) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unequal_lengths() {
        // Same segment at double sampling density: the half-step points sit
        // 0.5 from their nearest coarse sample, and no coupling does better.
        let a: Vec<Point> = (0..=20).map(|i| Point::new(i as f64 * 0.5, 0.0)).collect();
        let b: Vec<Point> = (0..=10).map(|i| Point::new(i as f64, 0.0)).collect();
        assert!((discrete_frechet_distance(&a, &b) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let path = vec![Point::new(1.0, 2.0)];
        assert_eq!(discrete_frechet_distance(&[], &path), 0.0);
        assert_eq!(discrete_frechet_distance(&path, &[]), 0.0);
        assert_eq!(discrete_frechet_distance(&[], &[]), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 2.0),
            Point::new(9.0, -1.0),
        ];
        let b = vec![
            Point::new(0.5, 0.5),
            Point::new(4.0, 3.0),
            Point::new(8.5, 0.0),
        ];
        let d1 = discrete_frechet_distance(&a, &b);
        let d2 = discrete_frechet_distance(&b, &a);
        assert!((d1 - d2).abs() < 1e-12);
    }

    #[test]
    fn test_speed_variation_tolerated() {
        // A path that dwells (repeats samples) still couples perfectly with
        // its steady counterpart, where pointwise RMS would blow up.
        let steady: Vec<Point> = (0..=10).map(|i| Point::new(i as f64, 0.0)).collect();
        let dwelling: Vec<Point> = steady.iter().flat_map(|p| [*p, *p, *p]).collect();
        assert!(discrete_frechet_distance(&steady, &dwelling) < 1e-12);
    }
}
