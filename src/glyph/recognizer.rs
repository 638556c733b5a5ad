//! Glyph recognition via Procrustes alignment
//!
//! Candidate templates are gated by stroke count and structural invariants,
//! then scored by residual shape difference after optimal translation,
//! uniform scaling and rotation.

use crate::capture::types::{Point, StrokeResult};
use crate::geometry::path::{normalize_to_unit_space, resample};
use crate::geometry::predicates::{is_closed, self_intersects, signed_area};
use crate::glyph::templates::{GlyphId, GlyphTemplate, WindingDirection};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Point count both shapes are resampled to before alignment
pub const RESAMPLE_POINTS: usize = 32;

/// Closure ratio used for glyph structural invariants
pub const GLYPH_CLOSURE_RATIO: f64 = 0.20;

/// Minimum simplified points for a stroke to carry shape information
pub const MIN_STROKE_POINTS: usize = 3;

/// How many near-misses are surfaced alongside a recognition
pub const ALTERNATE_COUNT: usize = 3;

/// Recognition difficulty preset.
///
/// Swappable at runtime without re-instantiating the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Generous residual scaling and a low acceptance bar
    Lenient,
    #[default]
    Standard,
    /// Tight residual scaling; only close traces are accepted
    Strict,
}

impl Difficulty {
    /// Multiplier applied to the aligned RMSD before conversion to confidence
    pub fn strictness(&self) -> f64 {
        match self {
            Difficulty::Lenient => 1.5,
            Difficulty::Standard => 2.0,
            Difficulty::Strict => 2.5,
        }
    }

    /// Minimum confidence for the top candidate to be accepted
    pub fn threshold(&self) -> f64 {
        match self {
            Difficulty::Lenient => 0.40,
            Difficulty::Standard => 0.55,
            Difficulty::Strict => 0.70,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "lenient" => Ok(Difficulty::Lenient),
            "standard" => Ok(Difficulty::Standard),
            "strict" => Ok(Difficulty::Strict),
            other => Err(crate::Error::Config(format!(
                "unknown difficulty '{other}', expected lenient|standard|strict"
            ))),
        }
    }
}

/// A scored recognition candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphCandidate {
    pub id: GlyphId,
    pub confidence: f64,
}

/// Outcome of one recognition pass. Pure value object, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphResult {
    /// Accepted glyph, if the top candidate cleared the threshold
    pub recognized: Option<GlyphId>,
    /// Confidence of the accepted glyph; 0 when nothing was recognized
    pub confidence: f64,
    /// Top runners-up (or near-misses when nothing was accepted)
    pub alternates: Vec<GlyphCandidate>,
}

impl GlyphResult {
    /// The neutral result for empty or undersized input
    pub fn none() -> Self {
        Self {
            recognized: None,
            confidence: 0.0,
            alternates: Vec::new(),
        }
    }
}

/// Template prepared for matching: canonical path normalized and resampled
#[derive(Debug, Clone)]
struct PreparedTemplate {
    template: GlyphTemplate,
    canonical: Vec<Point>,
}

/// Procrustes-based glyph matcher
#[derive(Debug, Clone)]
pub struct GlyphRecognizer {
    templates: Vec<PreparedTemplate>,
    difficulty: Difficulty,
}

impl GlyphRecognizer {
    pub fn new(templates: Vec<GlyphTemplate>, difficulty: Difficulty) -> Self {
        let templates = templates
            .into_iter()
            .map(|template| PreparedTemplate {
                canonical: resample(&normalize_to_unit_space(&template.path), RESAMPLE_POINTS),
                template,
            })
            .collect();
        Self {
            templates,
            difficulty,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Swap the difficulty preset without rebuilding prepared templates
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Recognize the glyph drawn by one or more strokes.
    ///
    /// Empty input, or input in which every stroke has fewer than three
    /// simplified points, yields the neutral result.
    pub fn recognize(&self, strokes: &[StrokeResult]) -> GlyphResult {
        if strokes.is_empty()
            || strokes
                .iter()
                .all(|s| s.simplified.len() < MIN_STROKE_POINTS)
        {
            return GlyphResult::none();
        }

        let combined: Vec<Point> = strokes
            .iter()
            .flat_map(|s| s.simplified.iter().copied())
            .collect();
        let normalized = normalize_to_unit_space(&combined);
        let drawn = resample(&normalized, RESAMPLE_POINTS);

        let mut candidates: Vec<GlyphCandidate> = self
            .templates
            .iter()
            .filter(|prepared| {
                stroke_count_compatible(prepared.template.required_strokes, strokes.len())
                    && invariants_hold(&prepared.template, &normalized)
            })
            .map(|prepared| GlyphCandidate {
                id: prepared.template.id.clone(),
                confidence: procrustes_confidence(
                    &drawn,
                    &prepared.canonical,
                    self.difficulty.strictness(),
                ),
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let threshold = self.difficulty.threshold();
        match candidates.first() {
            Some(top) if top.confidence >= threshold => {
                debug!(glyph = %top.id, confidence = top.confidence, "glyph recognized");
                GlyphResult {
                    recognized: Some(top.id.clone()),
                    confidence: top.confidence,
                    alternates: candidates[1..]
                        .iter()
                        .take(ALTERNATE_COUNT)
                        .cloned()
                        .collect(),
                }
            }
            _ => {
                debug!(
                    near_misses = candidates.len().min(ALTERNATE_COUNT),
                    "no glyph cleared the threshold"
                );
                GlyphResult {
                    recognized: None,
                    confidence: 0.0,
                    alternates: candidates.into_iter().take(ALTERNATE_COUNT).collect(),
                }
            }
        }
    }
}

/// Templates whose stroke count differs from the input by more than one are
/// not plausible matches
fn stroke_count_compatible(required: usize, drawn: usize) -> bool {
    required.abs_diff(drawn) <= 1
}

/// Check a template's structural invariants against the combined stroke
fn invariants_hold(template: &GlyphTemplate, combined: &[Point]) -> bool {
    let invariants = &template.invariants;

    if let Some(required) = invariants.closed {
        if is_closed(combined, GLYPH_CLOSURE_RATIO) != required {
            return false;
        }
    }

    if let Some(required) = invariants.self_intersecting {
        if self_intersects(combined) != required {
            return false;
        }
    }

    if let Some(required) = invariants.winding {
        let area = signed_area(combined);
        let actual = if area >= 0.0 {
            WindingDirection::CounterClockwise
        } else {
            WindingDirection::Clockwise
        };
        if actual != required {
            return false;
        }
    }

    true
}

/// Residual shape difference after Procrustes alignment, converted to a
/// confidence via `max(0, 1 − rmsd × strictness)`.
///
/// Both point sets are centered on their centroid and scaled to unit RMS
/// radius; the optimal rotation comes in closed form from the 2×2
/// cross-covariance matrix.
fn procrustes_confidence(drawn: &[Point], canonical: &[Point], strictness: f64) -> f64 {
    debug_assert_eq!(drawn.len(), canonical.len());

    let a = center_and_scale(drawn);
    let b = center_and_scale(canonical);

    let mut h00 = 0.0;
    let mut h01 = 0.0;
    let mut h10 = 0.0;
    let mut h11 = 0.0;
    for (p, q) in a.iter().zip(&b) {
        h00 += p.x * q.x;
        h01 += p.y * q.x;
        h10 += p.x * q.y;
        h11 += p.y * q.y;
    }

    let angle = (h10 - h01).atan2(h00 + h11);
    let (sin, cos) = angle.sin_cos();

    let mut sq_sum = 0.0;
    for (p, q) in a.iter().zip(&b) {
        let rx = p.x * cos - p.y * sin;
        let ry = p.x * sin + p.y * cos;
        let dx = rx - q.x;
        let dy = ry - q.y;
        sq_sum += dx * dx + dy * dy;
    }

    let rmsd = (sq_sum / a.len() as f64).sqrt();
    (1.0 - rmsd * strictness).max(0.0)
}

/// Center a point set on its centroid and scale to unit RMS radius
fn center_and_scale(points: &[Point]) -> Vec<Point> {
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;

    let rms = (points
        .iter()
        .map(|p| {
            let dx = p.x - cx;
            let dy = p.y - cy;
            dx * dx + dy * dy
        })
        .sum::<f64>()
        / n)
        .sqrt();

    let scale = if rms > 0.0 { 1.0 / rms } else { 1.0 };
    points
        .iter()
        .map(|p| Point::new((p.x - cx) * scale, (p.y - cy) * scale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::stroke::StrokeEvaluator;
    use crate::capture::types::PointerInputEvent;
    use crate::glyph::library;

    fn stroke_from_points(points: &[Point]) -> StrokeResult {
        let mut evaluator = StrokeEvaluator::new();
        for (i, p) in points.iter().enumerate() {
            // Scale up so simplification keeps the shape
            evaluator.push(PointerInputEvent::new(
                p.x * 400.0,
                p.y * 400.0,
                0.5,
                i as f64 * 12.0,
                0,
            ));
        }
        evaluator.finalize()
    }

    fn recognizer(difficulty: Difficulty) -> GlyphRecognizer {
        GlyphRecognizer::new(library::all(), difficulty)
    }

    #[test]
    fn test_empty_input_no_recognition() {
        let result = recognizer(Difficulty::Standard).recognize(&[]);
        assert!(result.recognized.is_none());
        assert_eq!(result.confidence, 0.0);
        assert!(result.alternates.is_empty());
    }

    #[test]
    fn test_undersized_strokes_no_recognition() {
        let stroke = stroke_from_points(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(stroke.simplified.len() < MIN_STROKE_POINTS);

        let result = recognizer(Difficulty::Standard).recognize(&[stroke]);
        assert!(result.recognized.is_none());
    }

    #[test]
    fn test_self_recognition_round_trip() {
        for difficulty in [Difficulty::Lenient, Difficulty::Standard, Difficulty::Strict] {
            let recognizer = recognizer(difficulty);
            for template in library::all() {
                let stroke = stroke_from_points(&template.path);
                let result = recognizer.recognize(&[stroke]);
                assert_eq!(
                    result.recognized.as_ref(),
                    Some(&template.id),
                    "template '{}' failed self-recognition at {difficulty:?}",
                    template.id
                );
                assert!(result.confidence >= difficulty.threshold());
            }
        }
    }

    #[test]
    fn test_scaled_translated_copy_recognizes() {
        let recognizer = recognizer(Difficulty::Standard);
        let template = library::lookup("twin-serpent").expect("built-in");

        let transformed: Vec<Point> = template
            .path
            .iter()
            .map(|p| Point::new(p.x * 3.0 + 40.0, p.y * 3.0 + 17.0))
            .collect();
        let result = recognizer.recognize(&[stroke_from_points(&transformed)]);
        assert_eq!(result.recognized, Some(template.id.clone()));
    }

    #[test]
    fn test_gibberish_reports_near_misses() {
        let recognizer = recognizer(Difficulty::Strict);
        // A tight zigzag resembling no template
        let points: Vec<Point> = (0..12)
            .map(|i| Point::new(i as f64 * 0.08, if i % 2 == 0 { 0.0 } else { 1.0 }))
            .collect();
        let result = recognizer.recognize(&[stroke_from_points(&points)]);

        assert!(result.recognized.is_none());
        assert_eq!(result.confidence, 0.0);
        assert!(result.alternates.len() <= ALTERNATE_COUNT);
    }

    #[test]
    fn test_difficulty_swappable_at_runtime() {
        let mut recognizer = recognizer(Difficulty::Lenient);
        assert_eq!(recognizer.difficulty(), Difficulty::Lenient);

        recognizer.set_difficulty(Difficulty::Strict);
        assert_eq!(recognizer.difficulty(), Difficulty::Strict);
        assert_eq!(recognizer.difficulty().strictness(), 2.5);
    }

    #[test]
    fn test_stroke_count_gate() {
        assert!(stroke_count_compatible(1, 1));
        assert!(stroke_count_compatible(2, 1));
        assert!(stroke_count_compatible(1, 2));
        assert!(!stroke_count_compatible(3, 1));
    }

    #[test]
    fn test_procrustes_rotation_invariant() {
        let shape: Vec<Point> = (0..32)
            .map(|i| {
                let t = i as f64 / 31.0;
                Point::new(t, (t * std::f64::consts::TAU).sin() * 0.3)
            })
            .collect();

        let angle: f64 = 0.7;
        let rotated: Vec<Point> = shape
            .iter()
            .map(|p| {
                Point::new(
                    p.x * angle.cos() - p.y * angle.sin(),
                    p.x * angle.sin() + p.y * angle.cos(),
                )
            })
            .collect();

        let confidence = procrustes_confidence(&rotated, &shape, 2.0);
        assert!(confidence > 0.99, "confidence was {confidence}");
    }
}
