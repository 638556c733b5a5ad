//! Coherence checking over placed glyph sets
//!
//! Rules are declarative data, not code: contradiction pairs, chain
//! requirements and semantic categories are plain tables loaded once, so
//! the rule set can grow without touching the evaluation logic.

use crate::glyph::templates::GlyphId;
use serde::{Deserialize, Serialize};

/// Base score every glyph set starts from
pub const BASE_SCORE: f64 = 0.60;

/// Bonus for a non-empty set with no issues at all
pub const CLEAN_SET_BONUS: f64 = 0.40;

/// Penalty per contradiction pair present
pub const CONTRADICTION_PENALTY: f64 = 0.30;

/// Penalty per incomplete chain
pub const INCOMPLETE_CHAIN_PENALTY: f64 = 0.15;

/// Penalty per isolated glyph
pub const ISOLATION_PENALTY: f64 = 0.10;

/// A trigger glyph that requires at least one companion to be present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRule {
    pub trigger: GlyphId,
    pub companions: Vec<GlyphId>,
}

/// Declarative rule tables evaluated over a placed glyph set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoherenceRules {
    /// Both glyphs present ⇒ one contradiction
    pub contradictions: Vec<(GlyphId, GlyphId)>,
    /// Trigger present without any companion ⇒ one incomplete chain
    pub chains: Vec<ChainRule>,
    /// Semantic category per glyph; glyphs absent from the table are their
    /// own singleton category
    pub categories: Vec<(GlyphId, String)>,
}

/// One detected coherence problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoherenceIssue {
    Contradiction { first: GlyphId, second: GlyphId },
    IncompleteChain { trigger: GlyphId },
    Isolated { glyph: GlyphId },
}

/// Outcome of one coherence evaluation. Pure value object, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceReport {
    /// Composite coherence score in `[0, 1]`
    pub score: f64,
    pub issues: Vec<CoherenceIssue>,
}

/// Rule evaluator over the set of currently placed glyph identifiers
#[derive(Debug, Clone, Default)]
pub struct CoherenceChecker {
    rules: CoherenceRules,
}

impl CoherenceChecker {
    pub fn new(rules: CoherenceRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CoherenceRules {
        &self.rules
    }

    /// Evaluate the rule tables over a glyph set.
    ///
    /// The score starts at the base, earns the bonus only for a non-empty
    /// issue-free set, loses the per-issue penalties and is clamped to
    /// `[0, 1]`.
    pub fn evaluate(&self, glyphs: &[GlyphId]) -> CoherenceReport {
        let mut issues = Vec::new();

        for (first, second) in &self.rules.contradictions {
            if glyphs.contains(first) && glyphs.contains(second) {
                issues.push(CoherenceIssue::Contradiction {
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        }

        for chain in &self.rules.chains {
            if glyphs.contains(&chain.trigger)
                && !chain.companions.iter().any(|c| glyphs.contains(c))
            {
                issues.push(CoherenceIssue::IncompleteChain {
                    trigger: chain.trigger.clone(),
                });
            }
        }

        for glyph in glyphs {
            let category = self.category_of(glyph);
            let all_same = glyphs.iter().all(|other| self.category_of(other) == category);
            if all_same {
                issues.push(CoherenceIssue::Isolated {
                    glyph: glyph.clone(),
                });
            }
        }

        let mut score = BASE_SCORE;
        if !glyphs.is_empty() && issues.is_empty() {
            score += CLEAN_SET_BONUS;
        }
        for issue in &issues {
            score -= match issue {
                CoherenceIssue::Contradiction { .. } => CONTRADICTION_PENALTY,
                CoherenceIssue::IncompleteChain { .. } => INCOMPLETE_CHAIN_PENALTY,
                CoherenceIssue::Isolated { .. } => ISOLATION_PENALTY,
            };
        }

        CoherenceReport {
            score: score.clamp(0.0, 1.0),
            issues,
        }
    }

    /// Category from the table, or the glyph's own identifier as a
    /// singleton category
    fn category_of<'a>(&'a self, glyph: &'a GlyphId) -> &'a str {
        self.rules
            .categories
            .iter()
            .find(|(id, _)| id == glyph)
            .map(|(_, category)| category.as_str())
            .unwrap_or_else(|| glyph.as_str())
    }
}
