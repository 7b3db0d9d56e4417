//! Claim levels L0–L5: a fixed decision table over test results.
//!
//! | level | requires                                                        |
//! |-------|-----------------------------------------------------------------|
//! | L0    | floor: beats the `random` null only, or nothing                 |
//! | L1    | significant against `word_perm` under the default metric        |
//! | L2    | L1 and robust (significant under every tested metric)           |
//! | L3    | L2 and smallest effect > 0.01 bits/char                         |
//! | L4    | L3 and length scale strictly beyond WORD-SCALE                  |
//! | L5    | L4 and the effect is absent or markedly weaker in other corpora |
//!
//! Nothing below L3 is reportable as a finding.

use serde::Serialize;

use crate::executor::{MEANINGFUL_EFFECT, TestResult};
use crate::length_scale::{LengthScaleCurve, ScaleClass};
use crate::nulls::WORD_PERM;

/// An effect elsewhere counts as "markedly weaker" at or below this fraction
/// of the target effect.
pub const MARKEDLY_WEAKER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ClaimLevel {
    L0,
    L1,
    L2,
    L3,
    L4,
    L5,
}

impl ClaimLevel {
    /// Only L3 and above may be reported as a structure claim.
    pub fn is_reportable(&self) -> bool {
        *self >= Self::L3
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::L0 => "L0: does not beat the word-permutation null",
            Self::L1 => "L1: beats word permutation under the default compressor only",
            Self::L2 => "L2: beats word permutation across all compressors, effect too small",
            Self::L3 => "L3: robust cross-word structure with a meaningful effect size",
            Self::L4 => "L4: robust structure extending beyond word scale",
            Self::L5 => "L5: robust long-scale structure specific to this corpus",
        }
    }
}

impl std::fmt::Display for ClaimLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Effect of the same encoding on another corpus.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusEffect {
    pub corpus: String,
    pub effect_bits_per_char: f64,
    pub significant: bool,
}

/// Cross-corpus comparison, supplied by a collaborator or built from results.
#[derive(Debug, Clone, Serialize)]
pub struct CrossCorpusComparison {
    pub target_corpus: String,
    pub target_effect: f64,
    pub others: Vec<CorpusEffect>,
}

impl CrossCorpusComparison {
    /// Use the smallest effect and the robust flag of each result.
    pub fn from_results(target: &TestResult, others: &[TestResult]) -> Self {
        Self {
            target_corpus: target.spec.corpus.clone(),
            target_effect: target.smallest_effect(),
            others: others
                .iter()
                .map(|r| CorpusEffect {
                    corpus: r.spec.corpus.clone(),
                    effect_bits_per_char: r.smallest_effect(),
                    significant: r.robust,
                })
                .collect(),
        }
    }

    /// True when at least one other corpus was compared and in every one the
    /// effect is either not significant or at most half the target effect.
    pub fn is_corpus_specific(&self) -> bool {
        if self.others.is_empty() || !(self.target_effect > 0.0) {
            return false;
        }
        self.others.iter().all(|o| {
            !o.significant || o.effect_bits_per_char <= MARKEDLY_WEAKER * self.target_effect
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimAssessment {
    pub level: ClaimLevel,
    pub reportable: bool,
    pub message: &'static str,
    /// `None` when no length-scale curve was supplied.
    pub scale: Option<ScaleClass>,
    /// `None` when no cross-corpus comparison was supplied.
    pub corpus_specific: Option<bool>,
}

/// Level from a single result; length scale and cross-corpus are "not assessed".
pub fn classify(result: &TestResult) -> ClaimLevel {
    classify_with(result, None, None)
}

pub fn classify_with(
    result: &TestResult,
    curve: Option<&LengthScaleCurve>,
    cross_corpus: Option<&CrossCorpusComparison>,
) -> ClaimLevel {
    let beats_word_perm = result.spec.null == WORD_PERM
        && !result.is_degenerate()
        && result.default_outcome().is_some_and(|o| o.significant);
    if !beats_word_perm {
        return ClaimLevel::L0;
    }
    if !result.robust {
        return ClaimLevel::L1;
    }
    if !(result.smallest_effect() > MEANINGFUL_EFFECT) {
        return ClaimLevel::L2;
    }
    if !curve.is_some_and(|c| c.scale > ScaleClass::WordScale) {
        return ClaimLevel::L3;
    }
    if !cross_corpus.is_some_and(|c| c.is_corpus_specific()) {
        return ClaimLevel::L4;
    }
    ClaimLevel::L5
}

pub fn assess(
    result: &TestResult,
    curve: Option<&LengthScaleCurve>,
    cross_corpus: Option<&CrossCorpusComparison>,
) -> ClaimAssessment {
    let level = classify_with(result, curve, cross_corpus);
    ClaimAssessment {
        level,
        reportable: level.is_reportable(),
        message: level.message(),
        scale: curve.map(|c| c.scale),
        corpus_specific: cross_corpus.map(|c| c.is_corpus_specific()),
    }
}
