//! Score-to-grade classification.
//!
//! Maps a continuous catalog score (nominally 0–5) onto one of five letter
//! grades. The policy is a fixed set of lower-inclusive thresholds:
//!
//!   - score >= 4.7  → A / GREAT
//!   - score >= 4.2  → B / GOOD
//!   - score >= 3.5  → C / FAIR
//!   - score >= 2.5  → D / POOR
//!   - otherwise     → F / FAIL
//!
//! The bands partition the real line, so every score maps to exactly one
//! grade, including values outside the nominal range.

use serde::{Deserialize, Serialize};

/// Score assumed when the catalog entry carries no rating.
pub const DEFAULT_SCORE: f64 = 4.5;

/// Letter grade, ordered best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Lower bound of each band, best grade first.
const THRESHOLDS: [(f64, Grade); 4] = [
    (4.7, Grade::A),
    (4.2, Grade::B),
    (3.5, Grade::C),
    (2.5, Grade::D),
];

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn letter(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "GREAT",
            Grade::B => "GOOD",
            Grade::C => "FAIR",
            Grade::D => "POOR",
            Grade::F => "FAIL",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

/// Classifies a score into its grade band.
///
/// NaN compares false against every threshold and lands in `F`.
pub fn classify(score: f64) -> Grade {
    THRESHOLDS
        .iter()
        .find(|(lower, _)| score >= *lower)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

/// Classifies an optional score, substituting [`DEFAULT_SCORE`] when absent.
pub fn classify_score(score: Option<f64>) -> Grade {
    classify(score.unwrap_or(DEFAULT_SCORE))
}
