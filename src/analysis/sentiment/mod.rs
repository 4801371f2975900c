// Sentiment scoring behind a trait so the lexicon analyzer can be swapped.
//
// The SentimentScorer trait yields raw polarity scores; label_for turns a
// compound score into the POSITIVE/NEGATIVE label the validator counts.

pub mod lexicon;
pub mod vader;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Polarity sub-scores for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Proportion of negative content (0..1)
    pub neg: f64,
    /// Proportion of neutral content (0..1)
    pub neu: f64,
    /// Proportion of positive content (0..1)
    pub pos: f64,
    /// Normalized overall polarity (-1..1)
    pub compound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

/// The labeled sentiment of one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Strength of the label: |compound|, in [0, 1]
    pub score: f64,
    #[serde(rename = "details")]
    pub raw: PolarityScores,
}

/// Label a compound score. Only strictly positive scores are POSITIVE;
/// a compound of exactly zero counts as NEGATIVE.
pub fn label_for(compound: f64) -> SentimentLabel {
    if compound > 0.0 {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Negative
    }
}

impl SentimentResult {
    pub fn from_scores(raw: PolarityScores) -> Self {
        Self {
            label: label_for(raw.compound),
            score: raw.compound.abs(),
            raw,
        }
    }
}

/// Trait for producing polarity scores from text.
pub trait SentimentScorer {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores>;

    /// Label every non-blank text, in order. Blank texts are skipped, not
    /// scored as zero.
    fn analyze(&self, texts: &[&str]) -> Result<Vec<SentimentResult>> {
        texts
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| self.polarity_scores(t).map(SentimentResult::from_scores))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_compound_is_negative() {
        assert_eq!(label_for(0.0), SentimentLabel::Negative);
    }

    #[test]
    fn tiny_positive_is_positive() {
        assert_eq!(label_for(0.0001), SentimentLabel::Positive);
    }

    #[test]
    fn score_is_absolute_compound() {
        let result = SentimentResult::from_scores(PolarityScores {
            neg: 0.6,
            neu: 0.4,
            pos: 0.0,
            compound: -0.42,
        });
        assert_eq!(result.label, SentimentLabel::Negative);
        assert_eq!(result.score, 0.42);
    }

    #[test]
    fn label_serializes_uppercase() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
    }
}
