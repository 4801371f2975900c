// ProblemValidator: the scorer stage of the pipeline.
//
// Takes the collector's records and a problem statement, runs sentiment
// and topic analysis over the record bodies, and folds both into a
// ValidationResult.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::score::validation_score;
use super::sentiment::vader::VaderAnalyzer;
use super::sentiment::{SentimentLabel, SentimentScorer};
use super::topics::{NmfTopicExtractor, TopicExtractor, TopicSet};
use crate::collector::record::Record;
use crate::error::{describe, AnalysisError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative
    }
}

/// Outcome of validating one problem statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(rename = "problem_statement")]
    pub statement: String,
    #[serde(rename = "sentiment_analysis")]
    pub sentiment_counts: SentimentCounts,
    #[serde(rename = "topic_analysis")]
    pub topics: TopicSet,
    /// Records analyzed, blank bodies included
    #[serde(rename = "data_volume")]
    pub volume: usize,
    #[serde(rename = "validation_score")]
    pub score: f64,
}

pub struct ProblemValidator {
    scorer: Box<dyn SentimentScorer + Send + Sync>,
    topics: Box<dyn TopicExtractor + Send + Sync>,
}

impl ProblemValidator {
    /// Lexicon sentiment plus a 5-topic NMF model.
    pub fn new() -> Result<Self> {
        Ok(Self::with_parts(
            Box::new(VaderAnalyzer::new()?),
            Box::new(NmfTopicExtractor::new()?),
        ))
    }

    pub fn with_parts(
        scorer: Box<dyn SentimentScorer + Send + Sync>,
        topics: Box<dyn TopicExtractor + Send + Sync>,
    ) -> Self {
        Self { scorer, topics }
    }

    pub fn validate(
        &self,
        records: &[Record],
        statement: &str,
    ) -> Result<ValidationResult, AnalysisError> {
        let bodies: Vec<&str> = records.iter().map(|r| r.body.as_str()).collect();

        let sentiments = self
            .scorer
            .analyze(&bodies)
            .map_err(|e| AnalysisError::Sentiment(describe(&e)))?;
        let mut counts = SentimentCounts::default();
        for result in &sentiments {
            match result.label {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Negative => counts.negative += 1,
            }
        }

        let topics = self.topics.extract_or_empty(&bodies);
        let score = validation_score(counts.positive, counts.negative, topics.nonempty_count());

        info!(
            records = records.len(),
            positive = counts.positive,
            negative = counts.negative,
            topics = topics.nonempty_count(),
            score,
            "Validated problem statement"
        );

        Ok(ValidationResult {
            statement: statement.to_string(),
            sentiment_counts: counts,
            topics,
            volume: records.len(),
            score,
        })
    }
}
