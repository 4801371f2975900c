// Topic discovery: TF-IDF vectorization followed by NMF.
//
// The TopicExtractor trait keeps the modelling approach swappable; the
// default NmfTopicExtractor mirrors a classic bag-of-words topic model.

pub mod nmf;
pub mod stop_words;
pub mod tfidf;

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AnalysisError;
use nmf::{top_indices, Nmf};
use tfidf::TfIdfVectorizer;

/// Discovered topics and how strongly each document expresses them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicSet {
    /// "topic_1".."topic_k" → top terms, strongest first
    pub topics: BTreeMap<String, Vec<String>>,
    /// One row per document, one column per topic
    #[serde(rename = "document_topic_matrix")]
    pub document_topic_weights: Vec<Vec<f64>>,
}

impl TopicSet {
    /// No topics. Returned whenever the corpus can't support a model.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Topics with at least one term.
    pub fn nonempty_count(&self) -> usize {
        self.topics.values().filter(|terms| !terms.is_empty()).count()
    }
}

/// Trait for discovering latent topics in a batch of texts.
pub trait TopicExtractor {
    fn extract(&self, texts: &[&str]) -> Result<TopicSet, AnalysisError>;

    /// Like `extract`, but a corpus too small or uniform to model yields
    /// an empty TopicSet instead of an error.
    fn extract_or_empty(&self, texts: &[&str]) -> TopicSet {
        match self.extract(texts) {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, documents = texts.len(), "Topic extraction failed, reporting no topics");
                TopicSet::empty()
            }
        }
    }
}

/// TF-IDF + NMF extractor: 5 topics of 9 terms each by default.
pub struct NmfTopicExtractor {
    vectorizer: TfIdfVectorizer,
    nmf: Nmf,
    /// Terms reported per topic
    pub terms_per_topic: usize,
}

impl NmfTopicExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            vectorizer: TfIdfVectorizer::english()?,
            nmf: Nmf::default(),
            terms_per_topic: 9,
        })
    }

    pub fn with_components(mut self, n_components: usize) -> Self {
        self.nmf.n_components = n_components;
        self
    }
}

impl TopicExtractor for NmfTopicExtractor {
    fn extract(&self, texts: &[&str]) -> Result<TopicSet, AnalysisError> {
        let docs: Vec<&str> = texts
            .iter()
            .copied()
            .filter(|t| !t.trim().is_empty())
            .collect();

        let dtm = self.vectorizer.fit_transform(&docs)?;
        let factorization = self.nmf.fit_transform(&dtm.matrix)?;

        debug!(
            documents = docs.len(),
            terms = dtm.terms.len(),
            iterations = factorization.n_iter,
            error = factorization.reconstruction_err,
            "Fitted topic model"
        );

        let topics = factorization
            .h
            .rows()
            .into_iter()
            .enumerate()
            .map(|(k, row)| {
                let weights: Vec<f64> = row.to_vec();
                let terms = top_indices(&weights, self.terms_per_topic)
                    .into_iter()
                    .map(|col| dtm.terms[col].clone())
                    .collect();
                (format!("topic_{}", k + 1), terms)
            })
            .collect();

        let document_topic_weights = factorization
            .w
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();

        Ok(TopicSet {
            topics,
            document_topic_weights,
        })
    }
}
