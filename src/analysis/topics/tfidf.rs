// TF-IDF document-term matrix with document-frequency pruning.
//
// Each text is one document. Tokens are lowercase runs of two or more word
// characters with English stop words removed. Terms must occur in at least
// `min_df` documents and at most `max_df` (a fraction) of them; of those,
// the `max_features` most frequent across the corpus form the vocabulary.
// Rows are L2-normalized so long comments don't dominate the factorization.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use ndarray::Array2;
use regex_lite::Regex;

use super::stop_words;
use crate::error::AnalysisError;

/// A fitted TF-IDF matrix: documents × terms, columns in `terms` order.
#[derive(Debug, Clone)]
pub struct DocumentTermMatrix {
    pub matrix: Array2<f64>,
    /// Vocabulary in column order (alphabetical)
    pub terms: Vec<String>,
}

pub struct TfIdfVectorizer {
    pub max_features: usize,
    /// Minimum number of documents a term must appear in
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in
    pub max_df: f64,
    stop_words: HashSet<String>,
    token_pattern: Regex,
}

impl TfIdfVectorizer {
    /// English vectorizer: 1000 features, min_df 2, max_df 0.95.
    pub fn english() -> Result<Self> {
        Ok(Self {
            max_features: 1000,
            min_df: 2,
            max_df: 0.95,
            stop_words: stop_words::ENGLISH.iter().map(|w| w.to_string()).collect(),
            token_pattern: Regex::new(r"\b\w\w+\b").context("Invalid token pattern")?,
        })
    }

    /// Lowercase, split into word tokens, drop stop words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.token_pattern
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }

    /// Build the vocabulary from `docs` and return their TF-IDF matrix.
    pub fn fit_transform(&self, docs: &[&str]) -> Result<DocumentTermMatrix, AnalysisError> {
        if docs.is_empty() {
            return Err(AnalysisError::Vectorize("no documents".to_string()));
        }

        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| self.tokenize(d)).collect();

        // Corpus-wide count and document frequency per term
        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &tokenized {
            let mut in_doc: HashSet<&str> = HashSet::new();
            for token in doc {
                *term_counts.entry(token.as_str()).or_insert(0) += 1;
                if in_doc.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        if doc_freq.is_empty() {
            return Err(AnalysisError::Vectorize(
                "empty vocabulary; documents may only contain stop words".to_string(),
            ));
        }

        let n_docs = docs.len();
        let max_doc_count = self.max_df * n_docs as f64;
        if max_doc_count < self.min_df as f64 {
            return Err(AnalysisError::Vectorize(format!(
                "max_df admits {max_doc_count:.2} documents, fewer than min_df {}",
                self.min_df
            )));
        }

        let mut kept: Vec<(&str, usize)> = doc_freq
            .iter()
            .filter(|(_, df)| **df >= self.min_df && (**df as f64) <= max_doc_count)
            .map(|(term, _)| (*term, term_counts[term]))
            .collect();

        if kept.is_empty() {
            return Err(AnalysisError::Vectorize(
                "no terms remain after document-frequency pruning".to_string(),
            ));
        }

        // Most frequent first, alphabetical among ties, then cap
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        kept.truncate(self.max_features);

        let mut terms: Vec<String> = kept.iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();
        let columns: HashMap<&str, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        // Smooth idf: ln((1 + n) / (1 + df)) + 1
        let idf: Vec<f64> = terms
            .iter()
            .map(|t| {
                let df = doc_freq[t.as_str()] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let mut matrix = Array2::<f64>::zeros((n_docs, terms.len()));
        for (row, doc) in tokenized.iter().enumerate() {
            for token in doc {
                if let Some(&col) = columns.get(token.as_str()) {
                    matrix[[row, col]] += 1.0;
                }
            }
            for col in 0..terms.len() {
                matrix[[row, col]] *= idf[col];
            }
            let norm = matrix.row(row).iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                matrix.row_mut(row).mapv_inplace(|v| v / norm);
            }
        }

        Ok(DocumentTermMatrix { matrix, terms })
    }
}
