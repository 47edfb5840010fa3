//! Shared fixtures for lattice tests.

use std::collections::{HashMap, HashSet};

use crate::mention::Mention;
use crate::model::{EmbeddingModel, ModelError};

/// Embedding model backed by an explicit pair-similarity table.
///
/// Vocabulary membership is enforced like a real model; pairs never set
/// score 0.0.
pub(crate) struct SimilarityTable {
    labels: Vec<String>,
    vocabulary: HashSet<String>,
    scores: HashMap<(String, String), f32>,
}

impl SimilarityTable {
    pub fn new(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            vocabulary: labels.iter().map(|s| s.to_string()).collect(),
            scores: HashMap::new(),
        }
    }

    /// Set a symmetric pair score.
    pub fn set(&mut self, a: &str, b: &str, score: f32) {
        self.scores.insert((a.to_string(), b.to_string()), score);
        self.scores.insert((b.to_string(), a.to_string()), score);
    }
}

impl EmbeddingModel for SimilarityTable {
    fn contains(&self, label: &str) -> bool {
        self.vocabulary.contains(label)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, ModelError> {
        if !self.vocabulary.contains(a) {
            return Err(ModelError::MissingLabel(a.to_string()));
        }
        if !self.vocabulary.contains(b) {
            return Err(ModelError::MissingLabel(b.to_string()));
        }
        Ok(self
            .scores
            .get(&(a.to_string(), b.to_string()))
            .copied()
            .unwrap_or(0.0))
    }

    fn vocabulary(&self) -> Vec<&str> {
        self.labels.iter().map(|s| s.as_str()).collect()
    }
}

/// Mentions from `(surface, candidates)` pairs.
pub(crate) fn mentions(entries: &[(&str, &[&str])]) -> Vec<Mention> {
    entries
        .iter()
        .map(|(surface, candidates)| {
            Mention::new(
                *surface,
                candidates.iter().map(|c| c.to_string()).collect(),
            )
        })
        .collect()
}
