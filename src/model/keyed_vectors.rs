use std::collections::HashMap;

use tracing::warn;

use super::{EmbeddingModel, ModelError};

/// In-memory word2vec entity vectors.
///
/// Rows are L2-normalized at insertion, so cosine similarity reduces to a
/// dot product (gensim stores a parallel normalized matrix for the same
/// reason). Row order follows the model file, which keeps `vocabulary()`
/// deterministic.
#[derive(Debug, Clone)]
pub struct KeyedVectors {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
    /// Row-major normalized matrix, `labels.len() * dim` entries.
    vectors: Vec<f32>,
    dim: usize,
}

impl KeyedVectors {
    pub(super) fn with_capacity(count: usize, dim: usize) -> Self {
        Self {
            labels: Vec::with_capacity(count),
            positions: HashMap::with_capacity(count),
            vectors: Vec::with_capacity(count * dim),
            dim,
        }
    }

    /// Build a model from raw `(label, vector)` pairs.
    ///
    /// All vectors must share one dimensionality. Useful for tests and
    /// small hand-built vocabularies; real models come from the
    /// `load_word2vec_*` loaders.
    pub fn from_vectors(entries: Vec<(String, Vec<f32>)>) -> Result<Self, ModelError> {
        let dim = match entries.first() {
            Some((_, v)) => v.len(),
            None => 0,
        };
        let mut model = Self::with_capacity(entries.len(), dim);
        for (label, vector) in entries {
            model.push(label, &vector)?;
        }
        Ok(model)
    }

    /// Append one row, normalizing it. A duplicate label keeps the first
    /// occurrence, matching gensim's loader.
    pub(super) fn push(&mut self, label: String, vector: &[f32]) -> Result<(), ModelError> {
        if vector.len() != self.dim {
            return Err(ModelError::Parse(format!(
                "vector for {:?} has {} dimensions, expected {}",
                label,
                vector.len(),
                self.dim
            )));
        }
        if self.positions.contains_key(&label) {
            warn!(label = %label, "duplicate label in model, keeping first");
            return Ok(());
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        let row = self.labels.len();
        if norm > 0.0 {
            self.vectors.extend(vector.iter().map(|x| x / norm));
        } else {
            self.vectors.extend_from_slice(vector);
        }
        self.positions.insert(label.clone(), row);
        self.labels.push(label);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn row(&self, label: &str) -> Option<&[f32]> {
        let &pos = self.positions.get(label)?;
        Some(&self.vectors[pos * self.dim..(pos + 1) * self.dim])
    }
}

impl EmbeddingModel for KeyedVectors {
    fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, ModelError> {
        let va = self
            .row(a)
            .ok_or_else(|| ModelError::MissingLabel(a.to_string()))?;
        let vb = self
            .row(b)
            .ok_or_else(|| ModelError::MissingLabel(b.to_string()))?;
        Ok(va.iter().zip(vb).map(|(x, y)| x * y).sum())
    }

    fn vocabulary(&self) -> Vec<&str> {
        self.labels.iter().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_identical_is_one() {
        let model = KeyedVectors::from_vectors(vec![
            ("[ヤマハ]".into(), vec![3.0, 4.0]),
            ("[カワサキ]".into(), vec![4.0, 3.0]),
        ])
        .unwrap();
        let sim = model.similarity("[ヤマハ]", "[ヤマハ]").unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_orthogonal_is_zero() {
        let model = KeyedVectors::from_vectors(vec![
            ("a".into(), vec![1.0, 0.0]),
            ("b".into(), vec![0.0, 2.0]),
        ])
        .unwrap();
        assert!(model.similarity("a", "b").unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_similarity_known_angle() {
        // (3,4)·(4,3) / (5·5) = 24/25
        let model = KeyedVectors::from_vectors(vec![
            ("a".into(), vec![3.0, 4.0]),
            ("b".into(), vec![4.0, 3.0]),
        ])
        .unwrap();
        let sim = model.similarity("a", "b").unwrap();
        assert!((sim - 0.96).abs() < 1e-6);
    }

    #[test]
    fn test_missing_label_is_error() {
        let model = KeyedVectors::from_vectors(vec![("a".into(), vec![1.0])]).unwrap();
        let err = model.similarity("a", "zzz").unwrap_err();
        assert!(matches!(err, ModelError::MissingLabel(l) if l == "zzz"));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let err = KeyedVectors::from_vectors(vec![
            ("a".into(), vec![1.0, 2.0]),
            ("b".into(), vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_duplicate_label_keeps_first() {
        let model = KeyedVectors::from_vectors(vec![
            ("a".into(), vec![1.0, 0.0]),
            ("a".into(), vec![0.0, 1.0]),
            ("b".into(), vec![1.0, 0.0]),
        ])
        .unwrap();
        assert_eq!(model.len(), 2);
        let sim = model.similarity("a", "b").unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vocabulary_preserves_order() {
        let model = KeyedVectors::from_vectors(vec![
            ("x".into(), vec![1.0]),
            ("y".into(), vec![2.0]),
            ("z".into(), vec![3.0]),
        ])
        .unwrap();
        assert_eq!(model.vocabulary(), vec!["x", "y", "z"]);
    }
}
