//! Entity-vector model access.
//!
//! `KeyedVectors` holds pretrained word2vec entity vectors in memory, loaded
//! from the standard text or binary format. The lattice engine only needs
//! vocabulary membership and pairwise similarity, expressed by the
//! `EmbeddingModel` trait so callers can plug in other vector backends.

mod io;
mod keyed_vectors;

pub use keyed_vectors::KeyedVectors;

use std::io::Error as IoError;
use std::path::PathBuf;

/// Error type for model loading and similarity lookups.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid model header: {0}")]
    InvalidHeader(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("label not in vocabulary: {0}")]
    MissingLabel(String),
}

/// Vocabulary membership and pairwise similarity over article names.
pub trait EmbeddingModel: Send + Sync {
    /// Whether `label` has a vector in the model.
    fn contains(&self, label: &str) -> bool;

    /// Similarity between the vectors of two article names.
    ///
    /// Fails with `ModelError::MissingLabel` if either label is absent;
    /// the lattice builder filters candidates beforehand, so a failure
    /// during scoring is an invariant violation, not a recoverable state.
    fn similarity(&self, a: &str, b: &str) -> Result<f32, ModelError>;

    /// All article names known to the model.
    fn vocabulary(&self) -> Vec<&str>;
}
