//! Entity disambiguation via lattice construction and exhaustive route
//! scoring.
//!
//! Builds a position-indexed candidate lattice over the mention sequence,
//! scores every adjacent (source, destination) candidate pair by embedding
//! similarity, enumerates every internally consistent assignment of one
//! article per mention, and ranks the assignments by summed transition
//! score.

mod builder;
mod cache;
mod index;
mod matrix;
mod routes;
mod score;
#[cfg(test)]
pub(crate) mod testutil;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use tracing::{debug, debug_span};

use crate::mention::Mention;
use crate::model::{EmbeddingModel, ModelError};

pub use builder::{build_lattice, Lattice};
pub use index::{LatticeIndex, StateIndex, StateKey};
pub use matrix::TransitionMatrix;
pub use score::{ScoredSequence, TransitionScore};

/// Error type for the disambiguation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("input mention sequence is empty")]
    EmptyInput,

    #[error("working directory unusable: {0}")]
    WorkingDir(#[from] std::io::Error),

    /// A label reached similarity scoring despite vocabulary filtering.
    /// This is an invariant violation, not a recoverable state.
    #[error("vocabulary invariant violated at step {step}: {source}")]
    Vocabulary {
        step: usize,
        #[source]
        source: ModelError,
    },

    /// The label → position mapping failed during reconstruction.
    #[error("internal inconsistency during reconstruction: {0}")]
    Reconstruction(String),
}

/// Options for `disambiguate_with`.
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Sort results by total score, best first. The sort is stable: equal
    /// totals keep enumeration order. Off returns raw enumeration order.
    pub sort_by_score: bool,
    /// Mirror the index maps into this directory as JSON after each call.
    pub working_dir: Option<PathBuf>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            sort_by_score: true,
            working_dir: None,
        }
    }
}

/// Disambiguate a mention sequence: every consistent assignment of one
/// candidate article per mention, ranked by summed adjacent-pair
/// similarity, best first.
pub fn disambiguate(
    mentions: &[Mention],
    model: &dyn EmbeddingModel,
) -> Result<Vec<ScoredSequence>, LinkError> {
    disambiguate_with(mentions, model, &LinkOptions::default())
}

/// `disambiguate` with explicit options.
///
/// An empty input sequence is a caller error. A sequence whose mentions
/// all drop out during vocabulary filtering (or where only one survives)
/// yields `Ok` with an empty list: there are no adjacent pairs to score.
/// Results are deterministic for identical inputs and model state, with
/// or without the cache directory.
pub fn disambiguate_with(
    mentions: &[Mention],
    model: &dyn EmbeddingModel,
    options: &LinkOptions,
) -> Result<Vec<ScoredSequence>, LinkError> {
    if mentions.is_empty() {
        return Err(LinkError::EmptyInput);
    }
    let _span = debug_span!("disambiguate", mentions = mentions.len()).entered();

    let lattice = builder::build_lattice(mentions, model)?;
    if let Some(dir) = &options.working_dir {
        cache::IndexCache::open(dir)?.sync(&lattice.index)?;
    }

    let mut results = lattice.score_routes()?;
    if options.sort_by_score {
        results.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    }
    debug!(
        result_count = results.len(),
        best_score = results.first().map(|s| s.total_score)
    );
    Ok(results)
}
