//! Japanese entity disambiguation over a candidate lattice.
//!
//! Each input mention carries a set of candidate Wikipedia article names;
//! the lattice engine enumerates every consistent assignment of one article
//! per mention, scores each by summed adjacent-pair embedding similarity,
//! and returns the ranked assignments with resolved mentions.

pub mod candidates;
pub mod lattice;
mod mention;
pub mod model;

pub use lattice::{disambiguate, disambiguate_with, LinkError, LinkOptions, ScoredSequence};
pub use mention::Mention;
pub use model::EmbeddingModel;
