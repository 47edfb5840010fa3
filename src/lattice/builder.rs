use std::collections::HashMap;

use tracing::{debug, debug_span, warn};

use crate::mention::Mention;
use crate::model::EmbeddingModel;

use super::index::{LatticeIndex, StateKey};
use super::matrix::TransitionMatrix;
use super::LinkError;

/// Matrix coordinates of one (source, destination) candidate pair at a
/// single adjacent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Edge {
    pub row: usize,
    pub column: usize,
}

/// The populated lattice over one mention sequence.
///
/// Holds the row/column index spaces, the sparse score matrix, one edge
/// group per adjacent step, and the surviving mentions together with a
/// label → positions multimap used during reconstruction (the same article
/// name may be a candidate at several positions).
pub struct Lattice {
    pub(super) index: LatticeIndex,
    pub(super) matrix: TransitionMatrix,
    pub(super) edge_groups: Vec<Vec<Edge>>,
    pub(super) mentions: Vec<Mention>,
    pub(super) label_positions: HashMap<String, Vec<usize>>,
}

impl Lattice {
    /// The mentions that survived vocabulary filtering, in sequence order.
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }
}

/// Drop candidates absent from the model vocabulary, then drop mentions
/// left with no candidates at all. The sequence closes around a dropped
/// mention; its neighbors become adjacent.
pub(super) fn filter_in_vocabulary(
    mentions: Vec<Mention>,
    model: &dyn EmbeddingModel,
) -> Vec<Mention> {
    let mut surviving = Vec::with_capacity(mentions.len());
    for mut mention in mentions {
        mention.candidates.retain(|label| {
            let known = model.contains(label);
            if !known {
                warn!(label = %label, surface = %mention.surface, "out of vocabulary, removing candidate");
            }
            known
        });
        if mention.candidates.is_empty() {
            warn!(surface = %mention.surface, "no in-vocabulary candidates, dropping mention");
        } else {
            surviving.push(mention);
        }
    }
    surviving
}

/// Build the lattice: filter the mentions, then for every adjacent step
/// register the full cross product of (source, destination) candidate
/// pairs, score each pair, and group its edges.
///
/// A similarity failure here is an invariant violation — filtering already
/// removed everything outside the vocabulary — and is surfaced as fatal
/// with the step and label attached.
pub fn build_lattice(
    mentions: &[Mention],
    model: &dyn EmbeddingModel,
) -> Result<Lattice, LinkError> {
    let mentions = filter_in_vocabulary(mentions.to_vec(), model);
    let _span = debug_span!("build_lattice", mentions = mentions.len()).entered();

    let mut index = LatticeIndex::default();
    let mut matrix = TransitionMatrix::new();
    let step_count = mentions.len().saturating_sub(1);
    let mut edge_groups: Vec<Vec<Edge>> = Vec::with_capacity(step_count);

    for step in 0..step_count {
        let sources = &mentions[step].candidates;
        let destinations = &mentions[step + 1].candidates;
        let mut group = Vec::with_capacity(sources.len() * destinations.len());
        for source in sources {
            for destination in destinations {
                let row = index.rows.intern(StateKey::new(step, source.as_str()));
                let column = index
                    .columns
                    .intern(StateKey::new(step + 1, destination.as_str()));
                let score = model
                    .similarity(source, destination)
                    .map_err(|err| LinkError::Vocabulary { step, source: err })?;
                matrix.set(row, column, score);
                group.push(Edge { row, column });
            }
        }
        edge_groups.push(group);
    }

    let mut label_positions: HashMap<String, Vec<usize>> = HashMap::new();
    for (position, mention) in mentions.iter().enumerate() {
        for label in &mention.candidates {
            label_positions.entry(label.clone()).or_default().push(position);
        }
    }

    debug!(
        rows = index.rows.len(),
        columns = index.columns.len(),
        entries = matrix.len(),
        steps = edge_groups.len()
    );
    Ok(Lattice {
        index,
        matrix,
        edge_groups,
        mentions,
        label_positions,
    })
}
