use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One candidate at one sequence position.
///
/// The same key type serves two roles: as a source key it names the left
/// end of a transition (position t), as a destination key the right end
/// (position t+1). The two roles get independent dense index spaces,
/// because a candidate at position t only ever appears as a destination of
/// step t−1 and as a source of step t.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub position: usize,
    pub label: String,
}

impl StateKey {
    pub fn new(position: usize, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// Append-only bijection from state keys to dense indices.
///
/// The first key gets index 0, each later key the next integer. One index
/// spans the whole sequence, not a single adjacent pair, so matrix rows
/// and columns are globally unique across the lattice.
#[derive(Debug, Default, Clone)]
pub struct StateIndex {
    forward: HashMap<StateKey, usize>,
    inverse: Vec<StateKey>,
}

impl StateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dense index for `key`, assigning the next one on first sight.
    pub fn intern(&mut self, key: StateKey) -> usize {
        if let Some(&index) = self.forward.get(&key) {
            return index;
        }
        let index = self.inverse.len();
        self.forward.insert(key.clone(), index);
        self.inverse.push(key);
        index
    }

    pub fn get(&self, key: &StateKey) -> Option<usize> {
        self.forward.get(key).copied()
    }

    /// Inverse lookup: the key assigned to `index`.
    pub fn key(&self, index: usize) -> Option<&StateKey> {
        self.inverse.get(index)
    }

    pub fn len(&self) -> usize {
        self.inverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inverse.is_empty()
    }

    /// Keys with their indices, in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, usize)> {
        self.inverse.iter().zip(0..)
    }
}

/// Row (source) and column (destination) index spaces of one lattice.
#[derive(Debug, Default, Clone)]
pub struct LatticeIndex {
    pub rows: StateIndex,
    pub columns: StateIndex,
}
