use std::collections::HashMap;

use super::{CandidateSource, SourceError};

/// In-memory candidate table: token → candidate article names.
#[derive(Debug, Default, Clone)]
pub struct StaticCandidateSource {
    table: HashMap<String, Vec<String>>,
}

impl StaticCandidateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, candidates: Vec<String>) {
        self.table.insert(token.into(), candidates);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for StaticCandidateSource {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}

impl CandidateSource for StaticCandidateSource {
    fn candidates(&self, token: &str) -> Result<Vec<String>, SourceError> {
        Ok(self.table.get(token).cloned().unwrap_or_default())
    }
}
