use serde::{Deserialize, Serialize};

/// One slot of the input sequence: a surface token with its candidate
/// Wikipedia article names.
///
/// `candidates` is ordered and duplicate-free within one mention; the same
/// article name may appear in several mentions (cross-mention ambiguity is
/// expected and never deduplicated). `resolved` is `None` until the scorer
/// stamps the article chosen by a winning assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Original surface token (page title as tokenized from the text).
    pub surface: String,
    /// Candidate article names competing to resolve this mention.
    pub candidates: Vec<String>,
    /// Article name chosen by a scored assignment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
}

impl Mention {
    pub fn new(surface: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            surface: surface.into(),
            candidates,
            resolved: None,
        }
    }
}
