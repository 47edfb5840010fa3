use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::mention::Mention;

use super::builder::{Edge, Lattice};
use super::LinkError;

/// One scored transition of an assignment: the source candidate at step t,
/// the destination candidate at step t+1, and their similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionScore {
    pub source: String,
    pub destination: String,
    pub score: f32,
}

/// One full assignment of a candidate per mention, with its per-step
/// transition scores, their sum, and the mentions stamped with the chosen
/// article. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSequence {
    pub mentions: Vec<Mention>,
    pub steps: Vec<TransitionScore>,
    pub total_score: f32,
}

impl ScoredSequence {
    /// The resolved article names in sequence order: each step's source
    /// candidate, then the final step's destination.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.steps.iter().map(|s| s.source.as_str()).collect();
        if let Some(last) = self.steps.last() {
            labels.push(last.destination.as_str());
        }
        labels
    }
}

impl Lattice {
    /// Enumerate every consistent route and score it.
    ///
    /// Fewer than two surviving mentions mean no steps and therefore an
    /// empty result list — a normal outcome, not an error.
    pub fn score_routes(&self) -> Result<Vec<ScoredSequence>, LinkError> {
        let routes = self.routes();
        let _span = debug_span!("score_routes", route_count = routes.len()).entered();
        let scored = routes
            .iter()
            .map(|route| self.score_route(route))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(sequence_count = scored.len());
        Ok(scored)
    }

    fn score_route(&self, route: &[Edge]) -> Result<ScoredSequence, LinkError> {
        let mut steps = Vec::with_capacity(route.len());
        let mut total_score = 0.0f32;
        for &edge in route {
            let source = self.index.rows.key(edge.row).ok_or_else(|| {
                LinkError::Reconstruction(format!("no source state for row {}", edge.row))
            })?;
            let destination = self.index.columns.key(edge.column).ok_or_else(|| {
                LinkError::Reconstruction(format!("no destination state for column {}", edge.column))
            })?;
            let score = self.matrix.get(edge.row, edge.column);
            total_score += score;
            steps.push(TransitionScore {
                source: source.label.clone(),
                destination: destination.label.clone(),
                score,
            });
        }

        let mut labels: Vec<&str> = steps.iter().map(|s| s.source.as_str()).collect();
        if let Some(last) = steps.last() {
            labels.push(last.destination.as_str());
        }

        // Map each label back to the mention at its offset. Label strings
        // alone are ambiguous — the same article can be a candidate at two
        // positions — so the position component disambiguates. Every
        // sequence gets its own mention copies; the underlying mention
        // participates in many competing assignments at once.
        let mut mentions = Vec::with_capacity(labels.len());
        for (position, &label) in labels.iter().enumerate() {
            let origins = self.label_positions.get(label).ok_or_else(|| {
                LinkError::Reconstruction(format!("label {label:?} missing from position map"))
            })?;
            if !origins.contains(&position) {
                return Err(LinkError::Reconstruction(format!(
                    "label {label:?} does not originate at position {position}"
                )));
            }
            let mut mention = self.mentions[position].clone();
            mention.resolved = Some(label.to_string());
            mentions.push(mention);
        }

        Ok(ScoredSequence {
            mentions,
            steps,
            total_score,
        })
    }
}
