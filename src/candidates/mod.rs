//! Candidate lookup: turning tokenized text into mentions.
//!
//! A `CandidateSource` maps a surface token to candidate article names with
//! redirects already resolved to canonical titles; the entity-vector model
//! has no vector for a redirect alias, so resolution must happen behind
//! this seam. The production source is a Wikipedia page/redirect database;
//! `StaticCandidateSource` covers tests and small hand-maintained tables.

mod static_source;

pub use static_source::StaticCandidateSource;

use tracing::debug;

use crate::mention::Mention;

/// Failure of an external candidate lookup, propagated to the caller
/// unchanged. Retry policy belongs to the source implementation.
#[derive(Debug, thiserror::Error)]
#[error("candidate lookup failed for {token:?}: {source}")]
pub struct SourceError {
    pub token: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Candidate article names for surface tokens.
pub trait CandidateSource {
    /// Candidates for one token, pre-resolved past redirects. An empty
    /// list means the token is unknown to the knowledge base.
    fn candidates(&self, token: &str) -> Result<Vec<String>, SourceError>;
}

/// Wrap a page title in the entity-vector article convention: `[記事名]`.
///
/// The Japanese entity-vector distributions name article vectors with
/// brackets to keep them distinct from plain word vectors.
pub fn article_symbol(title: &str) -> String {
    format!("[{title}]")
}

/// One lookup per token, trusting the tokenizer's segmentation.
///
/// Tokens with no candidates produce no mention; the sequence shortens
/// around them.
pub fn mentions_from_tokens(
    tokens: &[&str],
    source: &dyn CandidateSource,
) -> Result<Vec<Mention>, SourceError> {
    let mut mentions = Vec::with_capacity(tokens.len());
    for &token in tokens {
        let candidates = source.candidates(token)?;
        if candidates.is_empty() {
            debug!(token, "no candidates, skipping token");
            continue;
        }
        mentions.push(Mention::new(token, candidates));
    }
    Ok(mentions)
}

/// Greedy longest-match span search over adjacent tokens.
///
/// Tokenizers split many article titles (東京 / 都); this joins adjacent
/// tokens into lookup spans, widest window first, and never reuses a token
/// position in two accepted spans. Mentions come back in text order.
pub fn search_spans(
    tokens: &[&str],
    source: &dyn CandidateSource,
) -> Result<Vec<Mention>, SourceError> {
    let token_count = tokens.len();
    let mut used = vec![false; token_count];
    let mut found: Vec<(usize, Mention)> = Vec::new();

    for width in (1..=token_count).rev() {
        for start in 0..=(token_count - width) {
            let window = start..start + width;
            if used[window.clone()].iter().any(|&u| u) {
                continue;
            }
            let span = tokens[window.clone()].concat();
            let candidates = source.candidates(&span)?;
            if candidates.is_empty() {
                continue;
            }
            debug!(span = %span, width, "span accepted");
            for slot in &mut used[window] {
                *slot = true;
            }
            found.push((start, Mention::new(span, candidates)));
        }
        if used.iter().all(|&u| u) {
            break;
        }
    }

    found.sort_by_key(|&(start, _)| start);
    Ok(found.into_iter().map(|(_, mention)| mention).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> StaticCandidateSource {
        let mut table = StaticCandidateSource::new();
        table.insert("ヤマハ", vec!["[ヤマハ]".into(), "[ヤマハ発動機]".into()]);
        table.insert("スズキ", vec!["[スズキ_(企業)]".into(), "[スズキ_(魚)]".into()]);
        table.insert("東京都", vec!["[東京都]".into()]);
        table
    }

    #[test]
    fn test_article_symbol() {
        assert_eq!(article_symbol("ヤマハ発動機"), "[ヤマハ発動機]");
    }

    #[test]
    fn test_mentions_from_tokens_drops_unknown() {
        let mentions =
            mentions_from_tokens(&["ヤマハ", "未知語", "スズキ"], &source()).unwrap();
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].surface, "ヤマハ");
        assert_eq!(mentions[1].surface, "スズキ");
        assert_eq!(mentions[1].candidates.len(), 2);
    }

    #[test]
    fn test_search_spans_prefers_wider_window() {
        // "東京" and "都" are unknown individually but found as one span.
        let mentions = search_spans(&["東京", "都", "ヤマハ"], &source()).unwrap();
        let surfaces: Vec<&str> = mentions.iter().map(|m| m.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["東京都", "ヤマハ"]);
    }

    #[test]
    fn test_search_spans_never_reuses_a_token() {
        let mut table = source();
        // Overlapping span that would reuse 都 if allowed.
        table.insert("都ヤマハ", vec!["[都ヤマハ]".into()]);
        let mentions = search_spans(&["東京", "都", "ヤマハ"], &table).unwrap();
        let surfaces: Vec<&str> = mentions.iter().map(|m| m.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["東京都", "ヤマハ"]);
    }

    #[test]
    fn test_search_spans_empty_input() {
        let mentions = search_spans(&[], &source()).unwrap();
        assert!(mentions.is_empty());
    }
}
