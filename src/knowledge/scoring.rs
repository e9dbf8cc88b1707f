//! Keyword scoring and best-match selection.
//!
//! Two passes per entry:
//! - exact: any keyword phrase found verbatim in the lowercased query scores
//!   [`EXACT_MATCH_SCORE`] and ends scoring for that entry;
//! - overlap: every query token of at least [`MIN_TOKEN_LEN`] characters
//!   earns a point per keyword phrase it overlaps with.
//!
//! The highest score wins; equal scores keep load order.

use super::tokenize::{Normalized, normalize};
use super::{KeywordPhrase, KnowledgeBase, KnowledgeEntry};

/// Score for a keyword phrase found verbatim in the query.
pub const EXACT_MATCH_SCORE: u32 = 10;

/// Shorter query tokens never contribute to the overlap pass.
pub const MIN_TOKEN_LEN: usize = 3;

/// An entry that scored above zero for a query. Lives only as long as the
/// borrow of the knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct ScoredMatch<'a> {
    /// Position of the entry in load order.
    pub index: usize,
    pub entry: &'a KnowledgeEntry,
    pub score: u32,
}

/// Score one entry against a normalized query.
pub fn score_entry(entry: &KnowledgeEntry, query: &Normalized) -> u32 {
    if entry.keywords.iter().any(|k| query.lowercased.contains(k.text.as_str())) {
        return EXACT_MATCH_SCORE;
    }

    // No de-duplication: one token may earn a point from several phrases.
    let mut score = 0;
    for token in query.tokens.iter().filter(|t| t.chars().count() >= MIN_TOKEN_LEN) {
        for keyword in &entry.keywords {
            if overlaps(token, keyword) {
                score += 1;
            }
        }
    }
    score
}

fn overlaps(token: &str, keyword: &KeywordPhrase) -> bool {
    keyword.parts.iter().any(|part| part.contains(token))
        || (keyword.text.chars().count() > 2 && token.contains(keyword.text.as_str()))
}

impl KnowledgeBase {
    /// All entries scoring above zero, best first. Equal scores keep load order.
    pub fn rank(&self, query: &str) -> Vec<ScoredMatch<'_>> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let normalized = normalize(query);

        let mut matches: Vec<ScoredMatch<'_>> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| ScoredMatch { index, entry, score: score_entry(entry, &normalized) })
            .filter(|m| m.score > 0)
            .collect();
        // `sort_by` is stable.
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }

    /// Highest-scoring entry, if any entry scored above zero.
    pub fn best_match(&self, query: &str) -> Option<ScoredMatch<'_>> {
        self.rank(query).into_iter().next()
    }

    /// Answer for `query`, or the default answer when nothing matches.
    pub fn get_answer(&self, query: &str) -> &str {
        match self.best_match(query) {
            Some(m) => {
                tracing::debug!(index = m.index, score = m.score, "knowledge match");
                &m.entry.answer
            }
            None => {
                tracing::debug!("no knowledge match, default answer");
                &self.default_answer
            }
        }
    }
}
