//! Knowledge base: keyword phrases mapped to canned answers.
//!
//! Built once at startup from a JSON definition ([`store`]) and immutable
//! afterwards; share it behind an `Arc`. Lookups ([`scoring`]) operate on
//! English text only.

pub mod scoring;
pub mod store;
pub mod tokenize;

pub use scoring::{EXACT_MATCH_SCORE, MIN_TOKEN_LEN, ScoredMatch};
pub use store::{BUILTIN_DEFAULT_ANSWER, KnowledgeDefinition};

/// A lowercased keyword phrase plus its whitespace-separated parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPhrase {
    pub text: String,
    pub parts: Vec<String>,
}

impl KeywordPhrase {
    pub fn new(phrase: &str) -> Self {
        let text = phrase.to_lowercase();
        let parts = text.split_whitespace().map(str::to_string).collect();
        Self { text, parts }
    }
}

/// One record: any of `keywords` may select `answer`.
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    /// Never empty once loaded.
    pub keywords: Vec<KeywordPhrase>,
    pub answer: String,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    /// Load order; used as the tie-break between equal scores.
    entries: Vec<KnowledgeEntry>,
    default_answer: String,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>, default_answer: impl Into<String>) -> Self {
        Self { entries, default_answer: default_answer.into() }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn default_answer(&self) -> &str {
        &self.default_answer
    }
}
