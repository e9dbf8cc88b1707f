//! Knowledge definition loading.
//!
//! The definition is a JSON document with a `questions` list of
//! `{ keywords, answer }` records and an optional `default_response`.
//! Loading never fails the caller: a missing or malformed definition yields
//! an empty knowledge base with the built-in default answer.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info, warn};

use super::{KeywordPhrase, KnowledgeBase, KnowledgeEntry};

/// Answer used when the definition has no `default_response` or cannot be read.
pub const BUILTIN_DEFAULT_ANSWER: &str = "I'm sorry, I don't have information about that.";

/// Raw JSON shape: `serde` target before validation.
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeDefinition {
    #[serde(default)]
    pub questions: Vec<RawEntry>,
    #[serde(default)]
    pub default_response: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl KnowledgeBase {
    /// Knowledge base with no entries and the built-in default answer.
    pub fn empty() -> Self {
        Self { entries: Vec::new(), default_answer: BUILTIN_DEFAULT_ANSWER.to_string() }
    }

    /// Read and parse the definition at `path`.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => {
                let kb = Self::from_json(&raw);
                info!(
                    path = %path.display(),
                    entries = kb.entries.len(),
                    "knowledge base loaded"
                );
                kb
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "cannot read knowledge definition, using empty knowledge base");
                Self::empty()
            }
        }
    }

    /// Parse a JSON definition.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<KnowledgeDefinition>(raw) {
            Ok(def) => Self::from_definition(def),
            Err(e) => {
                error!(error = %e, "malformed knowledge definition, using empty knowledge base");
                Self::empty()
            }
        }
    }

    /// Validate a parsed definition.
    ///
    /// Blank keyword phrases are dropped. Entries left without keywords, or
    /// without an answer, can never be returned and are dropped too.
    pub fn from_definition(def: KnowledgeDefinition) -> Self {
        let total = def.questions.len();
        let mut entries = Vec::with_capacity(total);

        for (index, raw) in def.questions.into_iter().enumerate() {
            let keywords: Vec<KeywordPhrase> = raw
                .keywords
                .iter()
                .filter(|k| !k.trim().is_empty())
                .map(|k| KeywordPhrase::new(k))
                .collect();

            let Some(answer) = raw.answer else {
                warn!(index, "knowledge entry has no answer, skipped");
                continue;
            };
            if keywords.is_empty() {
                warn!(index, "knowledge entry has no keywords, skipped");
                continue;
            }

            entries.push(KnowledgeEntry { keywords, answer });
        }

        let dropped = total - entries.len();
        if dropped > 0 {
            info!(dropped, kept = entries.len(), "knowledge entries filtered at load");
        }

        Self {
            entries,
            default_answer: def
                .default_response
                .unwrap_or_else(|| BUILTIN_DEFAULT_ANSWER.to_string()),
        }
    }
}
