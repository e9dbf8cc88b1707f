//! Dummy translator: tags input with the target language code, e.g.
//! `"[ar] hello"`. Used for offline runs and tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::lang::Lang;
use crate::translate::TranslateError;

#[derive(Debug, Clone, Default)]
pub struct DummyTranslator {
    /// Calls that fail before the translator starts succeeding.
    failures_remaining: Arc<AtomicU32>,
    calls: Arc<AtomicU32>,
}

impl DummyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A translator whose first `failures` calls return an error.
    pub fn failing(failures: u32) -> Self {
        Self { failures_remaining: Arc::new(AtomicU32::new(failures)), ..Self::default() }
    }

    /// Number of `translate` calls so far, across clones.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn translate(
        &self,
        text: &str,
        _source: Lang,
        target: Lang,
    ) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(TranslateError::Request("dummy failure".into()));
        }
        Ok(format!("[{target}] {text}"))
    }
}
