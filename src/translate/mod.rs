//! Translation service abstraction.
//!
//! `Translator` is an enum over concrete backends; add a variant + module in
//! `providers/` for each additional service. A single `translate` call on the
//! enum is one attempt and may fail.
//!
//! [`TranslationService`] wraps a backend with the per-query policy: skip
//! no-op translations, retry a bounded number of times with a fixed backoff,
//! and fall back to the original text once attempts are exhausted. Callers
//! always get a usable string back.

pub mod providers;

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::TranslationConfig;
use crate::lang::Lang;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("unknown translation provider: {0}")]
    UnknownProvider(String),
    #[error("translation request failed: {0}")]
    Request(String),
    #[error("translation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected translation response: {0}")]
    Decode(String),
}

// ── Backend enum ──────────────────────────────────────────────────────────────

/// All available translation backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
#[derive(Debug, Clone)]
pub enum Translator {
    LibreTranslate(providers::libretranslate::LibreTranslateClient),
    Dummy(providers::dummy::DummyTranslator),
}

impl Translator {
    /// One translation attempt.
    pub async fn translate(
        &self,
        text: &str,
        source: Lang,
        target: Lang,
    ) -> Result<String, TranslateError> {
        match self {
            Translator::LibreTranslate(c) => c.translate(text, source, target).await,
            Translator::Dummy(d) => d.translate(text, source, target).await,
        }
    }

    /// Reachability probe.
    pub async fn health(&self) -> Result<(), TranslateError> {
        match self {
            Translator::LibreTranslate(c) => c.health().await,
            Translator::Dummy(_) => Ok(()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Translator::LibreTranslate(_) => "libretranslate",
            Translator::Dummy(_) => "dummy",
        }
    }
}

// ── Retry policy ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. At least 1.
    pub max_attempts: u32,
    /// Fixed wait between consecutive attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), backoff }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.retry_backoff_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

// ── Service ───────────────────────────────────────────────────────────────────

/// A backend plus its retry policy. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TranslationService {
    translator: Translator,
    retry: RetryPolicy,
}

impl TranslationService {
    pub fn new(translator: Translator, retry: RetryPolicy) -> Self {
        Self { translator, retry }
    }

    /// Translate `text`, or return it unchanged.
    ///
    /// Blank text and `source == target` never reach the backend. After
    /// `max_attempts` failures the original text is returned.
    pub async fn translate(&self, text: &str, source: Lang, target: Lang) -> String {
        if text.trim().is_empty() || source == target {
            return text.to_string();
        }

        let max_attempts = self.retry.max_attempts;
        for attempt in 1..=max_attempts {
            match self.translator.translate(text, source, target).await {
                Ok(translated) => {
                    debug!(%source, %target, attempt, "translated");
                    return translated;
                }
                Err(e) => {
                    warn!(%source, %target, attempt, max_attempts, error = %e, "translation attempt failed");
                    if attempt < max_attempts {
                        tokio::time::sleep(self.retry.backoff).await;
                    }
                }
            }
        }

        error!(%source, %target, max_attempts, "translation failed, returning original text");
        text.to_string()
    }

    /// `true` if the backend answers its health probe.
    pub async fn check_connection(&self) -> bool {
        match self.translator.health().await {
            Ok(()) => true,
            Err(e) => {
                warn!(provider = self.translator.name(), error = %e, "translation service unreachable");
                false
            }
        }
    }
}
