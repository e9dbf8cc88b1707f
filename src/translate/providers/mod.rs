//! Translation backend implementations.
//!
//! `build(config, api_key)` is the factory: called at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod libretranslate;

use crate::config::TranslationConfig;
use crate::translate::{TranslateError, Translator};

/// Construct a `Translator` from config and an optional API key.
///
/// `api_key` is sourced from `LIBRETRANSLATE_API_KEY` env (never TOML).
pub fn build(config: &TranslationConfig, api_key: Option<String>) -> Result<Translator, TranslateError> {
    match config.provider.as_str() {
        "dummy" => Ok(Translator::Dummy(dummy::DummyTranslator::new())),
        "libretranslate" => {
            let client = libretranslate::LibreTranslateClient::new(
                config.api_base_url.clone(),
                config.timeout_seconds,
                api_key,
            )?;
            Ok(Translator::LibreTranslate(client))
        }
        other => Err(TranslateError::UnknownProvider(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::Path;

    #[test]
    fn builds_known_providers() {
        let mut cfg = Config::test_default(Path::new("kb.json")).translation;
        assert_eq!(build(&cfg, None).unwrap().name(), "dummy");
        cfg.provider = "libretranslate".into();
        assert_eq!(build(&cfg, Some("key".into())).unwrap().name(), "libretranslate");
    }

    #[test]
    fn unknown_provider_errors() {
        let mut cfg = Config::test_default(Path::new("kb.json")).translation;
        cfg.provider = "deepl".into();
        let err = build(&cfg, None).unwrap_err();
        assert!(err.to_string().contains("deepl"));
    }
}
