//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or an explicit `-f` path), then applies `QABOT_LOG_LEVEL`,
//! `QABOT_KB_PATH` and `QABOT_TRANSLATE_URL` env overrides.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;
use crate::logger;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Knowledge definition location.
#[derive(Debug, Clone)]
pub struct KnowledgeConfig {
    /// Path to the JSON knowledge definition (already expanded, no `~`).
    pub path: PathBuf,
}

/// Translation backend configuration, populated from `[translation]`.
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    /// Backend name: `"libretranslate"` or `"dummy"`.
    pub provider: String,
    /// Server root; `/translate` and `/languages` are appended.
    pub api_base_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Attempts per translation before falling back to the original text.
    /// Always at least 1.
    pub max_attempts: u32,
    /// Fixed wait between attempts, in milliseconds.
    pub retry_backoff_ms: u64,
}

/// Console front end configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Maximum number of turns kept in the display history.
    pub history_cap: usize,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    pub log_level: String,
    /// Optional log file; logs go to stderr when `None`.
    pub log_file: Option<PathBuf>,
    pub knowledge: KnowledgeConfig,
    pub translation: TranslationConfig,
    /// API key from `LIBRETRANSLATE_API_KEY` env var. Never sourced from TOML.
    pub translation_api_key: Option<String>,
    pub console: ConsoleConfig,
}

/// Raw TOML shape: `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    bot: RawBot,
    #[serde(default)]
    knowledge: RawKnowledge,
    #[serde(default)]
    translation: RawTranslation,
    #[serde(default)]
    console: RawConsole,
}

#[derive(Deserialize)]
struct RawBot {
    #[serde(default = "default_bot_name")]
    name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    log_file: Option<String>,
}

impl Default for RawBot {
    fn default() -> Self {
        Self { name: default_bot_name(), log_level: default_log_level(), log_file: None }
    }
}

#[derive(Deserialize)]
struct RawKnowledge {
    #[serde(default = "default_kb_path")]
    path: String,
}

impl Default for RawKnowledge {
    fn default() -> Self {
        Self { path: default_kb_path() }
    }
}

#[derive(Deserialize)]
struct RawTranslation {
    #[serde(default = "default_translation_provider")]
    provider: String,
    #[serde(default = "default_translation_url")]
    api_base_url: String,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    retry_backoff_ms: u64,
}

impl Default for RawTranslation {
    fn default() -> Self {
        Self {
            provider: default_translation_provider(),
            api_base_url: default_translation_url(),
            timeout_seconds: default_timeout_seconds(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

#[derive(Deserialize)]
struct RawConsole {
    #[serde(default = "default_history_cap")]
    history_cap: usize,
}

impl Default for RawConsole {
    fn default() -> Self {
        Self { history_cap: default_history_cap() }
    }
}

fn default_bot_name() -> String { "qabot".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_kb_path() -> String { "data/kb.json".to_string() }
fn default_translation_provider() -> String { "libretranslate".to_string() }
fn default_translation_url() -> String { "http://localhost:5001".to_string() }
fn default_timeout_seconds() -> u64 { 10 }
fn default_max_attempts() -> u32 { 3 }
fn default_retry_backoff_ms() -> u64 { 1000 }
fn default_history_cap() -> usize { 200 }

/// Env-var overrides, collected once so tests can pass them explicitly.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub kb_path: Option<String>,
    pub translate_url: Option<String>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("QABOT_LOG_LEVEL").ok(),
            kb_path: env::var("QABOT_KB_PATH").ok(),
            translate_url: env::var("QABOT_TRANSLATE_URL").ok(),
        }
    }
}

/// Load config from the given path, or `config/default.toml`, then apply
/// env-var overrides. If no path is given and the default file does not
/// exist, built-in defaults are used.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = Overrides::from_env();
    let api_key = env::var("LIBRETRANSLATE_API_KEY").ok();
    match config_path {
        Some(path) => load_from(Path::new(path), &overrides, api_key),
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                load_from(path, &overrides, api_key)
            } else {
                resolve(RawConfig::default(), &overrides, api_key)
            }
        }
    }
}

/// Internal loader: accepts an explicit path and overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    overrides: &Overrides,
    api_key: Option<String>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    resolve(parsed, overrides, api_key)
}

fn resolve(parsed: RawConfig, overrides: &Overrides, api_key: Option<String>) -> Result<Config, AppError> {
    let kb_path = overrides.kb_path.as_deref().unwrap_or(&parsed.knowledge.path);
    let t = parsed.translation;

    let log_level = overrides.log_level.clone().unwrap_or(parsed.bot.log_level);
    logger::parse_level(&log_level).map_err(|e| AppError::Config(format!("[bot] log_level: {e}")))?;

    Ok(Config {
        bot_name: parsed.bot.name,
        log_level,
        log_file: parsed.bot.log_file.as_deref().map(expand_home),
        knowledge: KnowledgeConfig { path: expand_home(kb_path) },
        translation: TranslationConfig {
            provider: t.provider,
            api_base_url: overrides.translate_url.clone().unwrap_or(t.api_base_url),
            timeout_seconds: t.timeout_seconds,
            max_attempts: t.max_attempts.max(1),
            retry_backoff_ms: t.retry_backoff_ms,
        },
        translation_api_key: api_key.filter(|k| !k.is_empty()),
        console: ConsoleConfig { history_cap: parsed.console.history_cap },
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

impl Config {
    /// Offline config: dummy translator, no retry wait, no API key.
    pub fn test_default(kb_path: &Path) -> Self {
        Self {
            bot_name: "test".into(),
            log_level: "info".into(),
            log_file: None,
            knowledge: KnowledgeConfig { path: kb_path.to_path_buf() },
            translation: TranslationConfig {
                provider: "dummy".into(),
                api_base_url: "http://localhost:0".into(),
                timeout_seconds: 1,
                max_attempts: 3,
                retry_backoff_ms: 0,
            },
            translation_api_key: None,
            console: ConsoleConfig { history_cap: default_history_cap() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_TOML: &str = r#"
[bot]
name = "test-bot"
log_level = "debug"

[knowledge]
path = "/srv/kb.json"

[translation]
provider = "dummy"
api_base_url = "http://translate.local:5000"
timeout_seconds = 4
max_attempts = 5
retry_backoff_ms = 250

[console]
history_cap = 10
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_full_config() {
        let f = write_toml(FULL_TOML);
        let cfg = load_from(f.path(), &Overrides::default(), None).unwrap();
        assert_eq!(cfg.bot_name, "test-bot");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.knowledge.path, PathBuf::from("/srv/kb.json"));
        assert_eq!(cfg.translation.provider, "dummy");
        assert_eq!(cfg.translation.api_base_url, "http://translate.local:5000");
        assert_eq!(cfg.translation.timeout_seconds, 4);
        assert_eq!(cfg.translation.max_attempts, 5);
        assert_eq!(cfg.translation.retry_backoff_ms, 250);
        assert_eq!(cfg.console.history_cap, 10);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let f = write_toml("");
        let cfg = load_from(f.path(), &Overrides::default(), None).unwrap();
        assert_eq!(cfg.bot_name, "qabot");
        assert_eq!(cfg.knowledge.path, PathBuf::from("data/kb.json"));
        assert_eq!(cfg.translation.provider, "libretranslate");
        assert_eq!(cfg.translation.api_base_url, "http://localhost:5001");
        assert_eq!(cfg.translation.timeout_seconds, 10);
        assert_eq!(cfg.translation.max_attempts, 3);
        assert_eq!(cfg.translation.retry_backoff_ms, 1000);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn zero_attempts_clamped_to_one() {
        let f = write_toml("[translation]\nmax_attempts = 0\n");
        let cfg = load_from(f.path(), &Overrides::default(), None).unwrap();
        assert_eq!(cfg.translation.max_attempts, 1);
    }

    #[test]
    fn overrides_win_over_file() {
        let f = write_toml(FULL_TOML);
        let overrides = Overrides {
            log_level: Some("trace".into()),
            kb_path: Some("/tmp/other-kb.json".into()),
            translate_url: Some("http://10.0.0.2:5000".into()),
        };
        let cfg = load_from(f.path(), &overrides, None).unwrap();
        assert_eq!(cfg.log_level, "trace");
        assert_eq!(cfg.knowledge.path, PathBuf::from("/tmp/other-kb.json"));
        assert_eq!(cfg.translation.api_base_url, "http://10.0.0.2:5000");
    }

    #[test]
    fn invalid_log_level_is_config_error() {
        let f = write_toml("[bot]\nlog_level = \"loud\"\n");
        let err = load_from(f.path(), &Overrides::default(), None).unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains("loud")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_log_level_override_is_config_error() {
        let f = write_toml(FULL_TOML);
        let overrides = Overrides { log_level: Some("verbose".into()), ..Overrides::default() };
        assert!(matches!(load_from(f.path(), &overrides, None), Err(AppError::Config(_))));
    }

    #[test]
    fn empty_api_key_ignored() {
        let f = write_toml("");
        let cfg = load_from(f.path(), &Overrides::default(), Some(String::new())).unwrap();
        assert!(cfg.translation_api_key.is_none());
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), &Overrides::default(), None);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn invalid_toml_errors() {
        let f = write_toml("[translation\nprovider = ");
        let msg = load_from(f.path(), &Overrides::default(), None).unwrap_err().to_string();
        assert!(msg.contains("parse error"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.qabot/kb.json");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with("kb.json"));
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(expand_home("/absolute/path"), PathBuf::from("/absolute/path"));
    }
}
