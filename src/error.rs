//! Application-wide error types.
//!
//! Only startup can fail. Per-query paths fall back to safe defaults instead
//! of returning errors.

use thiserror::Error;

use crate::translate::TranslateError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A backend that cannot be built at startup. A provider name nothing
/// implements is a configuration mistake, not a transport failure.
impl From<TranslateError> for AppError {
    fn from(e: TranslateError) -> Self {
        match e {
            TranslateError::UnknownProvider(_) => AppError::Config(e.to_string()),
            other => AppError::Translation(other.to_string()),
        }
    }
}
