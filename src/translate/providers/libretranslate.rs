//! LibreTranslate HTTP backend.
//!
//! `POST {base}/translate` with `{q, source, target, format}` returns
//! `{translatedText}`; `GET {base}/languages` doubles as the health probe.
//! Any status other than 200 is a failed attempt.
//! Wire types are private to this module.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::lang::Lang;
use crate::translate::TranslateError;

/// Client for a LibreTranslate-compatible server. Cheap to clone because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    client: Client,
    api_base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    /// `api_key` is sent in the request body when present; public instances
    /// usually need one, self-hosted ones usually do not.
    pub fn new(
        api_base_url: impl Into<String>,
        timeout_seconds: u64,
        api_key: Option<String>,
    ) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| TranslateError::Request(format!("failed to build HTTP client: {e}")))?;
        let api_base_url: String = api_base_url.into();
        let api_base_url = api_base_url.trim_end_matches('/').to_string();
        Ok(Self { client, api_base_url, api_key })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_base_url)
    }

    pub async fn translate(
        &self,
        text: &str,
        source: Lang,
        target: Lang,
    ) -> Result<String, TranslateError> {
        let payload = TranslateRequest {
            q: text,
            source: source.code(),
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let url = self.endpoint("translate");

        debug!(%url, %source, %target, text_len = text.len(), "sending translation request");

        let response = self.client.post(&url).json(&payload).send().await.map_err(|e| {
            error!(%url, error = %e, is_timeout = e.is_timeout(), "translation request failed (transport)");
            TranslateError::Request(e.to_string())
        })?;

        // Same rule as the health probe: only 200 carries a translation.
        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            return Err(TranslateError::Status { status: status.as_u16(), body });
        }

        let parsed = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| TranslateError::Decode(e.to_string()))?;
        Ok(parsed.translated_text)
    }

    /// Healthy iff `GET /languages` answers 200.
    pub async fn health(&self) -> Result<(), TranslateError> {
        let url = self.endpoint("languages");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TranslateError::Request(format!("unreachable: {e}")))?;
        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(TranslateError::Status {
                status: status.as_u16(),
                body: format!("GET {url}"),
            }),
        }
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}
