use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::error::TranslateError;

/// DeepL free-tier translation endpoint.
pub const DEEPL_API_URL: &str = "https://api-free.deepl.com/v2/translate";

/// How long to wait for the provider before giving up.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Parameters of one translation call, captured at dispatch time.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub target_lang: String,
    pub api_key: String,
    pub preserve_formatting: bool,
}

/// A successful provider answer.
///
/// `detected_source` is whatever the provider guessed about the input
/// language; it is optional and independent of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub detected_source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponsePayload {
    #[serde(default)]
    translations: Vec<TranslationEntry>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslationEntry {
    #[serde(default)]
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

/// HTTP client for the DeepL translation API.
pub struct DeepLClient {
    http: Client,
    endpoint: String,
}

impl Default for DeepLClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DeepLClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEEPL_API_URL)
    }

    /// Client against a non-default endpoint. Tests point this at a local
    /// mock server.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Translates `request.text` into `request.target_lang`.
    ///
    /// Fails fast with [`TranslateError::Unconfigured`] when no API key is
    /// set; no request leaves the machine in that case. Transport and
    /// provider failures are classified per [`TranslateError`]; nothing
    /// here panics or propagates a raw reqwest error.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslateError> {
        let api_key = request.api_key.trim();
        if api_key.is_empty() {
            return Err(TranslateError::Unconfigured);
        }

        let mut params = vec![
            ("auth_key", api_key),
            ("text", request.text.as_str()),
            ("target_lang", request.target_lang.as_str()),
        ];
        if request.preserve_formatting {
            params.push(("preserve_formatting", "1"));
        }

        debug!(target_lang = %request.target_lang, "requesting translation");

        let response = self
            .http
            .post(&self.endpoint)
            .form(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| TranslateError::Transport(err.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|err| TranslateError::Transport(err.to_string()))?;

        parse_payload(&body)
    }
}

/// Classifies a raw response body into a [`Translation`] or a failure.
///
/// The provider reports its own errors as JSON with a `message` field, so
/// the body is inspected regardless of HTTP status: malformed JSON, an
/// error message, and an empty translations list are distinct failures.
fn parse_payload(body: &str) -> Result<Translation, TranslateError> {
    let payload: ResponsePayload =
        serde_json::from_str(body).map_err(|_| TranslateError::MalformedResponse)?;

    if let Some(message) = payload.message
        && message.to_lowercase().contains("error")
    {
        return Err(TranslateError::Provider(message));
    }

    let first = payload
        .translations
        .into_iter()
        .next()
        .ok_or(TranslateError::Empty)?;

    Ok(Translation {
        text: first.text,
        detected_source: first.detected_source_language,
    })
}
