//! Failure taxonomy for translation requests.

use thiserror::Error;

/// Everything that can go wrong with a single translation request.
///
/// Each failure is terminal for its request: no retries, no fallback
/// language. Callers decide the reporting policy: explicit commands print
/// these, background auto-translation swallows them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslateError {
    /// No API key configured; no network call was attempted.
    #[error("DeepL API key not set. Configure it to enable translation")]
    Unconfigured,

    /// Network-level failure: timeout, DNS, TLS, connection reset.
    #[error("DeepL request failed: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("Failed to parse DeepL response")]
    MalformedResponse,

    /// The provider answered with an error message instead of translations.
    #[error("DeepL error: {0}")]
    Provider(String),

    /// Well-formed response carrying no translations.
    #[error("DeepL returned no translations")]
    Empty,
}
