mod client;
mod error;

pub use client::{DEEPL_API_URL, DeepLClient, Translation, TranslationRequest};
pub use error::TranslateError;
