//! Plugin settings and the registration metadata handed to the host.

use serde::{Deserialize, Serialize};

/// User-configurable plugin settings.
///
/// Read on every translation request; mutated only by explicit user actions
/// (the settings UI of the host, or the incoming-language command). An empty
/// API key disables all network calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// DeepL API key. Empty means unconfigured.
    pub api_key: String,
    /// Default target language for outgoing translations.
    pub target_lang: String,
    /// Ask the provider to preserve simple formatting (bold/italic/newlines).
    pub preserve_formatting: bool,
    /// Translate incoming messages in the background (local echo only).
    pub auto_translate_incoming: bool,
    /// Target language for incoming auto-translation.
    pub auto_incoming_target_lang: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target_lang: "DE".to_string(),
            preserve_formatting: true,
            auto_translate_incoming: true,
            auto_incoming_target_lang: "EN-GB".to_string(),
        }
    }
}

/// Value type of a setting, for the host's settings UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Text,
    Bool,
}

/// Registration metadata for a single setting.
///
/// Hosts that render a settings page consume these; the keys match the
/// serialized field names of [`Settings`].
#[derive(Debug, Clone, Copy)]
pub struct SettingDescriptor {
    pub key: &'static str,
    pub description: &'static str,
    pub kind: SettingKind,
}

/// Descriptors for every field of [`Settings`], in declaration order.
pub const SETTING_DESCRIPTORS: &[SettingDescriptor] = &[
    SettingDescriptor {
        key: "api_key",
        description: "DeepL API key:",
        kind: SettingKind::Text,
    },
    SettingDescriptor {
        key: "target_lang",
        description: "Target language (e.g., EN-US, EN-GB, DE, ES, JA):",
        kind: SettingKind::Text,
    },
    SettingDescriptor {
        key: "preserve_formatting",
        description: "Preserve simple formatting (bold/italic/newlines)",
        kind: SettingKind::Bool,
    },
    SettingDescriptor {
        key: "auto_translate_incoming",
        description: "Auto-translate incoming messages (local only)",
        kind: SettingKind::Bool,
    },
    SettingDescriptor {
        key: "auto_incoming_target_lang",
        description: "Target language for incoming messages (e.g., EN-US)",
        kind: SettingKind::Text,
    },
];

impl Settings {
    /// Outgoing target language with the built-in fallback applied.
    ///
    /// An explicit per-request language wins, then the configured default,
    /// then `EN-US`.
    pub fn resolve_target<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        match explicit {
            Some(lang) if !lang.is_empty() => lang,
            _ if !self.target_lang.is_empty() => &self.target_lang,
            _ => "EN-US",
        }
    }

    /// Target language for incoming auto-translation, defaulting to `EN-GB`.
    pub fn incoming_target(&self) -> &str {
        if self.auto_incoming_target_lang.is_empty() {
            "EN-GB"
        } else {
            &self.auto_incoming_target_lang
        }
    }
}
