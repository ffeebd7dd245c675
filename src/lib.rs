//! # polyglot - chat translation plugin core
//!
//! `polyglot` is the engine of a chat-client add-on that translates chat
//! lines through the DeepL API: explicit `/translate` commands, an inline
//! `@LANG` shortcut on outgoing lines, and background auto-translation of
//! incoming messages.
//!
//! The host chat client is abstracted behind [`host::ChatHost`]; network
//! calls run on background tokio tasks and come back to the host's main
//! context as [`dispatch::Completion`] values, so the chat UI is only ever
//! touched from the thread that owns it.
//!
//! ## Quick start
//!
//! ```no_run
//! use polyglot::dispatch::Dispatcher;
//! use polyglot::host::{ChatHost, Conversation};
//! use polyglot::plugin::TranslatorPlugin;
//! use polyglot::settings::Settings;
//! use polyglot::translation::DeepLClient;
//!
//! # async fn example<MyHost: ChatHost>(host: MyHost) {
//! let (dispatcher, mut completions) = Dispatcher::new(DeepLClient::new());
//! let mut plugin = TranslatorPlugin::new(host, Settings::default(), "me", dispatcher);
//!
//! let room = Conversation::Room("lobby".to_string());
//! plugin.outgoing_line(&room, "@ES buenos dias");
//!
//! // The host event loop drains completions on the main context:
//! while let Some(done) = completions.recv().await {
//!     plugin.deliver(done);
//! }
//! # }
//! ```

/// TOML-backed settings persistence.
pub mod config;

/// Background dispatch of translation requests.
pub mod dispatch;

/// Host chat-client interfaces the plugin calls into.
pub mod host;

/// Language-token validation and quote normalization.
pub mod lang;

/// Last-message memory per conversation.
pub mod memory;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Commands, the inline shortcut, and auto-translation.
pub mod plugin;

/// Plugin settings and registration metadata.
pub mod settings;

/// DeepL HTTP client.
pub mod translation;

/// Terminal UI helpers for the demo host.
pub mod ui;
