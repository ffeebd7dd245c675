//! Interfaces consumed from the host chat client.
//!
//! The plugin never talks to a chat network directly; everything that
//! touches the UI or the wire goes through [`ChatHost`]. Hosts call the
//! plugin from a single main context, so the trait methods take `&mut self`
//! without further synchronization.

use crate::settings::Settings;

/// A conversation the plugin can address: a chat room or a private peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Conversation {
    Room(String),
    Peer(String),
}

impl Conversation {
    /// The room or peer name.
    pub fn name(&self) -> &str {
        match self {
            Self::Room(name) | Self::Peer(name) => name,
        }
    }
}

/// What the host should do with an outgoing line after the plugin saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The plugin consumed the line; do not transmit it.
    Consumed,
    /// Ordinary chat text; transmit as usual.
    Forward,
}

/// The host chat client, as seen from the plugin.
///
/// `send` transmits over the network; `echo` renders into the conversation
/// window locally without transmitting; `output` prints plugin-local status
/// lines outside any conversation.
pub trait ChatHost {
    fn send(&mut self, conv: &Conversation, text: &str);
    fn echo(&mut self, conv: &Conversation, text: &str);
    fn output(&mut self, text: &str);

    /// Persist updated settings. Called after the plugin mutates them.
    fn save_settings(&mut self, settings: &Settings);
}

/// Registration metadata for one plugin command.
///
/// Mirrors the host's command-registration interface: name, aliases,
/// parameter grammar, and a human-readable description. Dispatch happens
/// through [`crate::plugin::TranslatorPlugin::run_command`].
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub parameters: &'static [&'static str],
    pub description: &'static str,
}

impl CommandSpec {
    /// Returns `true` if `name` is this command's name or one of its aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_name() {
        assert_eq!(Conversation::Room("lobby".to_string()).name(), "lobby");
        assert_eq!(Conversation::Peer("alice".to_string()).name(), "alice");
    }

    #[test]
    fn test_command_spec_matches_aliases() {
        let spec = CommandSpec {
            name: "translate",
            aliases: &["tr"],
            parameters: &[],
            description: "",
        };
        assert!(spec.matches("translate"));
        assert!(spec.matches("tr"));
        assert!(!spec.matches("trx"));
    }
}
