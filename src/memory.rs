//! Per-conversation memory of the most recent incoming message.
//!
//! One entry per room or peer, overwritten on every incoming line from
//! someone other than the local user. Language-only invocations (`/tr FR`,
//! `@FR`) use this as their implicit subject. In-memory only; bounded by
//! the number of active conversations.

use std::collections::HashMap;

use crate::host::Conversation;

/// The most recent message seen in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastMessage {
    pub sender: String,
    pub text: String,
}

/// Remembers the last incoming message per conversation.
pub struct ConversationMemory {
    local_user: String,
    entries: HashMap<Conversation, LastMessage>,
}

impl ConversationMemory {
    pub fn new(local_user: impl Into<String>) -> Self {
        Self {
            local_user: local_user.into(),
            entries: HashMap::new(),
        }
    }

    /// Overwrites the entry for `conv`, unless the sender is the local user.
    ///
    /// The plugin never remembers its own messages as "the last message".
    pub fn record(&mut self, conv: &Conversation, sender: &str, text: &str) {
        if sender == self.local_user {
            return;
        }
        self.entries.insert(
            conv.clone(),
            LastMessage {
                sender: sender.to_string(),
                text: text.to_string(),
            },
        );
    }

    pub fn lookup(&self, conv: &Conversation) -> Option<&LastMessage> {
        self.entries.get(conv)
    }
}
