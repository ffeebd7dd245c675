//! Asynchronous translation dispatch.
//!
//! One tokio task per request; the network call never runs on the main
//! context. Results come back as [`Completion`] values over an unbounded
//! channel that the host's event loop drains and hands to
//! [`crate::plugin::TranslatorPlugin::deliver`]; the channel is the only
//! thing that crosses the task boundary, so plugin state stays
//! single-threaded. There is no cancellation and no concurrency limit; an
//! interactive chat produces too few requests for either to matter.

use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

use crate::host::Conversation;
use crate::translation::{DeepLClient, TranslateError, Translation, TranslationRequest};

/// Where a finished translation should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Send as a new outgoing message.
    Send(Conversation),
    /// Local echo only, optionally prefixed with a label.
    Echo {
        conv: Conversation,
        label: Option<String>,
    },
    /// Auto-translate notification; carries what the suppression rules need.
    Notify {
        conv: Conversation,
        sender: String,
        original: String,
        target: String,
    },
    /// Plugin-local output, outside any conversation.
    Print,
}

/// A finished translation request, delivered back to the main context.
#[derive(Debug)]
pub struct Completion {
    pub route: Route,
    pub result: Result<Translation, TranslateError>,
    /// Silent completions never surface their failures to the user.
    pub silent: bool,
}

/// Spawns translation requests and funnels their completions into a channel.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<DeepLClient>,
    tx: UnboundedSender<Completion>,
}

impl Dispatcher {
    /// Returns the dispatcher and the receiving end of the completion
    /// channel. The receiver must be drained on the main context.
    pub fn new(client: DeepLClient) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                client: Arc::new(client),
                tx,
            },
            rx,
        )
    }

    /// Fires off one translation request without blocking the caller.
    ///
    /// The request parameters are captured immutably here; later settings
    /// changes do not affect in-flight requests.
    pub fn dispatch(&self, request: TranslationRequest, route: Route, silent: bool) {
        debug!(target_lang = %request.target_lang, silent, "dispatching translation");

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.translate(&request).await;
            if tx.send(Completion { route, result, silent }).is_err() {
                warn!("completion channel closed; dropping translation result");
            }
        });
    }
}
