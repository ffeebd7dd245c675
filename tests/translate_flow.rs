//! End-to-end flows through the public API.
//!
//! Each test plays the host event loop: chat lines go in on the main
//! context, translation requests hit a mock DeepL endpoint on background
//! tasks, and completions are drained back into the plugin exactly as a
//! real host would.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use mockito::{Matcher, Server};
use tokio::sync::mpsc::UnboundedReceiver;

use polyglot::dispatch::{Completion, Dispatcher};
use polyglot::host::{ChatHost, Conversation, Disposition};
use polyglot::plugin::TranslatorPlugin;
use polyglot::settings::Settings;
use polyglot::translation::DeepLClient;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Sent(String, String),
    Echoed(String, String),
    Output(String),
}

#[derive(Default, Clone)]
struct RecordingHost {
    events: Rc<RefCell<Vec<Event>>>,
}

impl RecordingHost {
    fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl ChatHost for RecordingHost {
    fn send(&mut self, conv: &Conversation, text: &str) {
        self.events
            .borrow_mut()
            .push(Event::Sent(conv.name().to_string(), text.to_string()));
    }

    fn echo(&mut self, conv: &Conversation, text: &str) {
        self.events
            .borrow_mut()
            .push(Event::Echoed(conv.name().to_string(), text.to_string()));
    }

    fn output(&mut self, text: &str) {
        self.events.borrow_mut().push(Event::Output(text.to_string()));
    }

    fn save_settings(&mut self, _settings: &Settings) {}
}

fn settings(auto_translate_incoming: bool) -> Settings {
    Settings {
        api_key: "secret".to_string(),
        auto_translate_incoming,
        ..Settings::default()
    }
}

fn plugin_against(
    endpoint: &str,
    settings: Settings,
) -> (
    TranslatorPlugin<RecordingHost>,
    UnboundedReceiver<Completion>,
    RecordingHost,
) {
    let host = RecordingHost::default();
    let (dispatcher, rx) = Dispatcher::new(DeepLClient::with_endpoint(endpoint));
    let plugin = TranslatorPlugin::new(host.clone(), settings, "me", dispatcher);
    (plugin, rx, host)
}

async fn drain(
    plugin: &mut TranslatorPlugin<RecordingHost>,
    rx: &mut UnboundedReceiver<Completion>,
    count: usize,
) {
    for _ in 0..count {
        let done = rx.recv().await.unwrap();
        plugin.deliver(done);
    }
}

#[tokio::test]
async fn command_translates_and_sends_to_the_room() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("auth_key".into(), "secret".into()),
            Matcher::UrlEncoded("target_lang".into(), "FR".into()),
            Matcher::UrlEncoded("text".into(), "how are you".into()),
            Matcher::UrlEncoded("preserve_formatting".into(), "1".into()),
        ]))
        .with_body(r#"{"translations":[{"text":"comment allez-vous","detected_source_language":"EN"}]}"#)
        .create_async()
        .await;

    let (mut plugin, mut rx, host) = plugin_against(&server.url(), settings(false));
    let room = Conversation::Room("lobby".to_string());

    assert!(plugin.run_command("tr", "FR how are you", Some(&room)));
    drain(&mut plugin, &mut rx, 1).await;

    mock.assert_async().await;
    assert_eq!(
        host.events(),
        [Event::Sent("lobby".to_string(), "comment allez-vous".to_string())]
    );
}

#[tokio::test]
async fn shortcut_replaces_typed_line_and_remembered_line_stays_local() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(Matcher::UrlEncoded("text".into(), "see you tomorrow".into()))
        .with_body(r#"{"translations":[{"text":"hasta mañana","detected_source_language":"EN"}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/")
        .match_body(Matcher::UrlEncoded("text".into(), "que tal".into()))
        .with_body(r#"{"translations":[{"text":"how is it going","detected_source_language":"ES"}]}"#)
        .create_async()
        .await;

    let (mut plugin, mut rx, host) = plugin_against(&server.url(), settings(false));
    let peer = Conversation::Peer("alice".to_string());

    // Typed text: the original line is consumed and the translation sent.
    assert_eq!(
        plugin.outgoing_line(&peer, "@ES see you tomorrow"),
        Disposition::Consumed
    );
    drain(&mut plugin, &mut rx, 1).await;

    // Remembered text: translation is echoed locally, never transmitted.
    plugin.incoming_line(&peer, "alice", "que tal");
    assert_eq!(plugin.outgoing_line(&peer, "@EN-GB"), Disposition::Consumed);
    drain(&mut plugin, &mut rx, 1).await;

    assert_eq!(
        host.events(),
        [
            Event::Sent("alice".to_string(), "hasta mañana".to_string()),
            Event::Echoed(
                "alice".to_string(),
                "[EN-GB] alice: how is it going".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn auto_translate_echoes_foreign_lines_and_suppresses_english() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(Matcher::UrlEncoded("text".into(), "bonjour tout le monde".into()))
        .with_body(
            r#"{"translations":[{"text":"hello everyone","detected_source_language":"FR"}]}"#,
        )
        .create_async()
        .await;
    server
        .mock("POST", "/")
        .match_body(Matcher::UrlEncoded("text".into(), "good morning".into()))
        .with_body(
            r#"{"translations":[{"text":"good morning","detected_source_language":"EN-US"}]}"#,
        )
        .create_async()
        .await;

    let (mut plugin, mut rx, host) = plugin_against(&server.url(), settings(true));
    let room = Conversation::Room("lobby".to_string());

    plugin.incoming_line(&room, "alice", "bonjour tout le monde");
    plugin.incoming_line(&room, "bob", "good morning");
    drain(&mut plugin, &mut rx, 2).await;

    // Only the French line produced a notification; the English one added
    // no value and stayed silent.
    assert_eq!(
        host.events(),
        [Event::Echoed(
            "lobby".to_string(),
            "[FR→EN-GB] alice: hello everyone".to_string()
        )]
    );
}

#[tokio::test]
async fn auto_translate_swallows_provider_failures() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let (mut plugin, mut rx, host) = plugin_against(&server.url(), settings(true));
    let room = Conversation::Room("lobby".to_string());

    plugin.incoming_line(&room, "alice", "bonjour");
    drain(&mut plugin, &mut rx, 1).await;

    assert!(host.events().is_empty());
}

#[tokio::test]
async fn burst_of_shortcuts_all_complete() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_body(r#"{"translations":[{"text":"hallo"}]}"#)
        .expect(3)
        .create_async()
        .await;

    let (mut plugin, mut rx, host) = plugin_against(&server.url(), settings(false));
    let room = Conversation::Room("lobby".to_string());

    for _ in 0..3 {
        assert_eq!(
            plugin.outgoing_line(&room, "@DE hello"),
            Disposition::Consumed
        );
    }
    drain(&mut plugin, &mut rx, 3).await;

    assert_eq!(
        host.events(),
        [
            Event::Sent("lobby".to_string(), "hallo".to_string()),
            Event::Sent("lobby".to_string(), "hallo".to_string()),
            Event::Sent("lobby".to_string(), "hallo".to_string()),
        ]
    );
}
