//! The plugin core: explicit commands, the inline `@LANG` shortcut, and
//! background auto-translation of incoming lines.
//!
//! All methods here run on the host's main context. Translation work is
//! handed to [`Dispatcher`]; finished requests come back as [`Completion`]
//! values that the host feeds into [`TranslatorPlugin::deliver`].

use tracing::debug;

use crate::dispatch::{Completion, Dispatcher, Route};
use crate::host::{ChatHost, CommandSpec, Conversation, Disposition};
use crate::lang::{looks_like_lang, strip_wrapping_quotes};
use crate::memory::ConversationMemory;
use crate::settings::Settings;
use crate::translation::TranslationRequest;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commands the plugin asks its host to register.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "translate",
        aliases: &["tr"],
        parameters: &["[target_lang]", "<text..>"],
        description: "Translate text using DeepL and send the translation",
    },
    CommandSpec {
        name: "trincoming",
        aliases: &["tri"],
        parameters: &["<target_lang>"],
        description: "Set target language for incoming auto-translation",
    },
    CommandSpec {
        name: "trver",
        aliases: &["trversion"],
        parameters: &[],
        description: "Show polyglot version",
    },
    CommandSpec {
        name: "trhelp",
        aliases: &["trh"],
        parameters: &[],
        description: "Show polyglot help and current settings",
    },
];

/// Chat-translation plugin bound to a host.
pub struct TranslatorPlugin<H: ChatHost> {
    host: H,
    settings: Settings,
    memory: ConversationMemory,
    dispatcher: Dispatcher,
    local_user: String,
}

impl<H: ChatHost> TranslatorPlugin<H> {
    /// `local_user` is the host account's own identity, injected once so
    /// the plugin can ignore its own lines without asking the host back.
    pub fn new(
        host: H,
        settings: Settings,
        local_user: impl Into<String>,
        dispatcher: Dispatcher,
    ) -> Self {
        let local_user = local_user.into();
        Self {
            host,
            settings,
            memory: ConversationMemory::new(local_user.clone()),
            dispatcher,
            local_user,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Routes a registered command (by name or alias) to its handler.
    pub fn run_command(&mut self, name: &str, args: &str, conv: Option<&Conversation>) -> bool {
        if COMMANDS[0].matches(name) {
            self.translate_command(args, conv)
        } else if COMMANDS[1].matches(name) {
            self.set_incoming_lang_command(args)
        } else if COMMANDS[2].matches(name) {
            self.version_command()
        } else if COMMANDS[3].matches(name) {
            self.help_command()
        } else {
            self.host.output(&format!("Unknown command: {name}"));
            false
        }
    }

    /// The `/translate` command: `[TARGET_LANG] <text..>`.
    ///
    /// With text, the translation is sent as a new outgoing message. With
    /// a language token alone, the last remembered message of the active
    /// conversation is translated and echoed locally only; resending it
    /// would duplicate it under the wrong attribution.
    pub fn translate_command(&mut self, args: &str, conv: Option<&Conversation>) -> bool {
        let lowered = args.trim().to_lowercase();
        if matches!(lowered.as_str(), "version" | "-v" | "--version") {
            return self.version_command();
        }
        if matches!(lowered.as_str(), "help" | "-h" | "--help" | "?") {
            return self.help_command();
        }

        let mut tokens = args.split_whitespace();
        let Some(first) = tokens.next() else {
            self.host.output("Usage: /translate [TARGET_LANG] <text..>");
            return false;
        };

        // A first token that passes the syntactic check is taken as the
        // target language. Short all-alphabetic words ("ok", "how") pass
        // too; that ambiguity is accepted, the provider ignores unknown
        // codes.
        let first_clean = strip_wrapping_quotes(first);
        let (target, text) = if looks_like_lang(first_clean) {
            (Some(first_clean), tokens.collect::<Vec<_>>().join(" "))
        } else {
            (None, args.split_whitespace().collect::<Vec<_>>().join(" "))
        };
        let text = strip_wrapping_quotes(text.trim());

        if text.is_empty() {
            let Some(conv) = conv else {
                self.host.output("Nothing to translate");
                return false;
            };
            let Some(last) = self.memory.lookup(conv) else {
                self.host.output("No recent message to translate");
                return false;
            };
            let request = self.request_for(&last.text, target);
            self.dispatcher.dispatch(
                request,
                Route::Echo {
                    conv: conv.clone(),
                    label: None,
                },
                false,
            );
            return true;
        }

        let request = self.request_for(text, target);
        match conv {
            Some(conv) => self
                .dispatcher
                .dispatch(request, Route::Send(conv.clone()), false),
            None => self.dispatcher.dispatch(request, Route::Print, false),
        }
        true
    }

    pub fn version_command(&mut self) -> bool {
        self.host.output(&format!("polyglot v{VERSION}"));
        true
    }

    pub fn help_command(&mut self) -> bool {
        let auto = if self.settings.auto_translate_incoming {
            "on"
        } else {
            "off"
        };
        let lines = [
            format!("polyglot v{VERSION}"),
            String::new(),
            format!("Outgoing default target: {}", self.settings.target_lang),
            format!(
                "Incoming auto-translate: {auto} → {}",
                self.settings.auto_incoming_target_lang
            ),
            String::new(),
            "Usage:".to_string(),
            "  /tr [TARGET_LANG] <text..>         send translation".to_string(),
            "  /tr [TARGET_LANG]                  translate latest msg (local-only)".to_string(),
            "  @LANG text                         inline shortcut; sends translation".to_string(),
            "  @LANG                              translate latest msg (local-only)".to_string(),
            String::new(),
            "Utilities:".to_string(),
            "  /tri <TARGET_LANG>                 set incoming auto target".to_string(),
            "  /trver                             show version".to_string(),
            "  /tr help                           this help".to_string(),
            String::new(),
            "Examples:".to_string(),
            "  /tr FR how are you".to_string(),
            "  /tr \"DE\" \"how are you\"".to_string(),
            "  @ES buenos dias".to_string(),
            "  @EN-GB".to_string(),
        ];
        self.host.output(&lines.join("\n"));
        true
    }

    /// The `/trincoming` command: set the incoming auto-translate target.
    ///
    /// Rejects tokens that fail the syntactic check and leaves the setting
    /// unchanged in that case.
    pub fn set_incoming_lang_command(&mut self, args: &str) -> bool {
        let lang = args.trim().trim_matches(['"', '\'']);
        if !looks_like_lang(lang) {
            self.host
                .output("Invalid target language. Example: EN-GB, EN-US, DE, ES");
            return false;
        }
        self.settings.auto_incoming_target_lang = lang.to_string();
        self.host.save_settings(&self.settings);
        self.host
            .output(&format!("Incoming auto-translate target set to {lang}"));
        true
    }

    /// Feed every incoming chat line through here.
    ///
    /// Records the conversation's last message and, when enabled, kicks off
    /// a silent background translation whose result is echoed locally by
    /// [`deliver`](Self::deliver). The sender's original message is never
    /// altered.
    pub fn incoming_line(&mut self, conv: &Conversation, sender: &str, line: &str) {
        self.memory.record(conv, sender, line);

        if !self.settings.auto_translate_incoming || sender == self.local_user {
            return;
        }

        let target = self.settings.incoming_target().to_string();
        let request = TranslationRequest {
            text: line.to_string(),
            target_lang: target.clone(),
            api_key: self.settings.api_key.clone(),
            preserve_formatting: self.settings.preserve_formatting,
        };
        self.dispatcher.dispatch(
            request,
            Route::Notify {
                conv: conv.clone(),
                sender: sender.to_string(),
                original: line.to_string(),
                target,
            },
            true,
        );
    }

    /// Feed every outgoing chat line through here before transmission.
    ///
    /// Recognizes the inline shortcut:
    /// - `@FR hello` translates "hello" to FR and sends it; the typed line
    ///   itself is consumed.
    /// - `@FR` translates the conversation's last remembered message to FR
    ///   and echo it locally, tagged with the target code.
    ///
    /// Anything else is forwarded untouched.
    pub fn outgoing_line(&mut self, conv: &Conversation, line: &str) -> Disposition {
        let Some((target, rest)) = parse_shortcut(line) else {
            return Disposition::Forward;
        };
        if !looks_like_lang(target) {
            return Disposition::Forward;
        }

        debug!(target, "outgoing shortcut");
        let rest = rest.trim();
        if !rest.is_empty() {
            let request = self.request_for(rest, Some(target));
            self.dispatcher
                .dispatch(request, Route::Send(conv.clone()), false);
            return Disposition::Consumed;
        }

        let Some(last) = self.memory.lookup(conv) else {
            self.host.output("No recent message to translate");
            return Disposition::Consumed;
        };
        let label = format!("[{target}] {}: ", last.sender);
        let request = self.request_for(&last.text, Some(target));
        self.dispatcher.dispatch(
            request,
            Route::Echo {
                conv: conv.clone(),
                label: Some(label),
            },
            false,
        );
        Disposition::Consumed
    }

    /// Applies one finished translation on the main context.
    ///
    /// Failures are reported locally unless the completion was silent.
    /// Auto-translate notifications are dropped when they would add no
    /// value: the source already reads as English, or the translation is
    /// identical to the original.
    pub fn deliver(&mut self, done: Completion) {
        let translation = match done.result {
            Ok(translation) => translation,
            Err(err) => {
                if !done.silent {
                    self.host.output(&err.to_string());
                }
                return;
            }
        };
        if translation.text.is_empty() {
            // Providers occasionally answer with an empty text field.
            return;
        }

        match done.route {
            Route::Send(conv) => {
                let text = strip_wrapping_quotes(translation.text.trim());
                self.host.send(&conv, text);
            }
            Route::Echo { conv, label } => {
                let text = strip_wrapping_quotes(translation.text.trim());
                match label {
                    Some(label) => self.host.echo(&conv, &format!("{label}{text}")),
                    None => self.host.echo(&conv, text),
                }
            }
            Route::Print => {
                let text = strip_wrapping_quotes(translation.text.trim());
                self.host.output(text);
            }
            Route::Notify {
                conv,
                sender,
                original,
                target,
            } => {
                if translation.text.trim() == original.trim() {
                    return;
                }
                if let Some(detected) = &translation.detected_source
                    && detected.to_uppercase().starts_with("EN")
                {
                    return;
                }
                let detected = translation
                    .detected_source
                    .as_ref()
                    .map_or_else(|| "?".to_string(), |code| code.to_uppercase());
                self.host.echo(
                    &conv,
                    &format!("[{detected}→{target}] {sender}: {}", translation.text),
                );
            }
        }
    }

    fn request_for(&self, text: &str, target: Option<&str>) -> TranslationRequest {
        TranslationRequest {
            text: text.to_string(),
            target_lang: self.settings.resolve_target(target).to_string(),
            api_key: self.settings.api_key.clone(),
            preserve_formatting: self.settings.preserve_formatting,
        }
    }
}

/// Splits `@LANG [text..]` off the start of an outgoing line.
///
/// The token must start with a letter, continue with letters, hyphens, or
/// underscores, and stay within 2 to 10 characters; a longer run means the
/// line is ordinary chat text.
fn parse_shortcut(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('@')?;

    let token_end = rest
        .char_indices()
        .find(|(_, ch)| !(ch.is_alphabetic() || *ch == '-' || *ch == '_'))
        .map_or(rest.len(), |(idx, _)| idx);
    let token = &rest[..token_end];

    if !token.chars().next().is_some_and(char::is_alphabetic) {
        return None;
    }
    let len = token.chars().count();
    if !(2..=10).contains(&len) {
        return None;
    }

    Some((token, &rest[token_end..]))
}
