//! Terminal demo host for the polyglot plugin.
//!
//! Simulates a single chat room on the command line: plain input is an
//! outgoing chat line (so `@LANG` shortcuts work), `/recv` injects an
//! incoming line from a fake peer, and the plugin's commands are available
//! under their registered names (`/tr`, `/tri`, `/trver`, `/trhelp`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use inquire::Text;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use polyglot::config::SettingsManager;
use polyglot::dispatch::{Completion, Dispatcher};
use polyglot::host::{ChatHost, Conversation, Disposition};
use polyglot::plugin::TranslatorPlugin;
use polyglot::settings::{SETTING_DESCRIPTORS, Settings};
use polyglot::translation::DeepLClient;
use polyglot::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "polyglot")]
#[command(about = "Terminal demo host for the polyglot chat-translation plugin")]
#[command(version)]
struct Args {
    /// Local username for the simulated session
    #[arg(short = 'u', long, default_value = "you")]
    user: String,

    /// Simulated chat room name
    #[arg(short = 'r', long, default_value = "lobby")]
    room: String,

    /// Override the default outgoing target language
    #[arg(short = 't', long = "to")]
    to: Option<String>,

    /// Settings file path (defaults to the XDG config location)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

/// A host that renders everything into the terminal.
struct TerminalHost {
    manager: SettingsManager,
}

impl ChatHost for TerminalHost {
    fn send(&mut self, conv: &Conversation, text: &str) {
        println!(
            "{} {} {text}",
            Style::label(format!("[{}]", conv.name())),
            Style::sender("you:")
        );
    }

    fn echo(&mut self, conv: &Conversation, text: &str) {
        println!(
            "{} {}",
            Style::label(format!("[{}]", conv.name())),
            Style::echo(text)
        );
    }

    fn output(&mut self, text: &str) {
        println!("{}", Style::secondary(text));
    }

    fn save_settings(&mut self, settings: &Settings) {
        if let Err(err) = self.manager.save(settings) {
            warn!("failed to persist settings: {err:#}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let manager = args
        .config
        .clone()
        .map_or_else(SettingsManager::new, SettingsManager::at_path);
    let mut settings = manager.load_or_default();
    if settings.api_key.is_empty()
        && let Ok(key) = std::env::var("DEEPL_API_KEY")
    {
        settings.api_key = key;
    }
    if let Some(to) = args.to.clone() {
        settings.target_lang = to;
    }

    let room = Conversation::Room(args.room.clone());
    let (dispatcher, completions) = Dispatcher::new(DeepLClient::new());
    let plugin = TranslatorPlugin::new(
        TerminalHost { manager },
        settings,
        args.user.clone(),
        dispatcher,
    );

    print_banner(&plugin, &args.room);
    run_repl(plugin, completions, room, args.user).await
}

fn print_banner(plugin: &TranslatorPlugin<TerminalHost>, room: &str) {
    println!(
        "{} {} - chat translation demo",
        Style::header("polyglot"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "  {} {}   {} {}",
        Style::label("room"),
        Style::value(room),
        Style::label("target"),
        Style::code(&plugin.settings().target_lang)
    );
    if plugin.settings().api_key.is_empty() {
        println!(
            "  {}",
            Style::error("no API key configured; set DEEPL_API_KEY or edit the config file")
        );
    }
    println!();
}

fn print_config(plugin: &TranslatorPlugin<TerminalHost>) {
    let settings = plugin.settings();
    println!("{}", Style::header("Configuration"));
    for descriptor in SETTING_DESCRIPTORS {
        let value = match descriptor.key {
            "api_key" if settings.api_key.is_empty() => "(unset)".to_string(),
            "api_key" => "(set)".to_string(),
            "target_lang" => settings.target_lang.clone(),
            "preserve_formatting" => settings.preserve_formatting.to_string(),
            "auto_translate_incoming" => settings.auto_translate_incoming.to_string(),
            "auto_incoming_target_lang" => settings.auto_incoming_target_lang.clone(),
            _ => String::new(),
        };
        println!(
            "  {:26} {}",
            Style::label(descriptor.key),
            Style::value(value)
        );
    }
    println!();
}

async fn run_repl(
    mut plugin: TranslatorPlugin<TerminalHost>,
    mut completions: UnboundedReceiver<Completion>,
    room: Conversation,
    user: String,
) -> Result<()> {
    let mut prompt = spawn_prompt();

    loop {
        tokio::select! {
            line = &mut prompt => {
                match line? {
                    Ok(line) => {
                        if !handle_line(&mut plugin, &room, &user, line.trim()) {
                            break;
                        }
                        prompt = spawn_prompt();
                    }
                    Err(
                        inquire::InquireError::OperationCanceled
                        | inquire::InquireError::OperationInterrupted,
                    ) => break,
                    Err(err) => return Err(err.into()),
                }
            }
            Some(done) = completions.recv() => {
                plugin.deliver(done);
            }
        }
    }

    println!("{}", Style::secondary("bye"));
    Ok(())
}

fn spawn_prompt() -> tokio::task::JoinHandle<Result<String, inquire::InquireError>> {
    tokio::task::spawn_blocking(|| {
        Text::new("")
            .with_help_message("chat text, @LANG shortcut, /trhelp for commands, Ctrl+C to quit")
            .prompt()
    })
}

/// Interprets one line of REPL input. Returns `false` to quit.
fn handle_line(
    plugin: &mut TranslatorPlugin<TerminalHost>,
    room: &Conversation,
    user: &str,
    line: &str,
) -> bool {
    if line.is_empty() {
        return true;
    }

    if let Some(rest) = line.strip_prefix('/') {
        let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        match name {
            "quit" | "exit" | "q" => return false,
            "config" => print_config(plugin),
            "recv" => {
                let (sender, text) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
                if sender.is_empty() || text.is_empty() {
                    println!("{}", Style::error("Usage: /recv <sender> <text..>"));
                } else {
                    println!("{} {text}", Style::sender(format!("{sender}:")));
                    plugin.incoming_line(room, sender, text);
                }
            }
            _ => {
                plugin.run_command(name, args.trim(), Some(room));
            }
        }
        return true;
    }

    match plugin.outgoing_line(room, line) {
        Disposition::Consumed => {}
        Disposition::Forward => println!("{} {line}", Style::sender(format!("{user}:"))),
    }
    true
}
