//! Line-oriented console front end
//!
//! Reads commands from stdin and prints presentation events to stdout.

use std::io::BufRead;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::AppHandle;
use crate::core::controller::Command;
use crate::shared::error::{AppError, AppResult};
use crate::shared::events::AppEvent;
use crate::shared::types::Language;

pub const USAGE: &str = "commands: translate <text> | lang <en|es|ko|vi|ja|de|fr> | auto | pause | \
copy-orig <n> | copy-trans <n> | refresh | quit | help";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Command(Command),
    Help,
}

fn parse_index(arg: &str) -> AppResult<usize> {
    arg.trim()
        .parse::<usize>()
        .map_err(|_| AppError::Validation(format!("Expected a history index, got '{}'", arg.trim())))
}

/// Parse one line of console input. Blank lines yield `None`.
pub fn parse_line(line: &str) -> AppResult<Option<ConsoleInput>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "translate" | "t" => {
            if rest.is_empty() {
                return Err(AppError::Validation("Nothing to translate".to_string()));
            }
            Command::TranslateText(rest.to_string())
        }
        "lang" | "l" => Command::SelectLanguage(Language::parse(rest)?),
        "auto" | "a" => Command::ToggleAutoCopy,
        "pause" | "resume" | "p" => Command::TogglePause,
        "copy-orig" => Command::CopyOriginal(parse_index(rest)?),
        "copy-trans" => Command::CopyTranslation(parse_index(rest)?),
        "refresh" | "r" => Command::Refresh,
        "quit" | "q" | "exit" => Command::Quit,
        "help" | "?" => return Ok(Some(ConsoleInput::Help)),
        other => return Err(AppError::Validation(format!("Unknown command '{}'", other))),
    };
    Ok(Some(ConsoleInput::Command(command)))
}

/// Human-readable rendering of an event; `None` for events not worth printing
pub fn format_event(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::TranslationReady(ready) => {
            let title = format!("{} → {}", ready.source_lang.to_uppercase(), ready.target_lang.to_uppercase());
            if ready.show_both {
                Some(format!("[{}]\n  {}\n  {}", title, ready.original, ready.translated))
            } else {
                Some(format!("[{}]\n  {}", title, ready.translated))
            }
        }
        AppEvent::InfoMessage { text, .. } => Some(format!("[Translator]\n  {}", text.replace('\n', "\n  "))),
        AppEvent::MenuUpdated { status, .. } => Some(format!(
            "<{}> auto-copy:{} paused:{}",
            status.language_code,
            if status.auto_copy { "on" } else { "off" },
            if status.paused { "yes" } else { "no" }
        )),
        AppEvent::HistoryChanged(entries) => Some(
            entries
                .iter()
                .enumerate()
                .map(|(i, entry)| format!("  {}. {} {}", i, entry.direction_label(), entry.original))
                .collect::<Vec<_>>()
                .join("\n"),
        )
        .filter(|s| !s.is_empty())
        .map(|s| format!("history:\n{}", s)),
        AppEvent::ShuttingDown => Some("bye".to_string()),
        AppEvent::TargetLanguageChanged(_) | AppEvent::ModesChanged { .. } | AppEvent::DisplayClosed(_) => None,
    }
}

fn print_event(event: &AppEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("[Console] Failed to serialize {}: {}", event.name(), e),
        }
    } else if let Some(text) = format_event(event) {
        println!("{}", text);
    }
}

/// Forward stdin lines from a plain thread.
///
/// The thread is never joined, so a read blocked on an interactive
/// terminal cannot hold up shutdown.
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("console-stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        log::warn!("[Console] Failed to read stdin: {}", e);
                        return;
                    }
                }
            }
        });
    if let Err(e) = spawned {
        log::warn!("[Console] Failed to start stdin reader: {}", e);
    }
    rx
}

fn handle_line(handle: &AppHandle, line: &str) {
    match parse_line(line) {
        Ok(Some(ConsoleInput::Command(command))) => {
            if let Err(e) = handle.send(command) {
                log::warn!("[Console] {}", e);
            }
        }
        Ok(Some(ConsoleInput::Help)) => println!("{}", USAGE),
        Ok(None) => {}
        Err(e) => println!("{}\n{}", e, USAGE),
    }
}

/// Run until the event stream closes
pub async fn run(handle: AppHandle, events: UnboundedReceiver<AppEvent>, json: bool) {
    serve(handle, events, spawn_stdin_reader(), json).await
}

async fn serve(
    handle: AppHandle,
    mut events: UnboundedReceiver<AppEvent>,
    mut lines: UnboundedReceiver<String>,
    json: bool,
) {
    let mut input_open = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => print_event(&event, json),
                None => break,
            },
            line = lines.recv(), if input_open => match line {
                Some(line) => handle_line(&handle, &line),
                None => {
                    log::debug!("[Console] stdin closed, still watching the clipboard");
                    input_open = false;
                }
            },
        }
    }
}
