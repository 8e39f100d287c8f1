//! Command entry points into the pipeline
//!
//! `AppHandle` is the only way outside code mutates application state: each
//! method queues a named command on the controller task.

pub mod console;

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::core::controller::{Command, Message};
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::Language;

#[derive(Clone)]
pub struct AppHandle {
    tx: UnboundedSender<Message>,
}

impl AppHandle {
    pub fn new(tx: UnboundedSender<Message>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: Command) -> AppResult<()> {
        self.tx
            .send(Message::Command(command))
            .map_err(|_| AppError::System("Controller is not running".to_string()))
    }

    pub fn select_language(&self, code: &str) -> AppResult<()> {
        let lang = Language::parse(code)?;
        self.send(Command::SelectLanguage(lang))
    }

    pub fn toggle_auto_copy(&self) -> AppResult<()> {
        self.send(Command::ToggleAutoCopy)
    }

    pub fn toggle_pause(&self) -> AppResult<()> {
        self.send(Command::TogglePause)
    }

    pub fn translate_text(&self, text: impl Into<String>) -> AppResult<()> {
        self.send(Command::TranslateText(text.into()))
    }

    pub fn copy_original(&self, index: usize) -> AppResult<()> {
        self.send(Command::CopyOriginal(index))
    }

    pub fn copy_translation(&self, index: usize) -> AppResult<()> {
        self.send(Command::CopyTranslation(index))
    }

    pub fn close_display(&self, id: Uuid) -> AppResult<()> {
        self.send(Command::CloseDisplay(id))
    }

    pub fn refresh(&self) -> AppResult<()> {
        self.send(Command::Refresh)
    }

    pub fn quit(&self) -> AppResult<()> {
        self.send(Command::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn next_command(rx: &mut mpsc::UnboundedReceiver<Message>) -> Command {
        match rx.try_recv().unwrap() {
            Message::Command(command) => command,
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_select_language_validates_code() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = AppHandle::new(tx);

        handle.select_language("KO").unwrap();
        assert_eq!(next_command(&mut rx), Command::SelectLanguage(Language::Ko));

        assert!(matches!(handle.select_language("xx"), Err(AppError::Validation(_))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_after_controller_stopped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = AppHandle::new(tx);
        assert!(matches!(handle.refresh(), Err(AppError::System(_))));
    }
}
