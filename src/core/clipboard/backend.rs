use crate::shared::error::{AppError, AppResult};

/// A single plain-text clipboard slot
pub trait ClipboardBackend: Send {
    /// `Ok(None)` when the clipboard holds no text
    fn read_text(&mut self) -> AppResult<Option<String>>;

    fn write_text(&mut self, text: &str) -> AppResult<()>;
}

/// System clipboard via cli-clipboard
///
/// A fresh context is opened per call; holding one across ticks keeps a
/// stale handle on some platforms.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardBackend for SystemClipboard {
    fn read_text(&mut self) -> AppResult<Option<String>> {
        use cli_clipboard::{ClipboardContext, ClipboardProvider};

        let text = ClipboardContext::new()
            .and_then(|mut ctx| ctx.get_contents())
            .map_err(|e| AppError::Clipboard(e.to_string()))?;

        Ok(if text.is_empty() { None } else { Some(text) })
    }

    fn write_text(&mut self, text: &str) -> AppResult<()> {
        use cli_clipboard::{ClipboardContext, ClipboardProvider};

        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_string()))
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

#[cfg(test)]
pub use memory::MemoryClipboard;

#[cfg(test)]
mod memory {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Shared in-memory clipboard; clones observe the same slot
    #[derive(Debug, Clone, Default)]
    pub struct MemoryClipboard {
        slot: Arc<Mutex<Option<String>>>,
        writes: Arc<Mutex<usize>>,
        failing_reads: Arc<Mutex<usize>>,
    }

    impl MemoryClipboard {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&self, text: &str) {
            *self.slot.lock().unwrap() = Some(text.to_string());
        }

        pub fn get(&self) -> Option<String> {
            self.slot.lock().unwrap().clone()
        }

        pub fn write_count(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        /// Make the next `count` reads fail
        pub fn fail_next_reads(&self, count: usize) {
            *self.failing_reads.lock().unwrap() = count;
        }
    }

    impl ClipboardBackend for MemoryClipboard {
        fn read_text(&mut self) -> AppResult<Option<String>> {
            {
                let mut failing = self.failing_reads.lock().unwrap();
                if *failing > 0 {
                    *failing -= 1;
                    return Err(AppError::Clipboard("pasteboard unavailable".to_string()));
                }
            }
            Ok(self.get().filter(|text| !text.is_empty()))
        }

        fn write_text(&mut self, text: &str) -> AppResult<()> {
            self.set(text);
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }
}
