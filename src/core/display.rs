//! Transient result displays
//!
//! Each open display has its own fire-once dismiss timer. All of them are
//! tracked here so refresh and quit can close them together.

use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use uuid::Uuid;

use crate::shared::types::char_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Result { show_both: bool },
    Info,
}

/// How long a display stays open before dismissing itself
pub fn dismiss_delay(kind: DisplayKind, text: &str) -> Duration {
    let len = char_count(text) as f64;
    let secs = match kind {
        DisplayKind::Result { show_both: true } => (len / 25.0).clamp(12.0, 30.0),
        DisplayKind::Result { show_both: false } => (len / 30.0).clamp(10.0, 25.0),
        DisplayKind::Info => (len / 40.0).clamp(8.0, 20.0),
    };
    Duration::from_secs_f64(secs)
}

struct OpenDisplay {
    kind: DisplayKind,
    timer: JoinHandle<()>,
}

#[derive(Default)]
pub struct DisplayRegistry {
    open: HashMap<Uuid, OpenDisplay>,
}

impl DisplayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new display and arm its dismiss timer.
    ///
    /// `expired(id)` is sent on `tx` once the delay elapses.
    pub fn open<M, F>(&mut self, kind: DisplayKind, text: &str, tx: &UnboundedSender<M>, expired: F) -> Uuid
    where
        M: Send + 'static,
        F: FnOnce(Uuid) -> M + Send + 'static,
    {
        let id = Uuid::new_v4();
        let delay = dismiss_delay(kind, text);
        let tx = tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(expired(id));
        });
        self.open.insert(id, OpenDisplay { kind, timer });
        log::debug!("[Display] Opened {} ({:?}, {:?})", id, kind, delay);
        id
    }

    /// Returns false when the display was already closed
    pub fn close(&mut self, id: Uuid) -> bool {
        match self.open.remove(&id) {
            Some(display) => {
                display.timer.abort();
                log::debug!("[Display] Closed {} ({:?})", id, display.kind);
                true
            }
            None => false,
        }
    }

    /// Close everything; returns the ids that were open
    pub fn close_all(&mut self) -> Vec<Uuid> {
        let ids: Vec<Uuid> = self.open.keys().copied().collect();
        for id in &ids {
            self.close(*id);
        }
        ids
    }

    pub fn is_open(&self, id: Uuid) -> bool {
        self.open.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_dismiss_delay_bounds() {
        let short = "ok";
        let long = "x".repeat(2000);

        assert_eq!(dismiss_delay(DisplayKind::Result { show_both: true }, short), Duration::from_secs(12));
        assert_eq!(dismiss_delay(DisplayKind::Result { show_both: true }, &long), Duration::from_secs(30));
        assert_eq!(dismiss_delay(DisplayKind::Result { show_both: false }, short), Duration::from_secs(10));
        assert_eq!(dismiss_delay(DisplayKind::Result { show_both: false }, &long), Duration::from_secs(25));
        assert_eq!(dismiss_delay(DisplayKind::Info, short), Duration::from_secs(8));
        assert_eq!(dismiss_delay(DisplayKind::Info, &long), Duration::from_secs(20));
    }

    #[test]
    fn test_dismiss_delay_scales_with_length() {
        let text = "x".repeat(500);
        assert_eq!(dismiss_delay(DisplayKind::Result { show_both: true }, &text), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut registry = DisplayRegistry::new();

        let id = registry.open(DisplayKind::Info, "Translating…", &tx, |id| id);
        assert!(registry.is_open(id));

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(rx.try_recv().unwrap(), id);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_all_cancels_timers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut registry = DisplayRegistry::new();

        let first = registry.open(DisplayKind::Info, "one", &tx, |id| id);
        let second = registry.open(DisplayKind::Result { show_both: true }, "two", &tx, |id| id);

        let mut closed = registry.close_all();
        closed.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(closed, expected);
        assert!(registry.is_empty());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(rx.try_recv().is_err());
        assert!(!registry.close(first));
    }
}
