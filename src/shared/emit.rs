use tokio::sync::mpsc::UnboundedSender;
use super::events::AppEvent;

/// Delivers application events to the presentation layer
#[derive(Clone)]
pub struct EventEmitter {
    tx: UnboundedSender<AppEvent>,
}

impl EventEmitter {
    pub fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }

    /// Emit an application event to the subscriber
    pub fn emit_event(&self, event: AppEvent) {
        let name = event.name();
        if let Err(e) = self.tx.send(event) {
            log::warn!("[Emit] Failed to emit {}: {}", name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_emit_delivers_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let emitter = EventEmitter::new(tx);

        emitter.emit_event(AppEvent::ShuttingDown);

        assert_eq!(rx.try_recv().unwrap(), AppEvent::ShuttingDown);
    }

    #[test]
    fn test_emit_after_subscriber_dropped_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        EventEmitter::new(tx).emit_event(AppEvent::ShuttingDown);
    }
}
