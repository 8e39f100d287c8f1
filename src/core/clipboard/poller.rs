use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

/// Periodic clipboard tick with explicit start/stop
pub struct Poller {
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self { interval, task: None }
    }

    /// Start sending `tick` every interval. Restarts if already running.
    pub fn start<M>(&mut self, tx: UnboundedSender<M>, tick: M)
    where
        M: Clone + Send + 'static,
    {
        self.stop();

        let period = self.interval;
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(tick.clone()).is_err() {
                    break;
                }
            }
        }));
        log::debug!("[Poller] Started ({:?})", period);
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("[Poller] Stopped");
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_stopped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut poller = Poller::new(Duration::from_millis(400));

        poller.start(tx, ());
        assert!(poller.is_running());

        time::sleep(Duration::from_millis(1300)).await;
        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);

        poller.stop();
        assert!(!poller.is_running());
        time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }
}
