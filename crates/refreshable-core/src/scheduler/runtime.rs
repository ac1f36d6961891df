use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{Scheduler, TimerEvent, TimerHandle};

/// Scheduler backed by the tokio timer wheel
///
/// Each timer is a spawned task that sleeps and then sends its event on an
/// unbounded channel. The receiving end belongs to the UI loop.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TokioScheduler {
    pub fn new(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self { event_tx }
    }

    /// Create a scheduler together with the receiver its events arrive on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, event: TimerEvent) -> TimerHandle {
        let tx = self.event_tx.clone();
        debug!(delay_ms = delay.as_millis(), ?event, "Scheduling timer");

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(event).is_err() {
                warn!("Failed to deliver timer event: receiver dropped");
            }
        });

        let abort = task.abort_handle();
        TimerHandle::new(move || abort.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Instant};

    #[tokio::test(start_paused = true)]
    async fn test_event_arrives_after_delay() {
        let (scheduler, mut rx) = TokioScheduler::channel();
        let start = Instant::now();

        let _handle = scheduler.schedule(
            Duration::from_secs(2),
            TimerEvent::RefreshDue { generation: 7 },
        );

        let event = rx.recv().await.unwrap();
        assert_eq!(event, TimerEvent::RefreshDue { generation: 7 });
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (scheduler, mut rx) = TokioScheduler::channel();

        let handle = scheduler.schedule(
            Duration::from_secs(2),
            TimerEvent::RefreshDue { generation: 1 },
        );
        handle.cancel();

        let result = timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(result.is_err());
    }
}
