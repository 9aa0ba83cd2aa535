use std::sync::Arc;

use tokio::sync::broadcast;

use crate::broadcast::BatchProgressEvent;

/// Receives batch progress as an integer percentage, 0-100.
///
/// Reporting is best-effort: implementations must not block or fail.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, percent: u8);
}

impl<F> ProgressReporter for F
where
    F: Fn(u8) + Send + Sync,
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// No-op reporter for callers that do not track progress.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _percent: u8) {}
}

/// Bridges progress reports to a broadcast channel.
pub struct BroadcastProgress {
    batch_id: String,
    sender: Arc<broadcast::Sender<BatchProgressEvent>>,
}

impl BroadcastProgress {
    pub fn new(batch_id: &str, sender: Arc<broadcast::Sender<BatchProgressEvent>>) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            sender,
        }
    }
}

impl ProgressReporter for BroadcastProgress {
    fn report(&self, percent: u8) {
        let _ = self
            .sender
            .send(BatchProgressEvent::new(&self.batch_id, percent));
    }
}
