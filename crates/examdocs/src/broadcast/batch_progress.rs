//! Batch progress broadcaster for real-time progress streaming.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Status of a batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Processing,
    Completed,
}

/// Progress event for a formatting batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProgressEvent {
    /// Identifier chosen by the caller for the batch.
    pub batch_id: String,
    /// Overall completion, 0-100.
    pub percent: u8,
    pub status: BatchStatus,
    pub timestamp: DateTime<Utc>,
}

impl BatchProgressEvent {
    pub fn new(batch_id: &str, percent: u8) -> Self {
        let percent = percent.min(100);
        let status = if percent == 100 {
            BatchStatus::Completed
        } else {
            BatchStatus::Processing
        };

        Self {
            batch_id: batch_id.to_string(),
            percent,
            status,
            timestamp: Utc::now(),
        }
    }
}

/// Broadcasts batch progress events to any number of subscribers.
#[derive(Clone)]
pub struct BatchProgressBroadcaster {
    sender: Arc<broadcast::Sender<BatchProgressEvent>>,
}

impl BatchProgressBroadcaster {
    /// Creates a new broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Sends a progress event to all subscribers.
    pub fn send(&self, event: BatchProgressEvent) {
        // No active receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BatchProgressEvent> {
        self.sender.subscribe()
    }

    /// Gets the inner sender for creating reporters.
    pub fn sender(&self) -> Arc<broadcast::Sender<BatchProgressEvent>> {
        Arc::clone(&self.sender)
    }
}

impl Default for BatchProgressBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}
