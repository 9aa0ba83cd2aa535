//! Broadcasting of batch events for real-time streaming to UI collaborators.

pub mod batch_progress;

pub use batch_progress::{BatchProgressBroadcaster, BatchProgressEvent, BatchStatus};
