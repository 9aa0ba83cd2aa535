pub mod channel;
pub mod isolate;
pub mod protocol;

pub use channel::{ChannelConfig, ClassificationChannel, DEFAULT_TIMEOUT};
pub use isolate::ClassifierWorker;
pub use protocol::{ClassifiedEntry, ClassifyEntry};
