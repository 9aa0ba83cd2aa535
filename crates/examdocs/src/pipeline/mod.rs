pub mod formatting;
pub mod progress;
pub mod runner;

pub use formatting::FormattingOrchestrator;
pub use progress::{BroadcastProgress, NoopProgress, ProgressReporter};
pub use runner::Pipeline;
