pub mod broadcast;
pub mod categorizer;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod processor;
pub mod record;
pub mod sanitize;
pub mod worker;

pub use broadcast::{BatchProgressBroadcaster, BatchProgressEvent};
pub use categorizer::{DocumentClassifier, DocumentType, NamingIndex, PatternClassifier};
pub use config::{load_config, preset, ExamConfig, OutputFormat};
pub use error::{ClassificationError, ConfigError, ConvertError, ExamDocsError, Result};
pub use pipeline::{FormattingOrchestrator, NoopProgress, Pipeline, ProgressReporter};
pub use processor::{ConversionEngine, DocumentFormatter};
pub use record::{FileRecord, FileSource, FileStatus, FormattedOutput};
pub use worker::{ChannelConfig, ClassificationChannel};
