use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExamDocsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Unknown exam preset: {0}")]
    UnknownPreset(String),
}

/// Batch-wide failures of the classification channel.
///
/// Any of these rejects the whole batch; no record is modified.
#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("Classification did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Classification worker failed: {0}")]
    TransportFailure(String),

    #[error("A classification batch is already in flight")]
    Busy,

    #[error("Failed to spawn classification worker: {0}")]
    SpawnFailed(String),
}

/// Per-file failures of the conversion engine.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Conversion engine is not initialized")]
    NotInitialized,

    #[error("Configuration not set")]
    NotConfigured,

    #[error("Input is {actual_kb}KB, exceeds the {limit_kb}KB limit")]
    InputTooLarge { actual_kb: u64, limit_kb: u32 },

    #[error("Input type '{0}' is not accepted for this exam")]
    DisallowedInput(String),

    #[error("Cannot convert {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    #[error("Failed to process image: {0}")]
    ImageProcessing(String),

    #[error("Failed to process PDF: {0}")]
    PdfProcessing(String),

    #[error("Failed to read source '{name}': {source}")]
    ReadSource {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Conversion engine unavailable: {0}")]
    EngineUnavailable(String),
}

pub type Result<T> = std::result::Result<T, ExamDocsError>;
