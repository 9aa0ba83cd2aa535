pub mod formatter;
pub mod pdf;
pub mod raster;

pub use formatter::DocumentFormatter;

use crate::categorizer::DocumentType;
use crate::config::ExamConfig;
use crate::error::ConvertError;

/// Converts one document's bytes into the exam's required output format.
///
/// The formatting orchestrator calls `initialize` before its first batch,
/// `set_config` at the start of every batch and `convert` once per file.
/// Calls never overlap on one engine.
pub trait ConversionEngine: Send {
    /// Prepares the engine. Calling it again after success is a no-op.
    fn initialize(&mut self) -> Result<(), ConvertError>;

    fn set_config(&mut self, config: &ExamConfig);

    fn convert(
        &self,
        bytes: &[u8],
        document_type: DocumentType,
        filename: &str,
    ) -> Result<Vec<u8>, ConvertError>;
}

impl<E: ConversionEngine + ?Sized> ConversionEngine for Box<E> {
    fn initialize(&mut self) -> Result<(), ConvertError> {
        (**self).initialize()
    }

    fn set_config(&mut self, config: &ExamConfig) {
        (**self).set_config(config)
    }

    fn convert(
        &self,
        bytes: &[u8],
        document_type: DocumentType,
        filename: &str,
    ) -> Result<Vec<u8>, ConvertError> {
        (**self).convert(bytes, document_type, filename)
    }
}
