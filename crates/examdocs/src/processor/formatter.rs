use tracing::{debug, info_span, warn};

use super::{pdf, raster, ConversionEngine};
use crate::categorizer::DocumentType;
use crate::config::{DocumentFormatSpec, ExamConfig, OutputFormat};
use crate::error::ConvertError;
use crate::sanitize;

const PDF_MIME: &str = "application/pdf";

/// Built-in engine: resizes images to the exam's exact dimensions and
/// re-encodes them, wrapping into a PDF page when the exam asks for PDF.
#[derive(Debug, Default)]
pub struct DocumentFormatter {
    initialized: bool,
    config: Option<ExamConfig>,
}

impl DocumentFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn input_mime(bytes: &[u8], filename: &str) -> String {
        if pdf::is_pdf(bytes) {
            return PDF_MIME.to_string();
        }
        raster::sniff_mime(bytes)
            .map(str::to_string)
            .or_else(|| mime_guess::from_path(filename).first().map(|m| m.to_string()))
            .unwrap_or_else(|| "application/octet-stream".to_string())
    }

    fn check_input(config: &ExamConfig, bytes: &[u8], mime: &str) -> Result<(), ConvertError> {
        let limit_bytes = config.max_file_size_kb as u64 * 1024;
        if bytes.len() as u64 > limit_bytes {
            return Err(ConvertError::InputTooLarge {
                actual_kb: (bytes.len() as u64).div_ceil(1024),
                limit_kb: config.max_file_size_kb,
            });
        }

        if !config.accepts_input(mime) {
            return Err(ConvertError::DisallowedInput(mime.to_string()));
        }

        Ok(())
    }

    fn convert_pdf(bytes: &[u8], spec: &DocumentFormatSpec) -> Result<Vec<u8>, ConvertError> {
        match spec.format {
            OutputFormat::Pdf => {
                pdf::validate(bytes)?;
                Ok(bytes.to_vec())
            }
            _ => Err(ConvertError::UnsupportedConversion {
                from: PDF_MIME.to_string(),
                to: spec.format.mime_type().to_string(),
            }),
        }
    }

    fn convert_image(bytes: &[u8], spec: &DocumentFormatSpec) -> Result<Vec<u8>, ConvertError> {
        let img = raster::decode(bytes)?;
        let resized = raster::resize_exact(&img, spec.width, spec.height);
        let max_bytes = spec.max_size_kb as usize * 1024;

        match &spec.format {
            OutputFormat::Png => {
                let output = raster::encode_png(&resized)?;
                if output.len() > max_bytes {
                    warn!(
                        size_kb = output.len() / 1024,
                        max_size_kb = spec.max_size_kb,
                        "PNG output exceeds target size"
                    );
                }
                Ok(output)
            }
            OutputFormat::Pdf => {
                let jpeg = raster::encode_jpeg_within(&resized, spec.quality, max_bytes)?;
                pdf::wrap_jpeg(&jpeg, spec.width, spec.height, spec.dpi)
            }
            OutputFormat::Jpeg | OutputFormat::Other(_) => {
                raster::encode_jpeg_within(&resized, spec.quality, max_bytes)
            }
        }
    }
}

impl ConversionEngine for DocumentFormatter {
    fn initialize(&mut self) -> Result<(), ConvertError> {
        if !self.initialized {
            debug!("Document formatter initialized");
            self.initialized = true;
        }
        Ok(())
    }

    fn set_config(&mut self, config: &ExamConfig) {
        self.config = Some(config.clone());
    }

    fn convert(
        &self,
        bytes: &[u8],
        document_type: DocumentType,
        filename: &str,
    ) -> Result<Vec<u8>, ConvertError> {
        if !self.initialized {
            return Err(ConvertError::NotInitialized);
        }
        let config = self.config.as_ref().ok_or(ConvertError::NotConfigured)?;

        let _span = info_span!(
            "convert",
            file = %sanitize::redact_name(filename),
            document_type = %document_type,
        )
        .entered();

        let mime = Self::input_mime(bytes, filename);
        Self::check_input(config, bytes, &mime)?;

        let spec = config.format_for(document_type);
        let output = if mime == PDF_MIME {
            Self::convert_pdf(bytes, spec)?
        } else {
            Self::convert_image(bytes, spec)?
        };

        debug!(
            input_kb = bytes.len() / 1024,
            output_kb = output.len() / 1024,
            format = %spec.format,
            "Converted document"
        );

        Ok(output)
    }
}
