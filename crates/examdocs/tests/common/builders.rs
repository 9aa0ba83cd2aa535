//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Mutex;

use examdocs::config::{DocumentFormatSpec, ExamConfig, ExamFormats, OutputFormat};
use examdocs::FileRecord;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Builder for creating `ExamConfig` instances.
pub struct ExamConfigBuilder {
    config: ExamConfig,
}

impl ExamConfigBuilder {
    /// Create a new builder with small JPEG targets for every category.
    pub fn new(code: &str) -> Self {
        let spec = |width, height| DocumentFormatSpec {
            format: OutputFormat::Jpeg,
            width,
            height,
            dpi: 100,
            quality: 80,
            max_size_kb: 100,
        };

        Self {
            config: ExamConfig {
                name: code.to_uppercase(),
                code: code.to_string(),
                formats: ExamFormats {
                    photo: spec(40, 50),
                    signature: spec(60, 20),
                    documents: spec(80, 120),
                },
                max_file_size_kb: 1024,
                allowed_formats: vec![],
                document_types: vec![],
            },
        }
    }

    pub fn photo_format(mut self, format: OutputFormat) -> Self {
        self.config.formats.photo.format = format;
        self
    }

    pub fn signature_format(mut self, format: OutputFormat) -> Self {
        self.config.formats.signature.format = format;
        self
    }

    pub fn documents_format(mut self, format: OutputFormat) -> Self {
        self.config.formats.documents.format = format;
        self
    }

    pub fn max_file_size_kb(mut self, kb: u32) -> Self {
        self.config.max_file_size_kb = kb;
        self
    }

    pub fn allowed_formats(mut self, formats: &[&str]) -> Self {
        self.config.allowed_formats = formats.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn build(self) -> ExamConfig {
        self.config
    }
}

/// Creates in-memory records, one per name, with the given payload.
pub fn records(names: &[&str], payload: &[u8]) -> Vec<FileRecord> {
    names
        .iter()
        .map(|name| FileRecord::from_bytes(*name, payload.to_vec()))
        .collect()
}

/// A gradient image encoded as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

/// Collects every progress value reported.
#[derive(Default)]
pub struct ProgressLog {
    values: Mutex<Vec<u8>>,
}

impl ProgressLog {
    pub fn values(&self) -> Vec<u8> {
        self.values.lock().unwrap().clone()
    }
}

impl examdocs::ProgressReporter for ProgressLog {
    fn report(&self, percent: u8) {
        self.values.lock().unwrap().push(percent);
    }
}
