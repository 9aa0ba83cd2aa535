//! Built-in exam configurations.

use crate::error::ConfigError;

use super::schema::{DocumentFormatSpec, ExamConfig, ExamFormats, OutputFormat};

pub const PRESET_CODES: &[&str] = &["upsc", "neet"];

/// Looks up a built-in exam configuration by code.
pub fn preset(code: &str) -> Result<ExamConfig, ConfigError> {
    match code.to_lowercase().as_str() {
        "upsc" => Ok(upsc()),
        "neet" => Ok(neet()),
        _ => Err(ConfigError::UnknownPreset(code.to_string())),
    }
}

fn jpeg(width: u32, height: u32, dpi: u32, quality: u8, max_size_kb: u32) -> DocumentFormatSpec {
    DocumentFormatSpec {
        format: OutputFormat::Jpeg,
        width,
        height,
        dpi,
        quality,
        max_size_kb,
    }
}

pub fn upsc() -> ExamConfig {
    ExamConfig {
        name: "UPSC".to_string(),
        code: "upsc".to_string(),
        formats: ExamFormats {
            photo: jpeg(300, 400, 300, 85, 200),
            signature: jpeg(300, 100, 300, 85, 50),
            documents: jpeg(800, 1200, 200, 80, 500),
        },
        max_file_size_kb: 2048,
        allowed_formats: vec!["image/jpeg".to_string(), "image/png".to_string()],
        document_types: vec![
            "photo".to_string(),
            "signature".to_string(),
            "aadhaar".to_string(),
            "marksheet".to_string(),
        ],
    }
}

pub fn neet() -> ExamConfig {
    ExamConfig {
        name: "NEET".to_string(),
        code: "neet".to_string(),
        formats: ExamFormats {
            photo: jpeg(200, 230, 200, 80, 100),
            signature: jpeg(200, 80, 200, 80, 30),
            documents: jpeg(600, 800, 150, 75, 300),
        },
        max_file_size_kb: 1024,
        allowed_formats: vec!["image/jpeg".to_string(), "image/png".to_string()],
        document_types: vec![
            "photo".to_string(),
            "signature".to_string(),
            "class10_marksheet".to_string(),
            "class12_marksheet".to_string(),
        ],
    }
}
