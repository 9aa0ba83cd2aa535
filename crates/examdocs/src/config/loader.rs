use std::path::Path;

use crate::error::ConfigError;

use super::schema::{DocumentFormatSpec, ExamConfig};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExamConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<ExamConfig, ConfigError> {
    let config: ExamConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &ExamConfig) -> Result<(), ConfigError> {
    if config.code.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "Exam code must not be empty".to_string(),
        });
    }

    if config
        .code
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(ConfigError::Validation {
            message: format!(
                "Exam code '{}' must not contain path separators or whitespace",
                config.code
            ),
        });
    }

    if config.max_file_size_kb == 0 {
        return Err(ConfigError::Validation {
            message: "max_file_size_kb must be greater than 0".to_string(),
        });
    }

    validate_format("photo", &config.formats.photo)?;
    validate_format("signature", &config.formats.signature)?;
    validate_format("documents", &config.formats.documents)?;

    Ok(())
}

fn validate_format(category: &str, spec: &DocumentFormatSpec) -> Result<(), ConfigError> {
    if spec.width == 0 || spec.height == 0 {
        return Err(ConfigError::Validation {
            message: format!(
                "{}: dimensions must be non-zero, got {}x{}",
                category, spec.width, spec.height
            ),
        });
    }

    if spec.quality == 0 || spec.quality > 100 {
        return Err(ConfigError::Validation {
            message: format!("{}: quality must be 1-100, got {}", category, spec.quality),
        });
    }

    if spec.dpi == 0 {
        return Err(ConfigError::Validation {
            message: format!("{}: dpi must be greater than 0", category),
        });
    }

    if spec.max_size_kb == 0 {
        return Err(ConfigError::Validation {
            message: format!("{}: max_size_kb must be greater than 0", category),
        });
    }

    Ok(())
}
