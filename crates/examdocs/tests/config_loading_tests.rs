//! Table-driven tests for exam configuration loading and validation.

use std::io::Write;

use examdocs::config::{load_config, load_config_from_str, preset};
use examdocs::{ConfigError, DocumentType, OutputFormat};
use tempfile::NamedTempFile;

/// Represents a single config loading test case.
struct ConfigTestCase {
    /// Test case name for identification.
    name: &'static str,
    /// The config JSON content to test.
    config_json: &'static str,
    /// Whether loading should succeed.
    should_succeed: bool,
    /// Expected error substring (if should_succeed is false).
    expected_error: Option<&'static str>,
}

const CONFIG_TESTS: &[ConfigTestCase] = &[
    ConfigTestCase {
        name: "valid_minimal",
        config_json: r#"{
            "code": "SSC",
            "formats": {
                "photo": { "format": "JPEG", "width": 200, "height": 230 },
                "signature": { "format": "JPEG", "width": 140, "height": 60 },
                "documents": { "format": "PDF", "width": 600, "height": 800 }
            }
        }"#,
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "valid_with_original_field_names",
        config_json: r#"{
            "name": "Staff Selection",
            "code": "SSC",
            "formats": {
                "photo": { "format": "JPEG", "width": 200, "height": 230, "dpi": 200, "quality": 80, "max_size": 100 },
                "signature": { "format": "PNG", "width": 140, "height": 60, "max_size": 30 },
                "documents": { "format": "WEBP", "width": 600, "height": 800 }
            },
            "max_file_size": 1024,
            "allowed_formats": ["image/jpeg"],
            "document_types": ["photo", "signature"]
        }"#,
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "invalid_json",
        config_json: r#"{ "code": "SSC", "#,
        should_succeed: false,
        expected_error: Some("parse"),
    },
    ConfigTestCase {
        name: "missing_formats",
        config_json: r#"{ "code": "SSC" }"#,
        should_succeed: false,
        expected_error: Some("formats"),
    },
    ConfigTestCase {
        name: "empty_code",
        config_json: r#"{
            "code": "  ",
            "formats": {
                "photo": { "format": "JPEG", "width": 1, "height": 1 },
                "signature": { "format": "JPEG", "width": 1, "height": 1 },
                "documents": { "format": "JPEG", "width": 1, "height": 1 }
            }
        }"#,
        should_succeed: false,
        expected_error: Some("must not be empty"),
    },
    ConfigTestCase {
        name: "code_with_separator",
        config_json: r#"{
            "code": "../etc",
            "formats": {
                "photo": { "format": "JPEG", "width": 1, "height": 1 },
                "signature": { "format": "JPEG", "width": 1, "height": 1 },
                "documents": { "format": "JPEG", "width": 1, "height": 1 }
            }
        }"#,
        should_succeed: false,
        expected_error: Some("path separators"),
    },
    ConfigTestCase {
        name: "zero_width",
        config_json: r#"{
            "code": "SSC",
            "formats": {
                "photo": { "format": "JPEG", "width": 0, "height": 1 },
                "signature": { "format": "JPEG", "width": 1, "height": 1 },
                "documents": { "format": "JPEG", "width": 1, "height": 1 }
            }
        }"#,
        should_succeed: false,
        expected_error: Some("photo: dimensions"),
    },
    ConfigTestCase {
        name: "quality_out_of_range",
        config_json: r#"{
            "code": "SSC",
            "formats": {
                "photo": { "format": "JPEG", "width": 1, "height": 1 },
                "signature": { "format": "JPEG", "width": 1, "height": 1, "quality": 101 },
                "documents": { "format": "JPEG", "width": 1, "height": 1 }
            }
        }"#,
        should_succeed: false,
        expected_error: Some("signature: quality"),
    },
];

#[test]
fn test_config_loading_table() {
    for test_case in CONFIG_TESTS {
        let result = load_config_from_str(test_case.config_json);

        if test_case.should_succeed {
            assert!(
                result.is_ok(),
                "Test '{}': expected success, got {:?}",
                test_case.name,
                result.err()
            );
            continue;
        }

        let err = match result {
            Ok(_) => panic!("Test '{}': expected failure", test_case.name),
            Err(e) => e.to_string(),
        };
        if let Some(expected) = test_case.expected_error {
            assert!(
                err.contains(expected),
                "Test '{}': expected error containing '{}', got '{}'",
                test_case.name,
                expected,
                err
            );
        }
    }
}

#[test]
fn test_original_field_names_map_onto_schema() {
    let config = load_config_from_str(CONFIG_TESTS[1].config_json).unwrap();

    assert_eq!(config.name, "Staff Selection");
    assert_eq!(config.max_file_size_kb, 1024);
    assert_eq!(config.formats.photo.max_size_kb, 100);
    assert_eq!(config.formats.signature.format, OutputFormat::Png);
    assert_eq!(
        config.formats.documents.format,
        OutputFormat::Other("WEBP".to_string())
    );
    assert_eq!(config.output_mime_type(DocumentType::Marksheet), "image/jpeg");
}

#[test]
fn test_defaults_applied() {
    let config = load_config_from_str(CONFIG_TESTS[0].config_json).unwrap();

    assert_eq!(config.max_file_size_kb, 2048);
    assert!(config.allowed_formats.is_empty());
    assert_eq!(config.formats.photo.dpi, 200);
    assert_eq!(config.formats.photo.quality, 85);
    assert_eq!(config.formats.photo.max_size_kb, 500);
}

#[test]
fn test_load_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", CONFIG_TESTS[0].config_json).unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.code, "SSC");
}

#[test]
fn test_load_config_missing_file() {
    let err = load_config("/nonexistent/exam.json").unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_presets_round_trip_through_json() {
    for code in ["upsc", "NEET"] {
        let config = preset(code).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let loaded = load_config_from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }
}

#[test]
fn test_unknown_preset() {
    assert!(matches!(
        preset("cbse"),
        Err(ConfigError::UnknownPreset(code)) if code == "cbse"
    ));
}
