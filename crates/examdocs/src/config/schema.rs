use std::fmt;

use serde::{Deserialize, Serialize};

use crate::categorizer::DocumentType;

/// Per-exam output rules for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamConfig {
    #[serde(default)]
    pub name: String,
    /// Token used to build canonical file names.
    pub code: String,
    pub formats: ExamFormats,
    /// Largest accepted input file, in KB.
    #[serde(alias = "max_file_size", default = "default_max_file_size")]
    pub max_file_size_kb: u32,
    /// Accepted input mime types. Empty accepts everything.
    #[serde(default)]
    pub allowed_formats: Vec<String>,
    #[serde(default)]
    pub document_types: Vec<String>,
}

fn default_max_file_size() -> u32 {
    2048
}

impl ExamConfig {
    pub fn format_for(&self, document_type: DocumentType) -> &DocumentFormatSpec {
        self.formats.for_category(document_type.category())
    }

    /// Mime type of the formatted output for a document type.
    pub fn output_mime_type(&self, document_type: DocumentType) -> &'static str {
        self.format_for(document_type).format.mime_type()
    }

    pub fn accepts_input(&self, mime_type: &str) -> bool {
        self.allowed_formats.is_empty()
            || self
                .allowed_formats
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatCategory {
    Photo,
    Signature,
    Documents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamFormats {
    pub photo: DocumentFormatSpec,
    pub signature: DocumentFormatSpec,
    pub documents: DocumentFormatSpec,
}

impl ExamFormats {
    pub fn for_category(&self, category: FormatCategory) -> &DocumentFormatSpec {
        match category {
            FormatCategory::Photo => &self.photo,
            FormatCategory::Signature => &self.signature,
            FormatCategory::Documents => &self.documents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFormatSpec {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Target output size in KB.
    #[serde(alias = "max_size", default = "default_max_size")]
    pub max_size_kb: u32,
}

fn default_dpi() -> u32 {
    200
}

fn default_quality() -> u8 {
    85
}

fn default_max_size() -> u32 {
    500
}

/// Configured output container. Unrecognized names are kept verbatim and
/// encode as JPEG.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Pdf,
    Other(String),
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
            Self::Other(_) => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Jpeg | Self::Other(_) => "jpg",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Pdf => "PDF",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for OutputFormat {
    fn from(name: String) -> Self {
        match name.as_str() {
            "JPEG" => Self::Jpeg,
            "PNG" => Self::Png,
            "PDF" => Self::Pdf,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for OutputFormat {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
