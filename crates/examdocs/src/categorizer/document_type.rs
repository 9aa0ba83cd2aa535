use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::schema::FormatCategory;

/// Document type tag assigned by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Aadhaar,
    Photo,
    Signature,
    Marksheet,
    Certificate,
    CasteCertificate,
    IncomeCertificate,
    Document,
}

impl DocumentType {
    pub const ALL: [DocumentType; 8] = [
        Self::Aadhaar,
        Self::Photo,
        Self::Signature,
        Self::Marksheet,
        Self::Certificate,
        Self::CasteCertificate,
        Self::IncomeCertificate,
        Self::Document,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::Photo => "photo",
            Self::Signature => "signature",
            Self::Marksheet => "marksheet",
            Self::Certificate => "certificate",
            Self::CasteCertificate => "caste_certificate",
            Self::IncomeCertificate => "income_certificate",
            Self::Document => "document",
        }
    }

    /// Noun used in canonical file names, e.g. `upsc_photograph`.
    pub fn file_noun(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar_card",
            Self::Photo => "photograph",
            Self::Signature => "signature",
            Self::Marksheet => "marksheet",
            Self::Certificate => "certificate",
            Self::CasteCertificate => "caste_certificate",
            Self::IncomeCertificate => "income_certificate",
            Self::Document => "document",
        }
    }

    /// Output format category this type is formatted under.
    pub fn category(&self) -> FormatCategory {
        match self {
            Self::Photo => FormatCategory::Photo,
            Self::Signature => FormatCategory::Signature,
            _ => FormatCategory::Documents,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDocumentType(pub String);

impl fmt::Display for UnknownDocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown document type '{}'", self.0)
    }
}

impl std::error::Error for UnknownDocumentType {}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}
