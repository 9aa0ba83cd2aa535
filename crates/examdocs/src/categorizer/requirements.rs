//! Per-exam document requirements.

use serde::{Deserialize, Serialize};

use super::document_type::DocumentType;

/// Document type names each known exam asks for. Some names are more
/// specific than the classifier can detect (e.g. `class10_marksheet`); a
/// detected type only counts as required on an exact name match.
const EXAM_REQUIREMENTS: &[(&str, &[&str])] = &[
    (
        "upsc",
        &[
            "photo",
            "signature",
            "aadhaar",
            "marksheet",
            "certificate",
            "caste_certificate",
        ],
    ),
    (
        "neet",
        &[
            "photo",
            "signature",
            "class10_marksheet",
            "class12_marksheet",
            "aadhaar",
        ],
    ),
    (
        "jee",
        &[
            "photo",
            "signature",
            "class10_certificate",
            "class12_certificate",
            "aadhaar",
        ],
    ),
    (
        "cat",
        &[
            "photo",
            "signature",
            "graduation_certificate",
            "aadhaar",
            "category_certificate",
        ],
    ),
    (
        "gate",
        &["photo", "signature", "graduation_certificate", "aadhaar"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementCheck {
    pub required: bool,
    pub message: String,
}

/// Document type names required by the exam; empty for unknown exams.
pub fn exam_requirements(exam_code: &str) -> &'static [&'static str] {
    EXAM_REQUIREMENTS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(exam_code))
        .map(|(_, types)| *types)
        .unwrap_or(&[])
}

pub fn check(exam_code: &str, document_type: DocumentType) -> RequirementCheck {
    let required = exam_requirements(exam_code).contains(&document_type.as_str());
    let message = if required {
        format!(
            "Document type '{}' is required for {}",
            document_type,
            exam_code.to_uppercase()
        )
    } else {
        format!(
            "Document type '{}' may not be required for {}",
            document_type,
            exam_code.to_uppercase()
        )
    };

    RequirementCheck { required, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_document() {
        let result = check("upsc", DocumentType::Photo);
        assert!(result.required);
        assert_eq!(result.message, "Document type 'photo' is required for UPSC");
    }

    #[test]
    fn test_not_required_document() {
        let result = check("neet", DocumentType::Marksheet);
        assert!(!result.required);
        assert_eq!(
            result.message,
            "Document type 'marksheet' may not be required for NEET"
        );
    }

    #[test]
    fn test_exam_code_case_insensitive() {
        assert!(check("GATE", DocumentType::Aadhaar).required);
    }

    #[test]
    fn test_unknown_exam_has_no_requirements() {
        assert!(exam_requirements("xyz").is_empty());
        assert!(!check("xyz", DocumentType::Photo).required);
    }
}
