//! Static classification tables.
//!
//! Both tables are ordered association lists. Declaration order is the
//! match order: the first rule (and within it the first pattern) that
//! matches wins.

use super::document_type::DocumentType;

/// A rule maps one document type to an ordered list of regex patterns.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pub document_type: DocumentType,
    pub patterns: Vec<String>,
}

impl ClassificationRule {
    pub fn new(document_type: DocumentType, patterns: &[&str]) -> Self {
        Self {
            document_type,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

pub(crate) const DEFAULT_RULES: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::Aadhaar,
        &[
            r"aadhaar|आधार|aadhar",
            r"\d{4}\s*\d{4}\s*\d{4}",
            r"government of india",
            r"unique identification authority",
            r"uid|uidai",
        ],
    ),
    (
        DocumentType::Photo,
        &[
            r"photograph|photo|pic",
            r"passport.*size",
            r"recent.*photo",
            r"headshot",
            r"portrait",
        ],
    ),
    (
        DocumentType::Signature,
        &[
            r"signature|sign",
            r"specimen.*signature",
            r"thumb.*impression",
            r"autograph",
        ],
    ),
    (
        DocumentType::Marksheet,
        &[
            r"mark.*sheet|marksheet",
            r"grade.*sheet|gradesheet",
            r"transcript",
            r"examination.*result",
            r"board.*examination",
            r"semester.*result",
            r"annual.*result",
        ],
    ),
    (
        DocumentType::Certificate,
        &[
            r"certificate",
            r"diploma",
            r"degree",
            r"graduation",
            r"post.*graduation",
            r"bachelor",
            r"master",
            r"phd|doctorate",
        ],
    ),
    (
        DocumentType::CasteCertificate,
        &[
            r"caste.*certificate",
            r"community.*certificate",
            r"sc.*certificate|st.*certificate|obc.*certificate",
            r"backward.*class",
            r"reservation.*certificate",
            r"tribal.*certificate",
        ],
    ),
    (
        DocumentType::IncomeCertificate,
        &[
            r"income.*certificate",
            r"annual.*income",
            r"salary.*certificate",
            r"earnings.*certificate",
            r"financial.*status",
        ],
    ),
];

/// Keyword substrings checked when no rule matches.
pub(crate) const FALLBACK_KEYWORDS: &[(&[&str], DocumentType)] = &[
    (&["photo", "pic", "image", "passport"], DocumentType::Photo),
    (&["sign", "signature"], DocumentType::Signature),
    (&["mark", "grade", "result"], DocumentType::Marksheet),
    (&["cert", "certificate"], DocumentType::Certificate),
    (&["aadhaar", "aadhar", "uid"], DocumentType::Aadhaar),
];

/// The built-in rule table as owned rules.
pub fn default_rules() -> Vec<ClassificationRule> {
    DEFAULT_RULES
        .iter()
        .map(|(document_type, patterns)| ClassificationRule::new(*document_type, patterns))
        .collect()
}
