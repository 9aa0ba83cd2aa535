use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use super::document_type::DocumentType;
use super::naming;
use super::rules::{default_rules, ClassificationRule, FALLBACK_KEYWORDS};

/// Classification capability hosted by the classification worker.
pub trait DocumentClassifier: Send + Sync {
    /// Infers the document type from a file name. Never fails.
    fn classify(&self, filename: &str) -> DocumentType;

    /// Canonical file stem (no extension) for a classified file.
    fn render_name(&self, document_type: DocumentType, exam_code: &str, index: usize) -> String {
        naming::render_name(document_type, exam_code, index)
    }
}

struct CompiledRule {
    document_type: DocumentType,
    patterns: Vec<Regex>,
}

static DEFAULT_COMPILED: LazyLock<Vec<CompiledRule>> =
    LazyLock::new(|| compile_rules(&default_rules()));

fn compile_rules(rules: &[ClassificationRule]) -> Vec<CompiledRule> {
    rules
        .iter()
        .map(|rule| CompiledRule {
            document_type: rule.document_type,
            // Invalid patterns are skipped, they can never match.
            patterns: rule
                .patterns
                .iter()
                .filter_map(|p| RegexBuilder::new(p).case_insensitive(true).build().ok())
                .collect(),
        })
        .collect()
}

/// File-name based classifier driven by an ordered rule table.
pub struct PatternClassifier {
    rules: Vec<CompiledRule>,
}

impl PatternClassifier {
    /// Classifier over the built-in rule table.
    pub fn new() -> Self {
        let rules = DEFAULT_COMPILED
            .iter()
            .map(|r| CompiledRule {
                document_type: r.document_type,
                patterns: r.patterns.clone(),
            })
            .collect();
        Self { rules }
    }

    pub fn with_rules(rules: &[ClassificationRule]) -> Self {
        Self {
            rules: compile_rules(rules),
        }
    }

    fn match_rules(&self, stem: &str) -> Option<DocumentType> {
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| p.is_match(stem)))
            .map(|rule| rule.document_type)
    }

    fn match_fallback(stem: &str) -> Option<DocumentType> {
        FALLBACK_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| stem.contains(k)))
            .map(|(_, document_type)| *document_type)
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentClassifier for PatternClassifier {
    fn classify(&self, filename: &str) -> DocumentType {
        let lowered = filename.to_lowercase();
        let stem = file_stem(&lowered);

        self.match_rules(stem)
            .or_else(|| Self::match_fallback(stem))
            .unwrap_or(DocumentType::Document)
    }
}

/// Name without its final extension. Names without a dot are returned whole.
pub(crate) fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}
