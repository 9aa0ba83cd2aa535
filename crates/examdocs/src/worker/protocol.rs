//! Messages exchanged with the classification worker.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::categorizer::{requirements, DocumentClassifier, DocumentType, IndexAllocator};
use crate::categorizer::{NamingIndex, RequirementCheck};

/// One file as seen by the worker: only its id and name cross the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    pub id: String,
    pub detected_type: DocumentType,
    /// Canonical name without extension.
    pub stem: String,
    pub requirement: RequirementCheck,
}

pub type ClassifyResponse = Vec<ClassifiedEntry>;

pub struct ClassifyRequest {
    pub entries: Vec<ClassifyEntry>,
    pub exam_code: String,
    pub naming: NamingIndex,
    pub reply: oneshot::Sender<ClassifyResponse>,
}

/// Classifies every entry of a batch. Runs inside the worker.
pub fn classify_batch(
    classifier: &dyn DocumentClassifier,
    entries: &[ClassifyEntry],
    exam_code: &str,
    naming: NamingIndex,
) -> ClassifyResponse {
    let mut indices = IndexAllocator::new(naming);

    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let detected_type = classifier.classify(&entry.name);
            let index = indices.next(position, detected_type);
            ClassifiedEntry {
                id: entry.id.clone(),
                detected_type,
                stem: classifier.render_name(detected_type, exam_code, index),
                requirement: requirements::check(exam_code, detected_type),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::PatternClassifier;

    fn entry(id: &str, name: &str) -> ClassifyEntry {
        ClassifyEntry {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_batch_position_naming() {
        let entries = vec![entry("a", "photo.jpg"), entry("b", "signature.png")];
        let response = classify_batch(
            &PatternClassifier::new(),
            &entries,
            "EX01",
            NamingIndex::BatchPosition,
        );

        assert_eq!(response.len(), 2);
        assert_eq!(response[0].stem, "EX01_photograph");
        // second position gets a suffix even though it is the first signature
        assert_eq!(response[1].stem, "EX01_signature_2");
    }

    #[test]
    fn test_per_type_naming() {
        let entries = vec![
            entry("a", "photo.jpg"),
            entry("b", "signature.png"),
            entry("c", "photo_2.jpg"),
        ];
        let response =
            classify_batch(&PatternClassifier::new(), &entries, "EX01", NamingIndex::PerType);

        assert_eq!(response[0].stem, "EX01_photograph");
        assert_eq!(response[1].stem, "EX01_signature");
        assert_eq!(response[2].stem, "EX01_photograph_2");
    }

    #[test]
    fn test_requirement_attached() {
        let entries = vec![entry("a", "aadhaar.pdf")];
        let response = classify_batch(
            &PatternClassifier::new(),
            &entries,
            "upsc",
            NamingIndex::BatchPosition,
        );
        assert_eq!(response[0].detected_type, DocumentType::Aadhaar);
        assert!(response[0].requirement.required);
    }
}
