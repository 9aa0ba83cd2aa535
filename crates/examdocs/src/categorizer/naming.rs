use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::document_type::DocumentType;

/// Which index disambiguates several files of the same type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingIndex {
    /// Position of the file in the submitted batch.
    #[default]
    BatchPosition,
    /// Number of earlier files in the batch with the same detected type.
    PerType,
}

/// Canonical file stem: `{exam_code}_{noun}`, suffixed with `_{index+1}`
/// when `index > 0`.
pub fn render_name(document_type: DocumentType, exam_code: &str, index: usize) -> String {
    with_index(format!("{}_{}", exam_code, document_type.file_noun()), index)
}

/// Same as [`render_name`] for a type given by name. Unknown names render
/// as `{exam_code}_document`.
pub fn render_name_for(type_name: &str, exam_code: &str, index: usize) -> String {
    let document_type = type_name.parse().unwrap_or(DocumentType::Document);
    render_name(document_type, exam_code, index)
}

fn with_index(mut base: String, index: usize) -> String {
    if index > 0 {
        base.push_str(&format!("_{}", index + 1));
    }
    base
}

/// Tracks naming indices across one batch.
#[derive(Debug, Default)]
pub struct IndexAllocator {
    mode: NamingIndex,
    counts: HashMap<DocumentType, usize>,
}

impl IndexAllocator {
    pub fn new(mode: NamingIndex) -> Self {
        Self {
            mode,
            counts: HashMap::new(),
        }
    }

    /// Index for the file at `position` whose type is `document_type`.
    pub fn next(&mut self, position: usize, document_type: DocumentType) -> usize {
        match self.mode {
            NamingIndex::BatchPosition => position,
            NamingIndex::PerType => {
                let count = self.counts.entry(document_type).or_insert(0);
                let index = *count;
                *count += 1;
                index
            }
        }
    }
}
