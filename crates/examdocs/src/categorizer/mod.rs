pub mod document_type;
pub mod matcher;
pub mod naming;
pub mod requirements;
pub mod rules;

pub use document_type::DocumentType;
pub use matcher::{DocumentClassifier, PatternClassifier};
pub use naming::{render_name, render_name_for, IndexAllocator, NamingIndex};
pub use requirements::RequirementCheck;
pub use rules::ClassificationRule;
