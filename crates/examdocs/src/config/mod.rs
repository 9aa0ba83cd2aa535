pub mod loader;
pub mod presets;
pub mod schema;

pub use loader::{load_config, load_config_from_str, validate_config};
pub use presets::preset;
pub use schema::{DocumentFormatSpec, ExamConfig, ExamFormats, FormatCategory, OutputFormat};
