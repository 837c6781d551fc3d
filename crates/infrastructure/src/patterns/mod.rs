mod loader;

pub use loader::{load_classification_patterns, load_optional_pattern_list, load_pattern_list};
