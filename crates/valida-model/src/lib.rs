mod error;
mod results;
mod rules;
mod types;

pub use error::{Result, ValidaError};
pub use results::ValidationResults;
pub use rules::{DateBounds, NumericBounds, RuleDocument, RuleSection, SkippedRule};
pub use types::DetectedType;
