mod engine;
mod payload;

pub use engine::{validate, validate_strict};
pub use payload::{ResultsPayload, build_results_payload, write_results_json};
