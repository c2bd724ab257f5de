//! Machine-readable results payload.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use valida_model::{SkippedRule, ValidationResults};

const RESULTS_SCHEMA: &str = "valida.validation-results";
const RESULTS_SCHEMA_VERSION: u32 = 1;
const RESULTS_FILE_NAME: &str = "resultados_validacion.json";

/// Versioned wrapper around the flat results map.
#[derive(Debug, Serialize)]
pub struct ResultsPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub dataset: String,
    pub resultados: Map<String, Value>,
    pub reglas_omitidas: Vec<SkippedRule>,
}

pub fn build_results_payload(dataset_name: &str, results: &ValidationResults) -> ResultsPayload {
    ResultsPayload {
        schema: RESULTS_SCHEMA,
        schema_version: RESULTS_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        dataset: dataset_name.to_string(),
        resultados: results.to_flat_map(),
        reglas_omitidas: results.skipped_rules.clone(),
    }
}

/// Write the results payload as pretty-printed JSON under `output_dir`.
pub fn write_results_json(
    output_dir: &Path,
    dataset_name: &str,
    results: &ValidationResults,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(RESULTS_FILE_NAME);
    let payload = build_results_payload(dataset_name, results);
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
