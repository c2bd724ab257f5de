//! Shared report content.
//!
//! Builds the section rows both renderers present, so the summary logic
//! exists once and the variants differ only in layout.

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};

use valida_model::ValidationResults;

pub const REPORT_TITLE: &str = "Informe de Validación de Datos / Data Validation Report";
pub const LABEL_GENERATED: &str = "Generado / Generated";
pub const LABEL_TOTAL_RECORDS: &str = "Total de registros / Total records";
pub const LABEL_MISSING_COLUMNS: &str = "Columnas faltantes / Missing columns";
pub const LABEL_NONE: &str = "ninguna / none";
pub const SECTION_DUPLICATES: &str = "Duplicados / Duplicates";
pub const SECTION_NULLS: &str = "Valores nulos / Null values";
pub const SECTION_TYPES: &str = "Tipos de datos detectados / Detected data types";
pub const SECTION_SKIPPED: &str = "Reglas omitidas / Skipped rules";
pub const SECTION_CHARTS: &str = "Gráficos / Charts";
pub const HEADER_COLUMN: &str = "Columna / Column";
pub const HEADER_COUNT: &str = "Cantidad / Count";
pub const HEADER_TYPE: &str = "Tipo / Type";

/// Section rows for one report, in presentation order.
#[derive(Debug, Clone)]
pub struct ReportContent {
    pub generated_at: String,
    pub total_records: u64,
    pub missing_columns: Vec<String>,
    pub duplicate_rows: Vec<(String, u64)>,
    pub null_rows: Vec<(String, u64)>,
    pub type_rows: Vec<(String, String)>,
    pub skipped_rows: Vec<String>,
    pub chart_paths: Vec<PathBuf>,
}

impl ReportContent {
    pub fn build(results: &ValidationResults, chart_paths: &[PathBuf]) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            total_records: results.total_records,
            missing_columns: results.missing_columns.clone(),
            duplicate_rows: results
                .duplicates
                .iter()
                .map(|(column, &count)| (column.clone(), count))
                .collect(),
            null_rows: results
                .null_counts
                .iter()
                .map(|(column, &count)| (column.clone(), count))
                .collect(),
            type_rows: results
                .detected_types
                .iter()
                .map(|(column, ty)| (column.clone(), ty.to_string()))
                .collect(),
            skipped_rows: results
                .skipped_rules
                .iter()
                .map(ToString::to_string)
                .collect(),
            chart_paths: chart_paths.to_vec(),
        }
    }

    /// Comma-joined missing columns, or the bilingual "none" marker.
    pub fn missing_columns_label(&self) -> String {
        if self.missing_columns.is_empty() {
            LABEL_NONE.to_string()
        } else {
            self.missing_columns.join(", ")
        }
    }
}
