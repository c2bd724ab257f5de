//! The validation results record.
//!
//! `ValidationResults` is the engine's sole output: a fresh value per
//! `validate` call, immutable once returned, consumed by the chart generator,
//! the report renderers, and the results-JSON writer.
//!
//! The machine-readable wire form is a flat map that keeps the original key
//! scheme: `columnas_faltantes`, `duplicados_<col>`, `tipos_detectados`,
//! `fuera_rango_<col>`, `fuera_fecha_<col>`, `nulos`, `total_registros`.
//! Rule-derived keys exist only for columns that are both named in the rule
//! document and present in the dataset. `columnas_faltantes` is present only
//! when non-empty, so an empty rule document produces no rule-driven keys at
//! all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ValidaError};
use crate::rules::SkippedRule;
use crate::types::DetectedType;

const KEY_MISSING_COLUMNS: &str = "columnas_faltantes";
const KEY_DETECTED_TYPES: &str = "tipos_detectados";
const KEY_NULL_COUNTS: &str = "nulos";
const KEY_TOTAL_RECORDS: &str = "total_registros";
const PREFIX_DUPLICATES: &str = "duplicados_";
const PREFIX_OUT_OF_RANGE: &str = "fuera_rango_";
const PREFIX_OUT_OF_DATE: &str = "fuera_fecha_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResults {
    /// Required columns absent from the dataset, in rule-document order.
    pub missing_columns: Vec<String>,
    /// Duplicate-row count per uniqueness-rule column present in the dataset.
    pub duplicates: BTreeMap<String, u64>,
    /// Detected type label for every dataset column.
    pub detected_types: BTreeMap<String, DetectedType>,
    /// Out-of-range row count per range-rule column present in the dataset.
    pub out_of_range: BTreeMap<String, u64>,
    /// Out-of-bounds row count per date-rule column present in the dataset.
    pub out_of_date_range: BTreeMap<String, u64>,
    /// Native null count for every dataset column.
    pub null_counts: BTreeMap<String, u64>,
    /// Dataset row count.
    pub total_records: u64,
    /// Rules skipped in whole or in part, with the reason. Not part of the
    /// flat map; the results payload carries it alongside.
    pub skipped_rules: Vec<SkippedRule>,
}

impl ValidationResults {
    /// True when any rule category produced a finding. Null counts alone are
    /// informational (there is no null rule) and do not count.
    pub fn has_findings(&self) -> bool {
        !self.missing_columns.is_empty()
            || self.duplicates.values().any(|&count| count > 0)
            || self.out_of_range.values().any(|&count| count > 0)
            || self.out_of_date_range.values().any(|&count| count > 0)
            || !self.skipped_rules.is_empty()
    }

    /// Columns whose null count is above zero, in column order.
    pub fn columns_with_nulls(&self) -> Vec<(&str, u64)> {
        self.null_counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(column, &count)| (column.as_str(), count))
            .collect()
    }

    /// Serialize to the flat wire map.
    pub fn to_flat_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if !self.missing_columns.is_empty() {
            map.insert(
                KEY_MISSING_COLUMNS.to_string(),
                Value::from(self.missing_columns.clone()),
            );
        }
        for (column, &count) in &self.duplicates {
            map.insert(format!("{PREFIX_DUPLICATES}{column}"), Value::from(count));
        }
        let types: Map<String, Value> = self
            .detected_types
            .iter()
            .map(|(column, ty)| (column.clone(), Value::from(ty.as_str())))
            .collect();
        map.insert(KEY_DETECTED_TYPES.to_string(), Value::Object(types));
        for (column, &count) in &self.out_of_range {
            map.insert(format!("{PREFIX_OUT_OF_RANGE}{column}"), Value::from(count));
        }
        for (column, &count) in &self.out_of_date_range {
            map.insert(format!("{PREFIX_OUT_OF_DATE}{column}"), Value::from(count));
        }
        let nulls: Map<String, Value> = self
            .null_counts
            .iter()
            .map(|(column, &count)| (column.clone(), Value::from(count)))
            .collect();
        map.insert(KEY_NULL_COUNTS.to_string(), Value::Object(nulls));
        map.insert(KEY_TOTAL_RECORDS.to_string(), Value::from(self.total_records));
        map
    }

    /// Re-parse a flat wire map. Unknown keys are ignored; `skipped_rules` is
    /// not part of the flat map and comes back empty.
    pub fn from_flat_map(map: &Map<String, Value>) -> Result<Self> {
        let mut results = Self::default();
        for (key, value) in map {
            if key == KEY_MISSING_COLUMNS {
                results.missing_columns = parse_string_list(key, value)?;
            } else if key == KEY_DETECTED_TYPES {
                for (column, label) in parse_object(key, value)? {
                    let label = label.as_str().ok_or_else(|| ValidaError::ResultsFormat {
                        key: key.to_string(),
                        reason: format!("type label for `{column}` is not a string"),
                    })?;
                    results
                        .detected_types
                        .insert(column.clone(), DetectedType::from_label(label));
                }
            } else if key == KEY_NULL_COUNTS {
                for (column, count) in parse_object(key, value)? {
                    results
                        .null_counts
                        .insert(column.clone(), parse_count(key, count)?);
                }
            } else if key == KEY_TOTAL_RECORDS {
                results.total_records = parse_count(key, value)?;
            } else if let Some(column) = key.strip_prefix(PREFIX_DUPLICATES) {
                results
                    .duplicates
                    .insert(column.to_string(), parse_count(key, value)?);
            } else if let Some(column) = key.strip_prefix(PREFIX_OUT_OF_RANGE) {
                results
                    .out_of_range
                    .insert(column.to_string(), parse_count(key, value)?);
            } else if let Some(column) = key.strip_prefix(PREFIX_OUT_OF_DATE) {
                results
                    .out_of_date_range
                    .insert(column.to_string(), parse_count(key, value)?);
            }
        }
        Ok(results)
    }
}

fn parse_count(key: &str, value: &Value) -> Result<u64> {
    value.as_u64().ok_or_else(|| ValidaError::ResultsFormat {
        key: key.to_string(),
        reason: "expected a non-negative integer".to_string(),
    })
}

fn parse_object<'a>(key: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| ValidaError::ResultsFormat {
        key: key.to_string(),
        reason: "expected an object".to_string(),
    })
}

fn parse_string_list(key: &str, value: &Value) -> Result<Vec<String>> {
    let entries = value.as_array().ok_or_else(|| ValidaError::ResultsFormat {
        key: key.to_string(),
        reason: "expected an array".to_string(),
    })?;
    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(ToString::to_string)
                .ok_or_else(|| ValidaError::ResultsFormat {
                    key: key.to_string(),
                    reason: "expected an array of strings".to_string(),
                })
        })
        .collect()
}
