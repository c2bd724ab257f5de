//! Rule document loading.
//!
//! Rule files are JSON objects with the recognized sections
//! `columnas_obligatorias`, `unicidad`, `rangos` and `fechas_validas`;
//! unrecognized sections are ignored. Parsing is lenient at rule
//! granularity: an entry with the wrong shape is dropped and recorded as a
//! [`SkippedRule`] with section and column context, while every well-formed
//! entry still loads. Only an unreadable file or a non-object document fails
//! the load outright.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use valida_model::{
    DateBounds, NumericBounds, Result, RuleDocument, RuleSection, SkippedRule, ValidaError,
};

/// A rule document together with the entries dropped during shape validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRules {
    pub document: RuleDocument,
    pub skipped: Vec<SkippedRule>,
}

/// Load and validate a rule document from a JSON file.
pub fn load_rules(path: &Path) -> Result<LoadedRules> {
    let text = fs::read_to_string(path).map_err(|error| ValidaError::RuleLoad {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|error| ValidaError::RuleLoad {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;
    let loaded = parse_rule_document(&value).map_err(|reason| ValidaError::RuleLoad {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(
        rules = loaded.document.rule_count(),
        skipped = loaded.skipped.len(),
        path = %path.display(),
        "rule document loaded"
    );
    for skipped in &loaded.skipped {
        warn!(%skipped, "rule entry dropped");
    }
    Ok(loaded)
}

/// All-or-nothing variant of [`load_rules`]: the first malformed entry fails
/// the load with full section and column context.
pub fn load_rules_strict(path: &Path) -> Result<RuleDocument> {
    let loaded = load_rules(path)?;
    if let Some(first) = loaded.skipped.into_iter().next() {
        return Err(ValidaError::RuleFormat {
            section: first.section,
            column: first.column,
            reason: first.reason,
        });
    }
    Ok(loaded.document)
}

/// Validate the shape of an already-parsed JSON rule document.
pub fn parse_rule_document(value: &Value) -> std::result::Result<LoadedRules, String> {
    let root = value
        .as_object()
        .ok_or_else(|| "rule document is not a JSON object".to_string())?;

    let mut document = RuleDocument::default();
    let mut skipped = Vec::new();

    if let Some(section) = root.get("columnas_obligatorias") {
        document.required_columns = parse_column_list(
            section,
            RuleSection::RequiredColumns,
            &mut skipped,
        );
    }
    if let Some(section) = root.get("unicidad") {
        document.unique_columns =
            parse_column_list(section, RuleSection::Uniqueness, &mut skipped);
    }
    if let Some(section) = root.get("rangos") {
        parse_bounds_section(section, RuleSection::Ranges, &mut skipped, |column, entry| {
            match parse_numeric_bounds(entry) {
                Ok(bounds) => {
                    document.numeric_ranges.insert(column.to_string(), bounds);
                    None
                }
                Err(reason) => Some(reason),
            }
        });
    }
    if let Some(section) = root.get("fechas_validas") {
        parse_bounds_section(
            section,
            RuleSection::ValidDates,
            &mut skipped,
            |column, entry| match parse_date_bounds(entry) {
                Ok(bounds) => {
                    document.date_ranges.insert(column.to_string(), bounds);
                    None
                }
                Err(reason) => Some(reason),
            },
        );
    }

    Ok(LoadedRules { document, skipped })
}

/// Parse a section whose value must be an array of column-name strings.
fn parse_column_list(
    section: &Value,
    kind: RuleSection,
    skipped: &mut Vec<SkippedRule>,
) -> Vec<String> {
    let Some(entries) = section.as_array() else {
        skipped.push(SkippedRule::new(kind, "*", "expected an array of column names"));
        return Vec::new();
    };
    let mut columns = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.as_str() {
            Some(name) => columns.push(name.to_string()),
            None => skipped.push(SkippedRule::new(
                kind,
                truncate_token(entry),
                "column name is not a string",
            )),
        }
    }
    columns
}

/// Parse a section whose value must be an object of per-column bound entries.
fn parse_bounds_section<F>(
    section: &Value,
    kind: RuleSection,
    skipped: &mut Vec<SkippedRule>,
    mut insert: F,
) where
    F: FnMut(&str, &Map<String, Value>) -> Option<String>,
{
    let Some(entries) = section.as_object() else {
        skipped.push(SkippedRule::new(kind, "*", "expected an object of per-column bounds"));
        return;
    };
    for (column, entry) in entries {
        let Some(bounds) = entry.as_object() else {
            skipped.push(SkippedRule::new(kind, column, "bounds entry is not an object"));
            continue;
        };
        if let Some(reason) = insert(column, bounds) {
            skipped.push(SkippedRule::new(kind, column, reason));
        }
    }
}

fn parse_numeric_bounds(entry: &Map<String, Value>) -> std::result::Result<NumericBounds, String> {
    let min = bound_number(entry, "min")?;
    let max = bound_number(entry, "max")?;
    if min > max {
        return Err(format!("`min` ({min}) is greater than `max` ({max})"));
    }
    Ok(NumericBounds { min, max })
}

fn parse_date_bounds(entry: &Map<String, Value>) -> std::result::Result<DateBounds, String> {
    let min = bound_date(entry, "min")?;
    let max = bound_date(entry, "max")?;
    if min > max {
        return Err(format!("`min` ({min}) is after `max` ({max})"));
    }
    Ok(DateBounds { min, max })
}

fn bound_number(entry: &Map<String, Value>, key: &str) -> std::result::Result<f64, String> {
    entry
        .get(key)
        .ok_or_else(|| format!("missing `{key}`"))?
        .as_f64()
        .ok_or_else(|| format!("`{key}` is not a number"))
}

fn bound_date(entry: &Map<String, Value>, key: &str) -> std::result::Result<NaiveDate, String> {
    let raw = entry
        .get(key)
        .ok_or_else(|| format!("missing `{key}`"))?
        .as_str()
        .ok_or_else(|| format!("`{key}` is not a string"))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("`{key}` is not an ISO-8601 date: {raw}"))
}

/// Shorten a JSON token for use as the column slot of a skipped-rule notice.
fn truncate_token(value: &Value) -> String {
    let token = value.to_string();
    if token.chars().count() > 40 {
        let head: String = token.chars().take(40).collect();
        format!("{head}…")
    } else {
        token
    }
}
