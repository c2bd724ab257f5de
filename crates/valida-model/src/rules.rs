//! Rule document types.
//!
//! The on-disk rule format is a JSON object whose recognized sections keep
//! the Spanish keys of the original rule files (`columnas_obligatorias`,
//! `unicidad`, `rangos`, `fechas_validas`). Unrecognized sections are
//! ignored. Any section may be absent, which means "no rule of that kind".

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive numeric bounds for a range rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    pub min: f64,
    pub max: f64,
}

impl NumericBounds {
    /// True when `value` lies strictly outside the closed interval.
    pub fn excludes(&self, value: f64) -> bool {
        value < self.min || value > self.max
    }
}

/// Inclusive calendar-date bounds for a date rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    /// True when `date` lies strictly outside the closed interval.
    pub fn excludes(&self, date: NaiveDate) -> bool {
        date < self.min || date > self.max
    }
}

/// A parsed rule document.
///
/// Field order mirrors the evaluation categories; `required_columns` keeps
/// document order because the missing-columns result preserves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(rename = "columnas_obligatorias", default)]
    pub required_columns: Vec<String>,
    #[serde(rename = "unicidad", default)]
    pub unique_columns: Vec<String>,
    #[serde(rename = "rangos", default)]
    pub numeric_ranges: BTreeMap<String, NumericBounds>,
    #[serde(rename = "fechas_validas", default)]
    pub date_ranges: BTreeMap<String, DateBounds>,
}

impl RuleDocument {
    pub fn is_empty(&self) -> bool {
        self.required_columns.is_empty()
            && self.unique_columns.is_empty()
            && self.numeric_ranges.is_empty()
            && self.date_ranges.is_empty()
    }

    /// Total number of rule entries across all sections.
    pub fn rule_count(&self) -> usize {
        self.required_columns.len()
            + self.unique_columns.len()
            + self.numeric_ranges.len()
            + self.date_ranges.len()
    }
}

/// Rule document section, named by its wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSection {
    #[serde(rename = "columnas_obligatorias")]
    RequiredColumns,
    #[serde(rename = "unicidad")]
    Uniqueness,
    #[serde(rename = "rangos")]
    Ranges,
    #[serde(rename = "fechas_validas")]
    ValidDates,
}

impl RuleSection {
    pub fn wire_key(self) -> &'static str {
        match self {
            Self::RequiredColumns => "columnas_obligatorias",
            Self::Uniqueness => "unicidad",
            Self::Ranges => "rangos",
            Self::ValidDates => "fechas_validas",
        }
    }
}

impl fmt::Display for RuleSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

/// A rule that was skipped, in whole or in part, instead of aborting the run.
///
/// Produced by the rule loader for entries with a malformed shape and by the
/// engine when a checked column cannot support the requested comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRule {
    pub section: RuleSection,
    pub column: String,
    pub reason: String,
}

impl SkippedRule {
    pub fn new(
        section: RuleSection,
        column: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            section,
            column: column.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SkippedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.column, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_spanish_wire_keys() {
        let json = r#"{
            "columnas_obligatorias": ["id", "nombre"],
            "unicidad": ["id"],
            "rangos": {"edad": {"min": 0, "max": 120}},
            "fechas_validas": {"alta": {"min": "2020-01-01", "max": "2020-12-31"}}
        }"#;
        let doc: RuleDocument = serde_json::from_str(json).expect("rule document");
        assert_eq!(doc.required_columns, vec!["id", "nombre"]);
        assert_eq!(doc.unique_columns, vec!["id"]);
        assert_eq!(
            doc.numeric_ranges.get("edad"),
            Some(&NumericBounds {
                min: 0.0,
                max: 120.0
            })
        );
        let alta = doc.date_ranges.get("alta").expect("alta bounds");
        assert_eq!(alta.min, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(doc.rule_count(), 4);
    }

    #[test]
    fn absent_sections_mean_no_rules() {
        let doc: RuleDocument = serde_json::from_str("{}").expect("empty document");
        assert!(doc.is_empty());
    }

    #[test]
    fn bounds_exclusion_is_strict() {
        let bounds = NumericBounds { min: 0.0, max: 10.0 };
        assert!(!bounds.excludes(0.0));
        assert!(!bounds.excludes(10.0));
        assert!(bounds.excludes(-0.5));
        assert!(bounds.excludes(10.5));
    }

    #[test]
    fn skipped_rule_display_names_section_and_column() {
        let skipped = SkippedRule::new(RuleSection::Ranges, "edad", "missing `min`");
        assert_eq!(skipped.to_string(), "rangos.edad: missing `min`");
    }
}
