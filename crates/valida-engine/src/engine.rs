//! The validation engine.
//!
//! `validate` applies a rule document to a dataset and produces a fresh
//! [`ValidationResults`]. Categories are evaluated independently over the
//! same immutable `DataFrame`; no category reads another's output. Rules
//! naming columns absent from the dataset are silently skipped; the
//! missing-columns list is the sole signal for absent columns.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, Column, DataFrame, DataType};
use tracing::debug;

use valida_ingest::{any_to_f64, cell_key, parse_cell_date};
use valida_model::{
    DateBounds, DetectedType, NumericBounds, Result, RuleDocument, RuleSection, SkippedRule,
    ValidaError, ValidationResults,
};

/// Validate a dataset against a rule document.
///
/// Pure and idempotent: identical inputs produce structurally identical
/// results, and nothing is carried over between calls.
pub fn validate(df: &DataFrame, rules: &RuleDocument) -> ValidationResults {
    let present: BTreeSet<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut results = ValidationResults {
        total_records: df.height() as u64,
        ..ValidationResults::default()
    };

    for name in &rules.required_columns {
        if !present.contains(name) {
            results.missing_columns.push(name.clone());
        }
    }

    for name in &rules.unique_columns {
        if let Ok(column) = df.column(name) {
            results
                .duplicates
                .insert(name.clone(), count_duplicates(column, df.height()));
        }
    }

    for column in df.get_columns() {
        results
            .detected_types
            .insert(column.name().to_string(), detected_type(column.dtype()));
        results
            .null_counts
            .insert(column.name().to_string(), column.null_count() as u64);
    }

    for (name, bounds) in &rules.numeric_ranges {
        if let Ok(column) = df.column(name) {
            let (outside, non_numeric) = count_out_of_range(column, df.height(), bounds);
            results.out_of_range.insert(name.clone(), outside);
            if non_numeric > 0 {
                results.skipped_rules.push(SkippedRule::new(
                    RuleSection::Ranges,
                    name.clone(),
                    format!("{non_numeric} non-numeric value(s) skipped"),
                ));
            }
        }
    }

    for (name, bounds) in &rules.date_ranges {
        if let Ok(column) = df.column(name) {
            results
                .out_of_date_range
                .insert(name.clone(), count_out_of_date_range(column, df.height(), bounds));
        }
    }

    debug!(
        records = results.total_records,
        missing = results.missing_columns.len(),
        skipped = results.skipped_rules.len(),
        "validation finished"
    );
    results
}

/// Fail-fast wrapper around [`validate`]: any rule that could not be fully
/// evaluated becomes an error instead of a partial-results notice.
pub fn validate_strict(df: &DataFrame, rules: &RuleDocument) -> Result<ValidationResults> {
    let results = validate(df, rules);
    if let Some(skip) = results.skipped_rules.first() {
        return Err(match skip.section {
            RuleSection::Ranges => ValidaError::ColumnTypeMismatch {
                column: skip.column.clone(),
                expected: "numeric".to_string(),
            },
            section => ValidaError::RuleFormat {
                section,
                column: skip.column.clone(),
                reason: skip.reason.clone(),
            },
        });
    }
    Ok(results)
}

/// Count rows whose value was already seen in an earlier row.
///
/// Nulls compare equal to each other: the second and later null cells count
/// as duplicate rows, so the count always equals rows minus distinct values.
fn count_duplicates(column: &Column, height: usize) -> u64 {
    let mut seen: BTreeSet<Option<String>> = BTreeSet::new();
    let mut duplicates = 0u64;
    for idx in 0..height {
        let key = cell_key(column.get(idx).unwrap_or(AnyValue::Null));
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

/// Count cells strictly outside the closed numeric interval.
///
/// Returns `(outside, non_numeric)`. Cells that do not coerce to a number
/// are skipped like missing values; the caller reports them so the partial
/// evaluation stays visible.
fn count_out_of_range(column: &Column, height: usize, bounds: &NumericBounds) -> (u64, u64) {
    let mut outside = 0u64;
    let mut non_numeric = 0u64;
    for idx in 0..height {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if matches!(value, AnyValue::Null) {
            continue;
        }
        match any_to_f64(value) {
            Some(number) => {
                if bounds.excludes(number) {
                    outside += 1;
                }
            }
            None => non_numeric += 1,
        }
    }
    (outside, non_numeric)
}

/// Count cells whose parsed date lies strictly outside the closed interval.
/// Unparsable cells are treated as missing, never as out-of-range.
fn count_out_of_date_range(column: &Column, height: usize, bounds: &DateBounds) -> u64 {
    let mut outside = 0u64;
    for idx in 0..height {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if let Some(date) = parse_cell_date(&value)
            && bounds.excludes(date)
        {
            outside += 1;
        }
    }
    outside
}

fn detected_type(dtype: &DataType) -> DetectedType {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => DetectedType::Integer,
        DataType::Float32 | DataType::Float64 => DetectedType::Float,
        DataType::String => DetectedType::Text,
        DataType::Boolean => DetectedType::Boolean,
        DataType::Date => DetectedType::Date,
        DataType::Datetime(_, _) => DetectedType::Datetime,
        DataType::Time => DetectedType::Time,
        DataType::Null => DetectedType::Null,
        _ => DetectedType::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detected_type_labels_common_dtypes() {
        assert_eq!(detected_type(&DataType::Int64), DetectedType::Integer);
        assert_eq!(detected_type(&DataType::Float64), DetectedType::Float);
        assert_eq!(detected_type(&DataType::String), DetectedType::Text);
        assert_eq!(detected_type(&DataType::Boolean), DetectedType::Boolean);
        assert_eq!(detected_type(&DataType::Date), DetectedType::Date);
        assert_eq!(detected_type(&DataType::Null), DetectedType::Null);
    }

    #[test]
    fn duplicate_count_is_rows_minus_distinct() {
        let column = Column::new("id".into(), [1i64, 1, 2, 3]);
        assert_eq!(count_duplicates(&column, 4), 1);

        let column = Column::new("id".into(), [5i64, 5, 5, 5]);
        assert_eq!(count_duplicates(&column, 4), 3);
    }

    #[test]
    fn nulls_count_as_duplicates_of_each_other() {
        let column = Column::new("id".into(), [Some(1i64), None, None, None]);
        assert_eq!(count_duplicates(&column, 4), 2);
    }
}
