use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame};
use serde_json::json;

use valida_engine::{validate, validate_strict};
use valida_model::{
    DateBounds, DetectedType, NumericBounds, RuleDocument, RuleSection, ValidaError,
    ValidationResults,
};
use valida_rules::parse_rule_document;

fn sample_df() -> DataFrame {
    DataFrame::new(vec![
        Column::new("id".into(), [1i64, 1, 2, 3]),
        Column::new("nombre".into(), [Some("Ana"), None, Some("Luis"), Some("Eva")]),
        Column::new("edad".into(), [34i64, 29, 51, 40]),
    ])
    .expect("dataframe")
}

fn date_bounds(min: (i32, u32, u32), max: (i32, u32, u32)) -> DateBounds {
    DateBounds {
        min: chrono::NaiveDate::from_ymd_opt(min.0, min.1, min.2).unwrap(),
        max: chrono::NaiveDate::from_ymd_opt(max.0, max.1, max.2).unwrap(),
    }
}

#[test]
fn empty_rules_report_only_dataset_wide_categories() {
    let df = sample_df();
    let results = validate(&df, &RuleDocument::default());

    assert_eq!(results.total_records, 4);
    assert!(results.missing_columns.is_empty());
    assert!(results.duplicates.is_empty());
    assert!(results.out_of_range.is_empty());
    assert!(results.out_of_date_range.is_empty());
    assert!(results.skipped_rules.is_empty());
    assert_eq!(results.detected_types.len(), 3);
    assert_eq!(results.null_counts.len(), 3);

    let map = results.to_flat_map();
    assert_eq!(map.len(), 3);
    assert!(map.contains_key("tipos_detectados"));
    assert!(map.contains_key("nulos"));
    assert!(map.contains_key("total_registros"));
}

#[test]
fn missing_required_columns_keep_document_order() {
    let df = sample_df();
    let rules = RuleDocument {
        required_columns: vec![
            "pais".to_string(),
            "id".to_string(),
            "alta".to_string(),
        ],
        ..RuleDocument::default()
    };
    let results = validate(&df, &rules);
    assert_eq!(results.missing_columns, vec!["pais", "alta"]);
}

#[test]
fn duplicate_count_matches_reference_semantics() {
    let df = sample_df();
    let rules = RuleDocument {
        unique_columns: vec!["id".to_string()],
        ..RuleDocument::default()
    };
    let results = validate(&df, &rules);
    assert_eq!(results.duplicates.get("id"), Some(&1));
    assert_eq!(results.to_flat_map().get("duplicados_id").and_then(|v| v.as_u64()), Some(1));
}

#[test]
fn out_of_range_counts_strictly_outside_closed_interval() {
    let df = DataFrame::new(vec![Column::new("x".into(), [-1i64, 5, 11, 10, 0])])
        .expect("dataframe");
    let rules = RuleDocument {
        numeric_ranges: BTreeMap::from([(
            "x".to_string(),
            NumericBounds { min: 0.0, max: 10.0 },
        )]),
        ..RuleDocument::default()
    };
    let results = validate(&df, &rules);
    assert_eq!(results.out_of_range.get("x"), Some(&2));
    assert!(results.skipped_rules.is_empty());
}

#[test]
fn unparsable_dates_are_missing_not_out_of_range() {
    let df = DataFrame::new(vec![Column::new(
        "d".into(),
        ["2020-06-01", "2021-01-01", "not-a-date"],
    )])
    .expect("dataframe");
    let rules = RuleDocument {
        date_ranges: BTreeMap::from([(
            "d".to_string(),
            date_bounds((2020, 1, 1), (2020, 12, 31)),
        )]),
        ..RuleDocument::default()
    };
    let results = validate(&df, &rules);
    assert_eq!(results.out_of_date_range.get("d"), Some(&1));
}

#[test]
fn date_bounds_are_inclusive() {
    let df = DataFrame::new(vec![Column::new(
        "d".into(),
        ["2020-01-01", "2020-12-31", "2019-12-31"],
    )])
    .expect("dataframe");
    let rules = RuleDocument {
        date_ranges: BTreeMap::from([(
            "d".to_string(),
            date_bounds((2020, 1, 1), (2020, 12, 31)),
        )]),
        ..RuleDocument::default()
    };
    let results = validate(&df, &rules);
    assert_eq!(results.out_of_date_range.get("d"), Some(&1));
}

#[test]
fn rules_on_absent_columns_are_silently_skipped() {
    let df = sample_df();
    let rules = RuleDocument {
        unique_columns: vec!["codigo".to_string()],
        numeric_ranges: BTreeMap::from([(
            "peso".to_string(),
            NumericBounds { min: 0.0, max: 1.0 },
        )]),
        date_ranges: BTreeMap::from([(
            "alta".to_string(),
            date_bounds((2020, 1, 1), (2020, 12, 31)),
        )]),
        ..RuleDocument::default()
    };
    let results = validate(&df, &rules);
    assert!(results.duplicates.is_empty());
    assert!(results.out_of_range.is_empty());
    assert!(results.out_of_date_range.is_empty());
    assert!(results.skipped_rules.is_empty());
}

#[test]
fn non_numeric_cells_under_range_rule_are_skipped_and_reported() {
    let df = DataFrame::new(vec![Column::new(
        "edad".into(),
        ["34", "muchos", "150", ""],
    )])
    .expect("dataframe");
    let rules = RuleDocument {
        numeric_ranges: BTreeMap::from([(
            "edad".to_string(),
            NumericBounds { min: 0.0, max: 120.0 },
        )]),
        ..RuleDocument::default()
    };
    let results = validate(&df, &rules);
    // "150" is out of range; "muchos" and "" are skipped and reported.
    assert_eq!(results.out_of_range.get("edad"), Some(&1));
    assert_eq!(results.skipped_rules.len(), 1);
    assert_eq!(results.skipped_rules[0].section, RuleSection::Ranges);
    assert_eq!(results.skipped_rules[0].column, "edad");
    assert!(results.skipped_rules[0].reason.contains("2 non-numeric"));
}

#[test]
fn strict_validation_promotes_type_mismatch_to_error() {
    let df = DataFrame::new(vec![Column::new("edad".into(), ["34", "muchos"])])
        .expect("dataframe");
    let rules = RuleDocument {
        numeric_ranges: BTreeMap::from([(
            "edad".to_string(),
            NumericBounds { min: 0.0, max: 120.0 },
        )]),
        ..RuleDocument::default()
    };
    let error = validate_strict(&df, &rules).unwrap_err();
    match error {
        ValidaError::ColumnTypeMismatch { column, expected } => {
            assert_eq!(column, "edad");
            assert_eq!(expected, "numeric");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_validation_passes_clean_datasets_through() {
    let df = sample_df();
    let rules = RuleDocument {
        unique_columns: vec!["id".to_string()],
        ..RuleDocument::default()
    };
    let results = validate_strict(&df, &rules).expect("results");
    assert_eq!(results.duplicates.get("id"), Some(&1));
}

#[test]
fn null_counts_use_native_nulls() {
    let df = sample_df();
    let results = validate(&df, &RuleDocument::default());
    assert_eq!(results.null_counts.get("nombre"), Some(&1));
    assert_eq!(results.null_counts.get("id"), Some(&0));
}

#[test]
fn detected_types_cover_every_column() {
    let df = sample_df();
    let results = validate(&df, &RuleDocument::default());
    assert_eq!(results.detected_types.get("id"), Some(&DetectedType::Integer));
    assert_eq!(results.detected_types.get("nombre"), Some(&DetectedType::Text));
}

#[test]
fn validation_is_idempotent() {
    let df = sample_df();
    let rules = RuleDocument {
        required_columns: vec!["pais".to_string()],
        unique_columns: vec!["id".to_string()],
        numeric_ranges: BTreeMap::from([(
            "edad".to_string(),
            NumericBounds { min: 0.0, max: 120.0 },
        )]),
        ..RuleDocument::default()
    };
    let first = validate(&df, &rules);
    let second = validate(&df, &rules);
    assert_eq!(first, second);
}

#[test]
fn results_survive_the_wire_round_trip() {
    let df = sample_df();
    let rules = RuleDocument {
        required_columns: vec!["pais".to_string()],
        unique_columns: vec!["id".to_string()],
        ..RuleDocument::default()
    };
    let results = validate(&df, &rules);
    let parsed = ValidationResults::from_flat_map(&results.to_flat_map()).expect("parse");
    assert_eq!(parsed.missing_columns, results.missing_columns);
    assert_eq!(parsed.duplicates, results.duplicates);
    assert_eq!(parsed.null_counts, results.null_counts);
    assert_eq!(parsed.total_records, results.total_records);
}

#[test]
fn validates_document_parsed_from_json() {
    let df = sample_df();
    let loaded = parse_rule_document(&json!({
        "columnas_obligatorias": ["id", "pais"],
        "unicidad": ["id"],
        "rangos": {"edad": {"min": 0, "max": 120}}
    }))
    .expect("rules");
    let results = validate(&df, &loaded.document);
    assert_eq!(results.missing_columns, vec!["pais"]);
    assert_eq!(results.duplicates.get("id"), Some(&1));
    assert_eq!(results.out_of_range.get("edad"), Some(&0));
}
