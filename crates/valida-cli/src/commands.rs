//! Command implementations.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use valida_charts::generate_charts;
use valida_engine::{validate, validate_strict, write_results_json};
use valida_ingest::read_dataset;
use valida_model::ValidationResults;
use valida_report::{HtmlReportRenderer, ReportRenderer, TextReportRenderer};
use valida_rules::{LoadedRules, load_rules, load_rules_strict};

use crate::cli::{CheckArgs, ReportFormatArg, RulesArgs};
use crate::summary::print_rules;

const HTML_REPORT_FILE: &str = "informe_validacion.html";
const TEXT_REPORT_FILE: &str = "informe_validacion.txt";
const DEFAULT_OUTPUT_DIR: &str = "informe";

#[derive(Debug)]
pub struct CheckOutcome {
    pub dataset: PathBuf,
    pub output_dir: PathBuf,
    pub results: ValidationResults,
    pub results_json: PathBuf,
    pub chart_paths: Vec<PathBuf>,
    pub report_paths: Vec<PathBuf>,
}

pub fn run_check(args: &CheckArgs) -> Result<CheckOutcome> {
    let df = read_dataset(&args.dataset)?;
    info!(
        rows = df.height(),
        columns = df.width(),
        strict = args.strict,
        "validating dataset"
    );

    let results = if args.strict {
        let document = load_rules_strict(&args.rules)?;
        validate_strict(&df, &document)?
    } else {
        let loaded = load_rules(&args.rules)?;
        let mut results = validate(&df, &loaded.document);
        merge_loader_skips(&mut results, loaded);
        results
    };

    let output_dir = resolve_output_dir(args);
    let results_json = write_results_json(&output_dir, &dataset_name(&args.dataset), &results)?;

    let chart_paths = if args.no_charts {
        Vec::new()
    } else {
        generate_charts(&results, &output_dir)?
    };

    let mut report_paths = Vec::new();
    if matches!(args.report, ReportFormatArg::Html | ReportFormatArg::Both) {
        report_paths.push(HtmlReportRenderer.render(
            &results,
            &chart_paths,
            &output_dir.join(HTML_REPORT_FILE),
        )?);
    }
    if matches!(args.report, ReportFormatArg::Text | ReportFormatArg::Both) {
        report_paths.push(TextReportRenderer::default().render(
            &results,
            &chart_paths,
            &output_dir.join(TEXT_REPORT_FILE),
        )?);
    }

    info!(
        findings = results.has_findings(),
        charts = chart_paths.len(),
        reports = report_paths.len(),
        "validation outputs written"
    );
    Ok(CheckOutcome {
        dataset: args.dataset.clone(),
        output_dir,
        results,
        results_json,
        chart_paths,
        report_paths,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let loaded = load_rules(&args.rules)?;
    print_rules(&args.rules, &loaded);
    Ok(())
}

/// Loader-dropped entries come first, then the engine's own notices.
fn merge_loader_skips(results: &mut ValidationResults, loaded: LoadedRules) {
    if loaded.skipped.is_empty() {
        return;
    }
    let mut skipped = loaded.skipped;
    skipped.append(&mut results.skipped_rules);
    results.skipped_rules = skipped;
}

fn resolve_output_dir(args: &CheckArgs) -> PathBuf {
    if let Some(dir) = &args.output_dir {
        return dir.clone();
    }
    let parent = args
        .dataset
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    parent.join(DEFAULT_OUTPUT_DIR)
}

fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
