//! Simple paginated text report.
//!
//! The same section order as the HTML variant, laid out as plain text with a
//! fixed page height and bilingual page separators.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use valida_model::ValidationResults;

use crate::ReportRenderer;
use crate::content::{
    LABEL_GENERATED, LABEL_MISSING_COLUMNS, LABEL_TOTAL_RECORDS, REPORT_TITLE, ReportContent,
    SECTION_CHARTS, SECTION_DUPLICATES, SECTION_NULLS, SECTION_SKIPPED, SECTION_TYPES,
};

const DEFAULT_PAGE_LINES: usize = 40;

/// The simple-paginated renderer variant.
#[derive(Debug, Clone, Copy)]
pub struct TextReportRenderer {
    pub page_lines: usize,
}

impl Default for TextReportRenderer {
    fn default() -> Self {
        Self {
            page_lines: DEFAULT_PAGE_LINES,
        }
    }
}

impl ReportRenderer for TextReportRenderer {
    fn render(
        &self,
        results: &ValidationResults,
        chart_paths: &[PathBuf],
        output_path: &Path,
    ) -> Result<PathBuf> {
        let content = ReportContent::build(results, chart_paths);
        let text = paginate(&build_lines(&content), self.page_lines.max(1));
        fs::write(output_path, text)
            .with_context(|| format!("write text report {}", output_path.display()))?;
        debug!(path = %output_path.display(), "text report written");
        Ok(output_path.to_path_buf())
    }
}

fn build_lines(content: &ReportContent) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("=== {REPORT_TITLE} ==="));
    lines.push(format!("{LABEL_GENERATED}: {}", content.generated_at));
    lines.push(format!("{LABEL_TOTAL_RECORDS}: {}", content.total_records));
    lines.push(format!(
        "{LABEL_MISSING_COLUMNS}: {}",
        content.missing_columns_label()
    ));

    if !content.duplicate_rows.is_empty() {
        push_section(&mut lines, SECTION_DUPLICATES);
        for (column, count) in &content.duplicate_rows {
            lines.push(format!("  {column}: {count}"));
        }
    }

    push_section(&mut lines, SECTION_NULLS);
    for (column, count) in &content.null_rows {
        lines.push(format!("  {column}: {count}"));
    }

    push_section(&mut lines, SECTION_TYPES);
    for (column, label) in &content.type_rows {
        lines.push(format!("  {column}: {label}"));
    }

    if !content.skipped_rows.is_empty() {
        push_section(&mut lines, SECTION_SKIPPED);
        for row in &content.skipped_rows {
            lines.push(format!("  {row}"));
        }
    }

    if !content.chart_paths.is_empty() {
        push_section(&mut lines, SECTION_CHARTS);
        for path in &content.chart_paths {
            lines.push(format!("  {}", path.display()));
        }
    }

    lines
}

fn push_section(lines: &mut Vec<String>, heading: &str) {
    lines.push(String::new());
    lines.push(format!("-- {heading} --"));
}

fn paginate(lines: &[String], page_lines: usize) -> String {
    let mut pages = Vec::new();
    for (index, chunk) in lines.chunks(page_lines).enumerate() {
        let page_number = index + 1;
        let mut page = format!("--- página {page_number} / page {page_number} ---\n");
        page.push_str(&chunk.join("\n"));
        pages.push(page);
    }
    let mut text = pages.join("\n\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn short_reports_fit_one_page() {
        let text = paginate(&lines(5), 40);
        assert!(text.starts_with("--- página 1 / page 1 ---"));
        assert!(!text.contains("page 2"));
    }

    #[test]
    fn long_reports_break_into_pages() {
        let text = paginate(&lines(90), 40);
        assert!(text.contains("--- página 1 / page 1 ---"));
        assert!(text.contains("--- página 2 / page 2 ---"));
        assert!(text.contains("--- página 3 / page 3 ---"));
    }

    #[test]
    fn section_order_matches_the_html_variant() {
        let content = ReportContent {
            generated_at: "2026-01-01T00:00:00Z".to_string(),
            total_records: 2,
            missing_columns: Vec::new(),
            duplicate_rows: vec![("id".to_string(), 1)],
            null_rows: vec![("nombre".to_string(), 1)],
            type_rows: vec![("id".to_string(), "integer".to_string())],
            skipped_rows: Vec::new(),
            chart_paths: Vec::new(),
        };
        let lines = build_lines(&content);
        let duplicates = lines
            .iter()
            .position(|l| l.contains(SECTION_DUPLICATES))
            .unwrap();
        let nulls = lines.iter().position(|l| l.contains(SECTION_NULLS)).unwrap();
        let types = lines.iter().position(|l| l.contains(SECTION_TYPES)).unwrap();
        assert!(duplicates < nulls && nulls < types);
    }
}
