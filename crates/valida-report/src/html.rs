//! Styled HTML report.
//!
//! XHTML generated through the quick-xml event writer, with the embedded
//! stylesheet and section layout of the original report: summary block,
//! duplicates, nulls, detected types, and embedded chart images.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use valida_model::ValidationResults;

use crate::ReportRenderer;
use crate::content::{
    HEADER_COLUMN, HEADER_COUNT, HEADER_TYPE, LABEL_GENERATED, LABEL_MISSING_COLUMNS,
    LABEL_TOTAL_RECORDS, REPORT_TITLE, ReportContent, SECTION_CHARTS, SECTION_DUPLICATES,
    SECTION_NULLS, SECTION_SKIPPED, SECTION_TYPES,
};

const REPORT_CSS: &str = "\
body { font-family: Arial, Helvetica, sans-serif; margin: 40px; }
h1 { color: #2c3e50; }
h2 { color: #2980b9; margin-top: 30px; }
table { border-collapse: collapse; width: 100%; margin-top: 15px; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #2980b9; color: white; }
tr:nth-child(even) { background-color: #f2f2f2; }
.summary { background-color: #ecf0f1; padding: 10px; margin-bottom: 20px; }
img.chart { max-width: 600px; margin-top: 15px; }
";

/// The tabular/styled renderer variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlReportRenderer;

impl ReportRenderer for HtmlReportRenderer {
    fn render(
        &self,
        results: &ValidationResults,
        chart_paths: &[PathBuf],
        output_path: &Path,
    ) -> Result<PathBuf> {
        let content = ReportContent::build(results, chart_paths);
        let file = File::create(output_path)
            .with_context(|| format!("create html report {}", output_path.display()))?;
        write_html(BufWriter::new(file), &content)
            .with_context(|| format!("write html report {}", output_path.display()))?;
        debug!(path = %output_path.display(), "html report written");
        Ok(output_path.to_path_buf())
    }
}

fn write_html<W: Write>(out: W, content: &ReportContent) -> Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::DocType(BytesText::new("html")))?;

    writer.write_event(Event::Start(BytesStart::new("html")))?;
    writer.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "UTF-8"));
    writer.write_event(Event::Empty(meta))?;
    write_text_element(&mut writer, "title", REPORT_TITLE)?;
    write_text_element(&mut writer, "style", REPORT_CSS)?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    write_text_element(&mut writer, "h1", REPORT_TITLE)?;

    let mut summary = BytesStart::new("div");
    summary.push_attribute(("class", "summary"));
    writer.write_event(Event::Start(summary))?;
    write_text_element(
        &mut writer,
        "p",
        &format!("{LABEL_GENERATED}: {}", content.generated_at),
    )?;
    write_text_element(
        &mut writer,
        "p",
        &format!("{LABEL_TOTAL_RECORDS}: {}", content.total_records),
    )?;
    write_text_element(
        &mut writer,
        "p",
        &format!("{LABEL_MISSING_COLUMNS}: {}", content.missing_columns_label()),
    )?;
    writer.write_event(Event::End(BytesEnd::new("div")))?;

    if !content.duplicate_rows.is_empty() {
        write_count_table(
            &mut writer,
            SECTION_DUPLICATES,
            HEADER_COUNT,
            &count_rows(&content.duplicate_rows),
        )?;
    }
    write_count_table(&mut writer, SECTION_NULLS, HEADER_COUNT, &count_rows(&content.null_rows))?;
    write_count_table(&mut writer, SECTION_TYPES, HEADER_TYPE, &content.type_rows)?;

    if !content.skipped_rows.is_empty() {
        write_text_element(&mut writer, "h2", SECTION_SKIPPED)?;
        writer.write_event(Event::Start(BytesStart::new("ul")))?;
        for row in &content.skipped_rows {
            write_text_element(&mut writer, "li", row)?;
        }
        writer.write_event(Event::End(BytesEnd::new("ul")))?;
    }

    if !content.chart_paths.is_empty() {
        write_text_element(&mut writer, "h2", SECTION_CHARTS)?;
        for path in &content.chart_paths {
            let mut img = BytesStart::new("img");
            img.push_attribute(("class", "chart"));
            img.push_attribute(("src", path.display().to_string().as_str()));
            writer.write_event(Event::Empty(img))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;
    Ok(())
}

fn count_rows(rows: &[(String, u64)]) -> Vec<(String, String)> {
    rows.iter()
        .map(|(column, count)| (column.clone(), count.to_string()))
        .collect()
}

/// Write an `h2` heading followed by a two-column table.
fn write_count_table<W: Write>(
    writer: &mut Writer<W>,
    heading: &str,
    value_header: &str,
    rows: &[(String, String)],
) -> Result<()> {
    write_text_element(writer, "h2", heading)?;
    writer.write_event(Event::Start(BytesStart::new("table")))?;
    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    write_text_element(writer, "th", HEADER_COLUMN)?;
    write_text_element(writer, "th", value_header)?;
    writer.write_event(Event::End(BytesEnd::new("tr")))?;
    for (column, value) in rows {
        writer.write_event(Event::Start(BytesStart::new("tr")))?;
        write_text_element(writer, "td", column)?;
        write_text_element(writer, "td", value)?;
        writer.write_event(Event::End(BytesEnd::new("tr")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escapes_cell_text() {
        let content = ReportContent {
            generated_at: "2026-01-01T00:00:00Z".to_string(),
            total_records: 1,
            missing_columns: vec!["a<b".to_string()],
            duplicate_rows: Vec::new(),
            null_rows: vec![("a<b".to_string(), 1)],
            type_rows: vec![("a<b".to_string(), "text".to_string())],
            skipped_rows: Vec::new(),
            chart_paths: Vec::new(),
        };
        let mut buffer = Vec::new();
        write_html(&mut buffer, &content).expect("html");
        let html = String::from_utf8(buffer).expect("utf8");
        assert!(html.contains("a&lt;b"));
        assert!(!html.contains("<b</td>"));
    }
}
