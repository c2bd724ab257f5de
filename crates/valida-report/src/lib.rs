//! Report rendering.
//!
//! Two renderer variants share one content builder: the styled HTML report
//! and the simple paginated text report. Both consume a
//! [`valida_model::ValidationResults`] plus the chart artifact paths and
//! write a single document file.

mod content;
mod html;
mod text;

use std::path::{Path, PathBuf};

use anyhow::Result;

use valida_model::ValidationResults;

pub use content::ReportContent;
pub use html::HtmlReportRenderer;
pub use text::TextReportRenderer;

/// A report renderer variant.
pub trait ReportRenderer {
    /// Render `results` and the chart artifacts into a document at
    /// `output_path`, returning the written path.
    fn render(
        &self,
        results: &ValidationResults,
        chart_paths: &[PathBuf],
        output_path: &Path,
    ) -> Result<PathBuf>;
}
