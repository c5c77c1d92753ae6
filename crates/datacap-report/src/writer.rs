//! Writes reports under the uploads directory.
//!
//! Layout per verifier:
//!
//! ```text
//! <uploads_dir>/<verifier>/report.md
//! <uploads_dir>/<verifier>/issuance_chart.json
//! <uploads_dir>/<verifier>/datacap_in_clients/histogram_{idx}.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::report::ComplianceReport;

/// Directory of the milestone histograms, relative to the report directory.
pub const HISTOGRAM_DIR: &str = "datacap_in_clients";

/// Paths written for one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WrittenReport {
    /// The markdown file.
    pub report: PathBuf,
    /// Chart files, histograms first.
    pub charts: Vec<PathBuf>,
}

/// Writes reports to disk.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    uploads_dir: PathBuf,
}

impl ReportWriter {
    /// Writer rooted at the configured uploads directory.
    #[must_use]
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            uploads_dir: config.uploads_dir.clone(),
        }
    }

    /// Directory for one verifier.
    #[must_use]
    pub fn report_dir(&self, verifier: &str) -> PathBuf {
        self.uploads_dir.join(verifier)
    }

    /// Writes the markdown and every chart.
    ///
    /// # Errors
    ///
    /// Fails when a directory or file cannot be written.
    pub fn write(&self, report: &ComplianceReport) -> ReportResult<WrittenReport> {
        let dir = self.report_dir(&report.verifier);
        let mut written = WrittenReport {
            report: write_file(&dir, "report.md", report.markdown.as_bytes())?,
            charts: Vec::new(),
        };

        let histogram_dir = dir.join(HISTOGRAM_DIR);
        for (idx, chart) in report.histogram_charts.iter().enumerate() {
            let json = serde_json::to_vec_pretty(chart)?;
            written
                .charts
                .push(write_file(&histogram_dir, &format!("histogram_{idx}.json"), &json)?);
        }

        if let Some(chart) = &report.issuance_chart {
            let json = serde_json::to_vec_pretty(chart)?;
            written
                .charts
                .push(write_file(&dir, "issuance_chart.json", &json)?);
        }

        info!(
            "Wrote report for {} to {} ({} charts)",
            report.verifier,
            written.report.display(),
            written.charts.len()
        );
        Ok(written)
    }
}

fn write_file(dir: &Path, name: &str, content: &[u8]) -> ReportResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;
    let path = dir.join(name);
    fs::write(&path, content).map_err(|e| ReportError::io(&path, e))?;
    Ok(path)
}
