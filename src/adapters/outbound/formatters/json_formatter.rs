use crate::chart_scanning::domain::{ImageFailure, ReportRow, ScanReport, SeverityLevel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    metadata: Metadata,
    summary: Summary,
    findings: &'a [ReportRow],
    failures: Vec<FailureEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tool: Tool,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    total_findings: usize,
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
    unknown: usize,
    failed_images: usize,
    ignored_findings: usize,
}

#[derive(Debug, Serialize)]
struct FailureEntry<'a> {
    image: &'a str,
    kind: crate::shared::error::ScanFailureKind,
    detail: &'a str,
}

/// JsonFormatter adapter for machine-readable reports
///
/// Unlike the CSV output, the JSON report also lists the images whose scans
/// failed, so a partial report can be told apart from a clean one.
pub struct JsonFormatter {
    timestamp: Option<String>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { timestamp: None }
    }

    /// Pins the report timestamp instead of using the current time
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
        }
    }

    fn summarize(report: &ScanReport) -> Summary {
        let mut summary = Summary {
            total_findings: report.rows.len(),
            failed_images: report.failures.len(),
            ignored_findings: report.ignored_count,
            ..Summary::default()
        };
        for row in &report.rows {
            match row.severity {
                SeverityLevel::Critical => summary.critical += 1,
                SeverityLevel::High => summary.high += 1,
                SeverityLevel::Medium => summary.medium += 1,
                SeverityLevel::Low => summary.low += 1,
                SeverityLevel::Unknown => summary.unknown += 1,
            }
        }
        summary
    }

    fn failure_entry(failure: &ImageFailure) -> FailureEntry<'_> {
        FailureEntry {
            image: failure.image.as_str(),
            kind: failure.reason.kind,
            detail: &failure.reason.detail,
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let document = JsonReport {
            metadata: Metadata {
                timestamp: self
                    .timestamp
                    .clone()
                    .unwrap_or_else(|| Utc::now().to_rfc3339()),
                tool: Tool {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                },
            },
            summary: Self::summarize(report),
            findings: &report.rows,
            failures: report.failures.iter().map(Self::failure_entry).collect(),
        };

        serde_json::to_string_pretty(&document).map_err(Into::into)
    }
}
