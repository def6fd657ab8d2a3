use crate::chart_scanning::domain::ScanReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Column order of the CSV report
const CSV_HEADER: [&str; 4] = ["image", "component", "vulnerability", "severity"];

/// CsvFormatter adapter for the tabular vulnerability report
///
/// One row per (image, component, vulnerability). The header is always
/// written, so an empty report is a header-only file. Quoting is handled by
/// the `csv` crate (RFC 4180).
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for CsvFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;
        for row in &report.rows {
            writer.write_record([
                row.image.as_str(),
                row.component.as_str(),
                row.vulnerability.as_str(),
                row.severity.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }
}
