use crate::chart_scanning::domain::ScanReport;
use crate::shared::Result;

/// ReportFormatter port for rendering the final report
///
/// This port abstracts the output format (CSV, JSON).
pub trait ReportFormatter {
    /// Formats the aggregated report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &ScanReport) -> Result<String>;
}
