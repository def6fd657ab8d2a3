use crate::adapters::outbound::formatters::{CsvFormatter, JsonFormatter};
use crate::application::dto::ReportFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Selects the formatter adapter for the requested output format.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use helm_vuln_scan::application::dto::ReportFormat;
    /// use helm_vuln_scan::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(ReportFormat::Csv);
    /// ```
    pub fn create(format: ReportFormat) -> Box<dyn ReportFormatter> {
        match format {
            ReportFormat::Csv => Box::new(CsvFormatter::new()),
            ReportFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use helm_vuln_scan::application::dto::ReportFormat;
    /// use helm_vuln_scan::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(ReportFormat::Csv);
    /// assert_eq!(message, "📝 Writing CSV report...");
    /// ```
    pub fn progress_message(format: ReportFormat) -> &'static str {
        match format {
            ReportFormat::Csv => "📝 Writing CSV report...",
            ReportFormat::Json => "📝 Writing JSON report...",
        }
    }
}
