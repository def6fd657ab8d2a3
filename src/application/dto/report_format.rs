/// Output format enumeration for the vulnerability report
///
/// Both the CLI and the formatter factory need to understand it, so it
/// lives in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One row per finding (default)
    #[default]
    Csv,
    /// Findings plus failed images and summary counts
    Json,
}

impl ReportFormat {
    /// File extension used for the default output file name
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'csv' or 'json'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_report_format_from_str() {
        assert_eq!(ReportFormat::from_str("csv").unwrap(), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_str("JSON").unwrap(), ReportFormat::Json);
    }

    #[test]
    fn test_report_format_from_str_invalid() {
        let error = ReportFormat::from_str("markdown").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("markdown"));
    }

    #[test]
    fn test_report_format_default_and_display() {
        assert_eq!(ReportFormat::default(), ReportFormat::Csv);
        assert_eq!(ReportFormat::Csv.to_string(), "csv");
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }
}
