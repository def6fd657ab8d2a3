use serde::Serialize;
use std::fmt;

/// Vulnerability severity with a strict total order
///
/// `Unknown < Low < Medium < High < Critical`; threshold checks compare with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityLevel {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    /// Maps a scanner-provided severity string, case-insensitively.
    ///
    /// Anything outside the table maps to `Unknown`; severities are never
    /// inferred from numeric scores.
    pub fn from_scanner(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => SeverityLevel::Critical,
            "high" => SeverityLevel::High,
            "medium" | "moderate" => SeverityLevel::Medium,
            "low" => SeverityLevel::Low,
            _ => SeverityLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Unknown => "UNKNOWN",
            SeverityLevel::Low => "LOW",
            SeverityLevel::Medium => "MEDIUM",
            SeverityLevel::High => "HIGH",
            SeverityLevel::Critical => "CRITICAL",
        }
    }
}

impl std::str::FromStr for SeverityLevel {
    type Err = String;

    /// Strict parser for user input (CLI / config)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" => Ok(SeverityLevel::Unknown),
            "low" => Ok(SeverityLevel::Low),
            "medium" => Ok(SeverityLevel::Medium),
            "high" => Ok(SeverityLevel::High),
            "critical" => Ok(SeverityLevel::Critical),
            _ => Err(format!(
                "Invalid severity: {}. Please specify 'unknown', 'low', 'medium', 'high' or 'critical'",
                s
            )),
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_severity_total_order() {
        assert!(SeverityLevel::Unknown < SeverityLevel::Low);
        assert!(SeverityLevel::Low < SeverityLevel::Medium);
        assert!(SeverityLevel::Medium < SeverityLevel::High);
        assert!(SeverityLevel::High < SeverityLevel::Critical);
    }

    #[test]
    fn test_from_scanner_case_insensitive() {
        assert_eq!(SeverityLevel::from_scanner("HIGH"), SeverityLevel::High);
        assert_eq!(SeverityLevel::from_scanner("high"), SeverityLevel::High);
        assert_eq!(SeverityLevel::from_scanner("Critical"), SeverityLevel::Critical);
        assert_eq!(SeverityLevel::from_scanner(" low "), SeverityLevel::Low);
    }

    #[test]
    fn test_from_scanner_unrecognized_maps_to_unknown() {
        assert_eq!(SeverityLevel::from_scanner("NEGLIGIBLE"), SeverityLevel::Unknown);
        assert_eq!(SeverityLevel::from_scanner(""), SeverityLevel::Unknown);
        assert_eq!(SeverityLevel::from_scanner("7.5"), SeverityLevel::Unknown);
    }

    #[test]
    fn test_from_str_strict() {
        assert_eq!(SeverityLevel::from_str("Medium").unwrap(), SeverityLevel::Medium);
        let error = SeverityLevel::from_str("severe").unwrap_err();
        assert!(error.contains("Invalid severity"));
    }

    #[test]
    fn test_display_uppercase() {
        assert_eq!(SeverityLevel::High.to_string(), "HIGH");
        assert_eq!(SeverityLevel::Unknown.to_string(), "UNKNOWN");
    }
}
