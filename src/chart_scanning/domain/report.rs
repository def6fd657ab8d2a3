use super::{Finding, ImageRef, SeverityLevel};
use crate::shared::error::ScanFailure;
use serde::Serialize;

/// Externally visible shape of a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub image: ImageRef,
    pub component: String,
    pub vulnerability: String,
    pub severity: SeverityLevel,
}

impl From<Finding> for ReportRow {
    fn from(finding: Finding) -> Self {
        Self {
            image: finding.image,
            component: finding.component,
            vulnerability: finding.vulnerability_id,
            severity: finding.severity,
        }
    }
}

/// An image whose scan ended in failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageFailure {
    pub image: ImageRef,
    pub reason: ScanFailure,
}

/// Aggregated result: ordered, deduplicated rows plus the images that failed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub rows: Vec<ReportRow>,
    pub failures: Vec<ImageFailure>,
    /// Findings dropped because their id is on the ignore list
    #[serde(skip)]
    pub ignored_count: usize,
}

impl ScanReport {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}
