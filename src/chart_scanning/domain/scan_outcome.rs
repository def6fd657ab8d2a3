use super::Finding;
use crate::shared::error::ScanFailure;

/// Terminal result of scanning one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Findings(Vec<Finding>),
    Failed(ScanFailure),
}

impl ScanOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ScanOutcome::Failed(_))
    }
}
