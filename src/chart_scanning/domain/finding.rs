use super::{ImageRef, SeverityLevel};

/// One record as reported by the scan collaborator, severity still a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFinding {
    pub component: String,
    pub vulnerability_id: String,
    pub severity: String,
}

impl RawFinding {
    pub fn new(
        component: impl Into<String>,
        vulnerability_id: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            vulnerability_id: vulnerability_id.into(),
            severity: severity.into(),
        }
    }
}

/// One vulnerability instance tied to an image component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub image: ImageRef,
    pub component: String,
    pub vulnerability_id: String,
    pub severity: SeverityLevel,
}

impl Finding {
    pub fn from_raw(image: ImageRef, raw: RawFinding) -> Self {
        Self {
            image,
            severity: SeverityLevel::from_scanner(&raw.severity),
            component: raw.component,
            vulnerability_id: raw.vulnerability_id,
        }
    }
}
