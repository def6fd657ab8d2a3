pub mod chart_source;
pub mod finding;
pub mod image_ref;
pub mod report;
pub mod scan_outcome;
pub mod severity;

pub use chart_source::{ChartSource, RepositoryChart};
pub use finding::{Finding, RawFinding};
pub use image_ref::ImageRef;
pub use report::{ImageFailure, ReportRow, ScanReport};
pub use scan_outcome::ScanOutcome;
pub use severity::SeverityLevel;
