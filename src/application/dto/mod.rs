/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod report_format;
mod scan_request;
mod scan_response;

pub use crate::ports::outbound::RenderOptions;
pub use report_format::ReportFormat;
pub use scan_request::{ScanRequest, ScanRequestBuilder};
pub use scan_response::ScanResponse;
