use crate::chart_scanning::domain::{ImageRef, RawFinding};
use crate::shared::error::ScanFailure;
use async_trait::async_trait;

/// ImageScanner port for the vulnerability scan collaborator
///
/// # Async Support
/// Scans run concurrently, so implementations must be `Send + Sync`.
/// Dropping the returned future must stop the underlying scan; the
/// dispatcher relies on that for timeouts and cancellation.
#[async_trait]
pub trait ImageScanner: Send + Sync {
    /// Scans one image and returns its raw findings
    ///
    /// # Errors
    /// Returns a `ScanFailure` (`ProcessError` or `MalformedOutput`) for this
    /// image only. Timeouts are enforced by the caller.
    async fn scan(&self, image: &ImageRef) -> Result<Vec<RawFinding>, ScanFailure>;
}
