use crate::shared::error::ResolutionError;
use std::path::{Path, PathBuf};

/// ChartArchive port for unpacking a packaged chart
///
/// This port abstracts the archive format so the resolver only deals with
/// "an archive goes in, a chart directory comes out".
pub trait ChartArchive {
    /// Expands `archive` into `destination` and returns the chart root
    /// (the directory holding `Chart.yaml`)
    ///
    /// # Errors
    /// Returns a `BadArchive` resolution error if the archive is missing,
    /// unreadable, corrupt or does not contain a chart.
    fn expand(&self, archive: &Path, destination: &Path) -> Result<PathBuf, ResolutionError>;
}
