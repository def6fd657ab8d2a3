use crate::chart_scanning::domain::RepositoryChart;
use crate::shared::error::ResolutionError;
use async_trait::async_trait;
use std::path::PathBuf;

/// What the render collaborator should template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// An expanded chart directory on local disk
    Directory(PathBuf),
    /// `repo/chart` pinned to a version
    Repository { reference: String, version: String },
}

/// Rendering options passed through to the render collaborator untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub release_name: String,
    pub namespace: Option<String>,
    pub values_files: Vec<PathBuf>,
    pub set_values: Vec<String>,
}

impl RenderOptions {
    pub const DEFAULT_RELEASE_NAME: &'static str = "helm-vuln-scan";
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            release_name: Self::DEFAULT_RELEASE_NAME.to_string(),
            namespace: None,
            values_files: Vec::new(),
            set_values: Vec::new(),
        }
    }
}

/// ChartRenderer port for the template-render collaborator
///
/// # Async Support
/// Rendering shells out to an external process, so both methods are async.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Makes sure the chart's repository is registered in the local index
    /// (idempotent add/update)
    ///
    /// # Errors
    /// Returns a `NotFound` resolution error if the repository is unknown.
    async fn ensure_repository(&self, chart: &RepositoryChart) -> Result<(), ResolutionError>;

    /// Renders the target into a multi-document YAML manifest stream
    ///
    /// # Errors
    /// Returns `NotFound` when the chart or version does not exist and
    /// `RenderFailed` (carrying stderr) for any other non-zero exit.
    async fn render(
        &self,
        target: &RenderTarget,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, ResolutionError>;
}
