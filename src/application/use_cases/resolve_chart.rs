use crate::chart_scanning::domain::ChartSource;
use crate::ports::outbound::{ChartArchive, ChartRenderer, RenderOptions, RenderTarget};
use crate::shared::error::ResolutionError;
use std::path::Path;

/// Sub-directory of the scratch workspace that receives expanded archives
const EXPANDED_CHART_DIR: &str = "chart";

/// ResolveChartUseCase - Turns a chart source into rendered manifest bytes
///
/// Local archives are expanded into the scratch workspace and rendered from
/// there; repository charts get their repository registered first and are
/// rendered by reference. Errors are returned as-is and never retried.
///
/// # Type Parameters
/// * `R` - ChartRenderer implementation
/// * `A` - ChartArchive implementation
pub struct ResolveChartUseCase<R, A> {
    renderer: R,
    archive: A,
}

impl<R, A> ResolveChartUseCase<R, A>
where
    R: ChartRenderer,
    A: ChartArchive,
{
    pub fn new(renderer: R, archive: A) -> Self {
        Self { renderer, archive }
    }

    /// Resolves `source` into a multi-document YAML stream
    ///
    /// `work_dir` must already exist; only the local-archive path writes
    /// into it.
    pub async fn execute(
        &self,
        source: &ChartSource,
        options: &RenderOptions,
        work_dir: &Path,
    ) -> Result<Vec<u8>, ResolutionError> {
        let target = match source {
            ChartSource::Local { archive_path } => {
                let destination = work_dir.join(EXPANDED_CHART_DIR);
                let chart_root = self.archive.expand(archive_path, &destination)?;
                tracing::debug!(chart_root = %chart_root.display(), "expanded chart archive");
                RenderTarget::Directory(chart_root)
            }
            ChartSource::Repository(chart) => {
                self.renderer.ensure_repository(chart).await?;
                RenderTarget::Repository {
                    reference: chart.reference(),
                    version: chart.version().to_string(),
                }
            }
        };

        let manifest = self.renderer.render(&target, options).await?;
        tracing::info!(bytes = manifest.len(), "rendered chart manifests");
        Ok(manifest)
    }
}
