use super::{DispatchScansUseCase, ResolveChartUseCase};
use crate::application::dto::{ScanRequest, ScanResponse};
use crate::chart_scanning::domain::{ImageFailure, ScanOutcome, ScanReport};
use crate::chart_scanning::services::{ImageExtractor, ResultAggregator};
use crate::ports::outbound::{ChartArchive, ChartRenderer, ImageScanner, ProgressReporter};
use crate::shared::error::FatalError;
use std::future::Future;
use std::path::Path;
use tempfile::TempDir;

/// Prefix of the scratch workspace created under the system temp dir
const WORKSPACE_PREFIX: &str = "helm-vuln-scan-";

/// ScanChartUseCase - The pipeline controller
///
/// Sequences resolve → extract → dispatch → aggregate and owns the scratch
/// workspace for the duration of a run. The workspace is a `TempDir`, so it
/// is removed on success, on every error path, on cancellation and when
/// unwinding from a panic.
///
/// # Type Parameters
/// * `R` - ChartRenderer implementation
/// * `A` - ChartArchive implementation
/// * `S` - ImageScanner implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanChartUseCase<R, A, S, PR> {
    resolver: ResolveChartUseCase<R, A>,
    dispatcher: DispatchScansUseCase<S>,
    progress_reporter: PR,
}

impl<R, A, S, PR> ScanChartUseCase<R, A, S, PR>
where
    R: ChartRenderer,
    A: ChartArchive,
    S: ImageScanner,
    PR: ProgressReporter,
{
    /// Creates a new ScanChartUseCase with injected dependencies
    pub fn new(renderer: R, archive: A, scanner: S, progress_reporter: PR) -> Self {
        Self {
            resolver: ResolveChartUseCase::new(renderer, archive),
            dispatcher: DispatchScansUseCase::new(scanner),
            progress_reporter,
        }
    }

    /// Runs the pipeline to completion
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse, FatalError> {
        self.execute_with_shutdown(request, std::future::pending())
            .await
    }

    /// Runs the pipeline until it finishes or `shutdown` resolves
    ///
    /// When `shutdown` wins, every in-flight scan is dropped (killing its
    /// process), the workspace is removed and `FatalError::Cancelled` is
    /// returned. No partial report is produced.
    pub async fn execute_with_shutdown<F>(
        &self,
        request: ScanRequest,
        shutdown: F,
    ) -> Result<ScanResponse, FatalError>
    where
        F: Future<Output = ()>,
    {
        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|e| FatalError::Workspace {
                details: e.to_string(),
            })?;
        tracing::debug!(workspace = %workspace.path().display(), "created scratch workspace");

        let result = tokio::select! {
            result = self.run_pipeline(&request, workspace.path()) => result,
            _ = shutdown => {
                self.progress_reporter
                    .report_completion("🛑 Scan cancelled, no report written");
                Err(FatalError::Cancelled)
            }
        };

        Self::release_workspace(workspace);
        result
    }

    async fn run_pipeline(
        &self,
        request: &ScanRequest,
        work_dir: &Path,
    ) -> Result<ScanResponse, FatalError> {
        // Step 1: Resolve the chart into rendered manifests
        self.progress_reporter
            .report(&format!("📦 Rendering chart: {}", request.source));
        let manifest = self
            .resolver
            .execute(&request.source, &request.render_options, work_dir)
            .await?;

        // Step 2: Extract the distinct images
        let extracted = ImageExtractor::extract(&manifest)?;
        for skipped in &extracted.skipped_documents {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: skipped manifest document #{}: {}",
                skipped.index + 1,
                skipped.reason
            ));
        }
        self.progress_reporter.report(&format!(
            "✅ Found {} distinct image(s)",
            extracted.images.len()
        ));

        // Step 3: Scan every image
        let outcomes = self
            .dispatcher
            .execute(
                &extracted.images,
                request.concurrency,
                request.scan_timeout,
                &self.progress_reporter,
            )
            .await;

        if outcomes.values().all(ScanOutcome::is_failed) {
            let failures = outcomes
                .into_iter()
                .filter_map(|(image, outcome)| match outcome {
                    ScanOutcome::Failed(reason) => Some(ImageFailure { image, reason }),
                    ScanOutcome::Findings(_) => None,
                })
                .collect();
            return Err(FatalError::AllScansFailed { failures });
        }

        // Step 4: Aggregate into the final report
        let aggregator =
            ResultAggregator::with_ignored_vulnerabilities(request.ignored_vulnerabilities.clone());
        let report = aggregator.aggregate(outcomes, request.min_severity);
        self.report_summary(&report, extracted.images.len());

        Ok(ScanResponse::new(
            report,
            extracted.images.into_iter().collect(),
            extracted.skipped_documents.len(),
        ))
    }

    /// Prints the row count, ignored findings and the failed images
    fn report_summary(&self, report: &ScanReport, image_count: usize) {
        self.progress_reporter.report(&format!(
            "📊 {} finding(s) at or above the severity threshold",
            report.rows.len()
        ));
        if report.ignored_count > 0 {
            self.progress_reporter.report(&format!(
                "🙈 {} finding(s) ignored by configuration",
                report.ignored_count
            ));
        }
        if report.is_partial() {
            self.progress_reporter.report_error(&format!(
                "⚠️  {} of {} image scan(s) failed; the report is partial:",
                report.failures.len(),
                image_count
            ));
            for failure in &report.failures {
                self.progress_reporter
                    .report_error(&format!("   - {}: {}", failure.image, failure.reason));
            }
        }
    }

    fn release_workspace(workspace: TempDir) {
        let path = workspace.path().to_path_buf();
        if let Err(e) = workspace.close() {
            tracing::warn!(workspace = %path.display(), error = %e, "failed to remove scratch workspace");
        }
    }
}
