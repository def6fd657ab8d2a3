use crate::chart_scanning::domain::{Finding, ImageRef, ScanOutcome};
use crate::ports::outbound::{ImageScanner, ProgressReporter};
use crate::shared::error::ScanFailure;
use futures::stream::{self, StreamExt};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// DispatchScansUseCase - Scans every image with bounded concurrency
///
/// At most `concurrency` scans are in flight; the rest start as slots free
/// up. A failing or timed-out scan becomes `ScanOutcome::Failed` for that
/// image only. The call returns once every image has an outcome.
///
/// Dropping the returned future drops every in-flight scan, which is how
/// cancellation reaches the scanner processes.
pub struct DispatchScansUseCase<S> {
    scanner: S,
}

impl<S> DispatchScansUseCase<S>
where
    S: ImageScanner,
{
    pub fn new(scanner: S) -> Self {
        Self { scanner }
    }

    pub async fn execute<PR: ProgressReporter>(
        &self,
        images: &BTreeSet<ImageRef>,
        concurrency: usize,
        scan_timeout: Duration,
        progress_reporter: &PR,
    ) -> BTreeMap<ImageRef, ScanOutcome> {
        let total = images.len();
        let mut outcomes = BTreeMap::new();

        self.report_start(progress_reporter, total, concurrency);

        let mut scans = stream::iter(images.iter().cloned())
            .map(|image| self.scan_one(image, scan_timeout))
            .buffer_unordered(concurrency.max(1));

        while let Some((image, outcome)) = scans.next().await {
            if let ScanOutcome::Failed(reason) = &outcome {
                progress_reporter.report_error(&format!("⚠️  Scan failed for {}: {}", image, reason));
            }
            progress_reporter.report_progress(outcomes.len() + 1, total, Some(image.as_str()));
            outcomes.insert(image, outcome);
        }

        let failed = outcomes.values().filter(|o| o.is_failed()).count();
        progress_reporter.report_completion(&format!(
            "✅ Scanned {} image(s), {} failed",
            total, failed
        ));

        outcomes
    }

    fn report_start<PR: ProgressReporter>(
        &self,
        progress_reporter: &PR,
        total: usize,
        concurrency: usize,
    ) {
        progress_reporter.report(&format!(
            "🛡️  Scanning {} image(s) ({} at a time)...",
            total,
            concurrency.max(1).min(total.max(1))
        ));
        progress_reporter.report_progress(0, total, None);
    }

    async fn scan_one(&self, image: ImageRef, scan_timeout: Duration) -> (ImageRef, ScanOutcome) {
        tracing::info!(image = %image, "scan started");

        let outcome = match tokio::time::timeout(scan_timeout, self.scanner.scan(&image)).await {
            Ok(Ok(raw_findings)) => ScanOutcome::Findings(
                raw_findings
                    .into_iter()
                    .map(|raw| Finding::from_raw(image.clone(), raw))
                    .collect(),
            ),
            Ok(Err(failure)) => ScanOutcome::Failed(failure),
            Err(_) => ScanOutcome::Failed(ScanFailure::timeout(scan_timeout)),
        };

        match &outcome {
            ScanOutcome::Findings(findings) => {
                tracing::info!(image = %image, findings = findings.len(), "scan finished");
            }
            ScanOutcome::Failed(reason) => {
                tracing::warn!(image = %image, kind = %reason.kind, detail = %reason.detail, "scan failed");
            }
        }

        (image, outcome)
    }
}
