/// Progress feedback for the scan pipeline.
///
/// Implementations write to a human-facing channel (stderr) and must never
/// touch the report destination, so stdout stays clean for `--output -`.
pub trait ProgressReporter {
    /// Announces a pipeline step (rendering, extraction, scanning)
    fn report(&self, message: &str);

    /// Advances the per-image scan counter
    ///
    /// `current` counts finished scans, `total` is the number of unique images.
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Warnings that do not stop the run: skipped documents, failed scans
    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
