use crate::chart_scanning::domain::{ImageRef, ScanReport};

/// ScanResponse - Internal response DTO from the chart scan use case
#[derive(Debug, Clone)]
pub struct ScanResponse {
    /// Ordered, deduplicated rows plus the images whose scans failed
    pub report: ScanReport,
    /// Every distinct image that was dispatched, in lexical order
    pub images: Vec<ImageRef>,
    /// Manifest documents that could not be parsed and were skipped
    pub skipped_documents: usize,
}

impl ScanResponse {
    pub fn new(report: ScanReport, images: Vec<ImageRef>, skipped_documents: usize) -> Self {
        Self {
            report,
            images,
            skipped_documents,
        }
    }

    /// True when some, but not all, scans failed
    pub fn is_partial(&self) -> bool {
        self.report.is_partial()
    }
}
