use crate::chart_scanning::domain::{ChartSource, SeverityLevel};
use crate::ports::outbound::RenderOptions;
use crate::shared::error::AppError;
use std::time::Duration;

/// ScanRequest - Internal request DTO for the chart scan use case
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Where the chart comes from
    pub source: ChartSource,
    /// Passed through to the render collaborator untouched
    pub render_options: RenderOptions,
    /// Findings below this level are dropped from the report
    pub min_severity: SeverityLevel,
    /// Maximum number of scans in flight
    pub concurrency: usize,
    /// Per-scan time limit
    pub scan_timeout: Duration,
    /// Vulnerability ids excluded from the report
    pub ignored_vulnerabilities: Vec<String>,
}

impl ScanRequest {
    pub const DEFAULT_CONCURRENCY: usize = 4;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);
    pub const DEFAULT_MIN_SEVERITY: SeverityLevel = SeverityLevel::Medium;

    pub fn builder(source: ChartSource) -> ScanRequestBuilder {
        ScanRequestBuilder::new(source)
    }
}

/// Builder for [`ScanRequest`]; unset fields take the documented defaults
#[derive(Debug, Clone)]
pub struct ScanRequestBuilder {
    source: ChartSource,
    render_options: RenderOptions,
    min_severity: SeverityLevel,
    concurrency: usize,
    scan_timeout: Duration,
    ignored_vulnerabilities: Vec<String>,
}

impl ScanRequestBuilder {
    pub fn new(source: ChartSource) -> Self {
        Self {
            source,
            render_options: RenderOptions::default(),
            min_severity: ScanRequest::DEFAULT_MIN_SEVERITY,
            concurrency: ScanRequest::DEFAULT_CONCURRENCY,
            scan_timeout: ScanRequest::DEFAULT_TIMEOUT,
            ignored_vulnerabilities: Vec::new(),
        }
    }

    pub fn render_options(mut self, render_options: RenderOptions) -> Self {
        self.render_options = render_options;
        self
    }

    pub fn min_severity(mut self, min_severity: SeverityLevel) -> Self {
        self.min_severity = min_severity;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn scan_timeout(mut self, scan_timeout: Duration) -> Self {
        self.scan_timeout = scan_timeout;
        self
    }

    pub fn ignored_vulnerabilities(mut self, ids: Vec<String>) -> Self {
        self.ignored_vulnerabilities = ids;
        self
    }

    /// Validates and builds the request
    ///
    /// # Errors
    /// Returns `AppError::Validation` for a zero concurrency or timeout, an
    /// empty release name, or an empty ignore id.
    pub fn build(self) -> Result<ScanRequest, AppError> {
        if self.concurrency == 0 {
            return Err(validation("concurrency must be at least 1"));
        }
        if self.scan_timeout.is_zero() {
            return Err(validation("scan timeout must be greater than zero"));
        }
        if self.render_options.release_name.trim().is_empty() {
            return Err(validation("release name cannot be empty"));
        }
        if self.ignored_vulnerabilities.iter().any(|id| id.trim().is_empty()) {
            return Err(validation("ignored vulnerability ids cannot be empty"));
        }

        Ok(ScanRequest {
            source: self.source,
            render_options: self.render_options,
            min_severity: self.min_severity,
            concurrency: self.concurrency,
            scan_timeout: self.scan_timeout,
            ignored_vulnerabilities: self.ignored_vulnerabilities,
        })
    }
}

fn validation(message: &str) -> AppError {
    AppError::Validation {
        message: message.to_string(),
    }
}
