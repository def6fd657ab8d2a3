use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - report produced, possibly with some failed scans
    Success = 0,
    /// The chart could not be resolved into rendered manifests
    ResolutionFailure = 1,
    /// The rendered chart contained no container images
    ExtractionFailure = 2,
    /// Every image scan failed
    AllScansFailed = 3,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 4,
    /// Application error (config, workspace, output I/O, etc.)
    ApplicationError = 5,
    /// Interrupted by the user
    Cancelled = 130,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ResolutionFailure => write!(f, "Resolution Failure (1)"),
            ExitCode::ExtractionFailure => write!(f, "Extraction Failure (2)"),
            ExitCode::AllScansFailed => write!(f, "All Scans Failed (3)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (4)"),
            ExitCode::ApplicationError => write!(f, "Application Error (5)"),
            ExitCode::Cancelled => write!(f, "Cancelled (130)"),
        }
    }
}

/// Why a chart could not be turned into rendered manifests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    /// Local archive missing, unreadable or corrupt
    BadArchive,
    /// Repository unknown, or chart/version not found in it
    NotFound,
    /// The render collaborator exited non-zero
    RenderFailed,
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionErrorKind::BadArchive => write!(f, "bad chart archive"),
            ResolutionErrorKind::NotFound => write!(f, "chart not found"),
            ResolutionErrorKind::RenderFailed => write!(f, "chart rendering failed"),
        }
    }
}

/// Chart resolution failure. Never retried by the resolver.
#[derive(Debug, Clone, Error)]
#[error("Failed to resolve chart ({kind})\nDetails: {detail}\n\n💡 Hint: {}", hint_for(.kind))]
pub struct ResolutionError {
    pub kind: ResolutionErrorKind,
    pub detail: String,
}

impl ResolutionError {
    pub fn new(kind: ResolutionErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn bad_archive(detail: impl Into<String>) -> Self {
        Self::new(ResolutionErrorKind::BadArchive, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ResolutionErrorKind::NotFound, detail)
    }

    pub fn render_failed(detail: impl Into<String>) -> Self {
        Self::new(ResolutionErrorKind::RenderFailed, detail)
    }
}

fn hint_for(kind: &ResolutionErrorKind) -> &'static str {
    match kind {
        ResolutionErrorKind::BadArchive => {
            "Please verify that the archive exists and is a packaged chart (helm package)"
        }
        ResolutionErrorKind::NotFound => {
            "Please check the repository name, chart name and version (pass --repo-url to register the repository)"
        }
        ResolutionErrorKind::RenderFailed => {
            "Run `helm template` manually with the same values to see the full error"
        }
    }
}

/// Image extraction failure
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    #[error("No container images found in the rendered chart ({skipped_documents} document(s) could not be parsed)\n\n💡 Hint: Check that the chart renders workloads with the given values")]
    EmptyResult { skipped_documents: usize },
}

/// Why a single image scan failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanFailureKind {
    /// The scanner could not be launched or exited non-zero
    ProcessError,
    /// The scanner did not finish within the per-scan timeout
    Timeout,
    /// The scanner output could not be understood
    MalformedOutput,
}

impl fmt::Display for ScanFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanFailureKind::ProcessError => write!(f, "process error"),
            ScanFailureKind::Timeout => write!(f, "timeout"),
            ScanFailureKind::MalformedOutput => write!(f, "malformed output"),
        }
    }
}

/// Per-image scan failure, captured as data and never propagated as an abort
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
#[error("{kind}: {detail}")]
pub struct ScanFailure {
    pub kind: ScanFailureKind,
    pub detail: String,
}

impl ScanFailure {
    pub fn new(kind: ScanFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn process_error(detail: impl Into<String>) -> Self {
        Self::new(ScanFailureKind::ProcessError, detail)
    }

    pub fn malformed_output(detail: impl Into<String>) -> Self {
        Self::new(ScanFailureKind::MalformedOutput, detail)
    }

    pub fn timeout(limit: Duration) -> Self {
        Self::new(
            ScanFailureKind::Timeout,
            format!("scan did not finish within {}s", limit.as_secs_f64()),
        )
    }
}

/// Pipeline-level error. Wraps the first fatal cause.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("All {} image scan(s) failed\n\n💡 Hint: Check that trivy is installed and can reach the image registries", .failures.len())]
    AllScansFailed {
        failures: Vec<crate::chart_scanning::domain::ImageFailure>,
    },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Failed to prepare scratch workspace\nDetails: {details}\n\n💡 Hint: Please verify that the temporary directory is writable")]
    Workspace { details: String },
}

impl FatalError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FatalError::Resolution(_) => ExitCode::ResolutionFailure,
            FatalError::Extraction(_) => ExitCode::ExtractionFailure,
            FatalError::AllScansFailed { .. } => ExitCode::AllScansFailed,
            FatalError::Cancelled => ExitCode::Cancelled,
            FatalError::Workspace { .. } => ExitCode::ApplicationError,
        }
    }
}

/// Application-specific errors for the ambient plumbing (config, output).
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
