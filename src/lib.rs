//! helm-vuln-scan - Vulnerability reporting tool for Helm charts
//!
//! Renders a chart (local archive or repository reference), extracts every
//! container image the rendered manifests reference, scans each image with
//! bounded concurrency and aggregates the findings into one ordered,
//! deduplicated report.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`chart_scanning`): Value objects, image extraction and
//!   result aggregation
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): helm, trivy, archive, formatter and console
//!   implementations of the ports
//! - **Shared** (`shared`): Error types, exit codes and file security checks
//!
//! # Example
//!
//! ```no_run
//! use helm_vuln_scan::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let use_case = ScanChartUseCase::new(
//!     HelmCli::default(),
//!     TarGzChartArchive::new(),
//!     TrivyScanner::default(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ScanRequest::builder(ChartSource::local("app-1.0.0.tgz")).build()?;
//! let response = use_case.execute(request).await?;
//!
//! let output = CsvFormatter::new().format(&response.report)?;
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod chart_scanning;
pub mod config;
pub mod logging;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, StdoutPresenter, TarGzChartArchive,
    };
    pub use crate::adapters::outbound::formatters::{CsvFormatter, JsonFormatter};
    pub use crate::adapters::outbound::process::{HelmCli, TrivyScanner};
    pub use crate::application::dto::{RenderOptions, ReportFormat, ScanRequest, ScanResponse};
    pub use crate::application::use_cases::ScanChartUseCase;
    pub use crate::chart_scanning::domain::{
        ChartSource, ImageRef, RepositoryChart, ReportRow, ScanReport, SeverityLevel,
    };
    pub use crate::chart_scanning::services::{ImageExtractor, ResultAggregator};
    pub use crate::ports::outbound::{
        ChartArchive, ChartRenderer, ImageScanner, OutputPresenter, ProgressReporter,
        ReportFormatter,
    };
    pub use crate::shared::error::{ExitCode, FatalError};
    pub use crate::shared::Result;
}
