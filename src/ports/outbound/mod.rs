/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (helm, trivy, file system, console).
pub mod chart_archive;
pub mod chart_renderer;
pub mod formatter;
pub mod image_scanner;
pub mod output_presenter;
pub mod progress_reporter;

pub use chart_archive::ChartArchive;
pub use chart_renderer::{ChartRenderer, RenderOptions, RenderTarget};
pub use formatter::ReportFormatter;
pub use image_scanner::ImageScanner;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
