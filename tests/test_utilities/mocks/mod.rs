/// Mock implementations for testing
mod mock_chart_archive;
mod mock_chart_renderer;
mod mock_image_scanner;
mod mock_progress_reporter;

pub use mock_chart_archive::MockChartArchive;
pub use mock_chart_renderer::MockChartRenderer;
pub use mock_image_scanner::MockImageScanner;
pub use mock_progress_reporter::MockProgressReporter;
