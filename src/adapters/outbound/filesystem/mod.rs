/// Filesystem adapters for file I/O operations
mod chart_archive;
mod file_writer;

pub use chart_archive::TarGzChartArchive;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
