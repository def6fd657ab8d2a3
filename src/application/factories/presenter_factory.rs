use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::{Path, PathBuf};

/// Output path that selects stdout instead of a file
pub const STDOUT_MARKER: &str = "-";

/// Presenter type enumeration for factory pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// `-` selects stdout, anything else is a file path
    pub fn for_output(path: &Path) -> Self {
        if path == Path::new(STDOUT_MARKER) {
            PresenterType::Stdout
        } else {
            PresenterType::File(path.to_path_buf())
        }
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use helm_vuln_scan::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_for_output_dash_is_stdout() {
        assert_eq!(PresenterType::for_output(Path::new("-")), PresenterType::Stdout);
    }

    #[test]
    fn test_for_output_path_is_file() {
        assert_eq!(
            PresenterType::for_output(Path::new("reports/out.csv")),
            PresenterType::File(PathBuf::from("reports/out.csv"))
        );
    }

    #[test]
    fn test_create_file_presenter_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));
        presenter.present("header\n").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "header\n");
    }
}
