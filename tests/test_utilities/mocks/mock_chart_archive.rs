use helm_vuln_scan::ports::outbound::ChartArchive;
use helm_vuln_scan::shared::error::ResolutionError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock ChartArchive that "expands" by creating the destination directory
#[derive(Clone, Default)]
pub struct MockChartArchive {
    fail_with: Option<ResolutionError>,
    pub expanded_into: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockChartArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ResolutionError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    pub fn expansions(&self) -> Vec<PathBuf> {
        self.expanded_into.lock().unwrap().clone()
    }
}

impl ChartArchive for MockChartArchive {
    fn expand(&self, _archive: &Path, destination: &Path) -> Result<PathBuf, ResolutionError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        std::fs::create_dir_all(destination)
            .map_err(|e| ResolutionError::bad_archive(e.to_string()))?;
        self.expanded_into
            .lock()
            .unwrap()
            .push(destination.to_path_buf());
        Ok(destination.to_path_buf())
    }
}
