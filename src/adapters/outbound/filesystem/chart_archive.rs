use crate::ports::outbound::ChartArchive;
use crate::shared::error::ResolutionError;
use crate::shared::security::{
    validate_file_size, validate_regular_file, MAX_ARCHIVE_SIZE, MAX_ENTRY_SIZE,
};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

const CHART_FILE: &str = "Chart.yaml";

/// TarGzChartArchive adapter for packaged charts (`helm package` output)
///
/// # Security
/// - The archive itself must be a regular file (no symlinks) under 100 MB
/// - Only regular file and directory entries are unpacked; links are skipped
/// - Entries are unpacked with `unpack_in`, which refuses paths escaping
///   the destination
pub struct TarGzChartArchive;

impl TarGzChartArchive {
    pub fn new() -> Self {
        Self
    }

    fn unpack(&self, archive: &Path, destination: &Path) -> Result<(), ResolutionError> {
        let bad = |what: &str, e: &dyn std::fmt::Display| {
            ResolutionError::bad_archive(format!("{}: {} ({})", archive.display(), what, e))
        };

        let file = File::open(archive).map_err(|e| bad("cannot open archive", &e))?;
        let mut tarball = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        let entries = tarball
            .entries()
            .map_err(|e| bad("not a gzip-compressed tar archive", &e))?;

        for entry in entries {
            let mut entry = entry.map_err(|e| bad("corrupt archive entry", &e))?;
            let entry_type = entry.header().entry_type();

            if !(entry_type.is_file() || entry_type.is_dir()) {
                tracing::warn!(
                    entry = %entry.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    "skipping non-regular archive entry"
                );
                continue;
            }

            if entry.size() > MAX_ENTRY_SIZE {
                return Err(ResolutionError::bad_archive(format!(
                    "{}: archive entry exceeds {} bytes",
                    archive.display(),
                    MAX_ENTRY_SIZE
                )));
            }

            let unpacked = entry
                .unpack_in(destination)
                .map_err(|e| bad("failed to unpack entry", &e))?;
            if !unpacked {
                tracing::warn!("skipping archive entry that points outside the chart directory");
            }
        }

        Ok(())
    }
}

impl Default for TarGzChartArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartArchive for TarGzChartArchive {
    fn expand(&self, archive: &Path, destination: &Path) -> Result<PathBuf, ResolutionError> {
        let size = validate_regular_file(archive, "chart archive")
            .map_err(|e| ResolutionError::bad_archive(e.to_string()))?;
        validate_file_size(size, archive, MAX_ARCHIVE_SIZE)
            .map_err(|e| ResolutionError::bad_archive(e.to_string()))?;

        fs::create_dir_all(destination).map_err(|e| {
            ResolutionError::bad_archive(format!(
                "cannot create {}: {}",
                destination.display(),
                e
            ))
        })?;

        self.unpack(archive, destination)?;
        locate_chart_root(destination)
    }
}

/// The chart root is the destination itself or its single subdirectory
/// holding `Chart.yaml` (`helm package` nests everything under `<name>/`).
fn locate_chart_root(destination: &Path) -> Result<PathBuf, ResolutionError> {
    if destination.join(CHART_FILE).is_file() {
        return Ok(destination.to_path_buf());
    }

    let listing = fs::read_dir(destination).map_err(|e| {
        ResolutionError::bad_archive(format!("cannot list {}: {}", destination.display(), e))
    })?;

    let mut roots: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir() && path.join(CHART_FILE).is_file())
        .collect();

    match roots.len() {
        1 => Ok(roots.remove(0)),
        0 => Err(ResolutionError::bad_archive(format!(
            "archive does not contain a {}",
            CHART_FILE
        ))),
        n => Err(ResolutionError::bad_archive(format!(
            "archive contains {} charts; expected exactly one",
            n
        ))),
    }
}
