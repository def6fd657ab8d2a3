//! Configuration file support for helm-vuln-scan.
//!
//! Provides YAML-based configuration through `helm-vuln-scan.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::application::dto::ReportFormat;
use crate::chart_scanning::domain::SeverityLevel;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_CONFIG_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "helm-vuln-scan.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub min_severity: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub format: Option<String>,
    pub namespace: Option<String>,
    pub release_name: Option<String>,
    pub values_files: Option<Vec<PathBuf>>,
    pub set_values: Option<Vec<String>>,
    pub helm_binary: Option<String>,
    pub trivy_binary: Option<String>,
    pub ignore_vulnerabilities: Option<Vec<IgnoreVulnerability>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A vulnerability to leave out of the report.
#[derive(Debug, Deserialize)]
pub struct IgnoreVulnerability {
    pub id: String,
    pub reason: Option<String>,
}

impl ConfigFile {
    /// Parsed `min_severity`, if set. Validated at load time.
    pub fn min_severity(&self) -> Option<SeverityLevel> {
        self.min_severity
            .as_deref()
            .and_then(|s| SeverityLevel::from_str(s).ok())
    }

    /// Parsed `format`, if set. Validated at load time.
    pub fn format(&self) -> Option<ReportFormat> {
        self.format
            .as_deref()
            .and_then(|s| ReportFormat::from_str(s).ok())
    }

    /// Ids from `ignore_vulnerabilities`
    pub fn ignored_ids(&self) -> Vec<String> {
        self.ignore_vulnerabilities
            .iter()
            .flatten()
            .map(|entry| entry.id.trim().to_string())
            .collect()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let size = validate_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;
    validate_file_size(size, path, MAX_CONFIG_SIZE)?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref value) = config.min_severity {
        if let Err(e) = SeverityLevel::from_str(value) {
            bail!("Invalid config: min_severity: {}", e);
        }
    }
    if let Some(ref value) = config.format {
        if let Err(e) = ReportFormat::from_str(value) {
            bail!("Invalid config: format: {}", e);
        }
    }
    if config.concurrency == Some(0) {
        bail!(
            "Invalid config: concurrency must be at least 1.\n\n\
             💡 Hint: Omit the field to use the default of 4 parallel scans."
        );
    }
    if config.timeout_secs == Some(0) {
        bail!("Invalid config: timeout_secs must be greater than 0.");
    }
    if let Some(ref ignored) = config.ignore_vulnerabilities {
        for (i, entry) in ignored.iter().enumerate() {
            if entry.id.trim().is_empty() {
                bail!(
                    "Invalid config: ignore_vulnerabilities[{}].id must not be empty.\n\n\
                     💡 Hint: Each ignore_vulnerabilities entry must have a non-empty 'id' field (e.g., \"CVE-2024-1234\").",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
