use chrono::Local;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use helm_vuln_scan::adapters::outbound::process::{HelmCli, TrivyScanner};
use helm_vuln_scan::application::dto::{RenderOptions, ReportFormat, ScanRequest};
use helm_vuln_scan::chart_scanning::domain::{ChartSource, RepositoryChart, SeverityLevel};
use helm_vuln_scan::config::ConfigFile;
use helm_vuln_scan::shared::error::AppError;
use helm_vuln_scan::shared::Result;

/// Scan every container image a Helm chart deploys for known vulnerabilities
#[derive(Parser, Debug)]
#[command(name = "helm-vuln-scan")]
#[command(version)]
#[command(about = "Vulnerability reporting tool for Helm charts", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase diagnostic logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a chart, scan its images and write the report
    Scan(ScanArgs),
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["archive", "repo"])))]
pub struct ScanArgs {
    /// Packaged chart archive (.tgz) on local disk
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Helm repository name (requires --chart and --chart-version)
    #[arg(long, value_name = "NAME", requires_all = ["chart", "chart_version"])]
    pub repo: Option<String>,

    /// Chart name inside the repository
    #[arg(long, value_name = "NAME", requires = "repo")]
    pub chart: Option<String>,

    /// Chart version to render
    #[arg(long = "chart-version", value_name = "VERSION", requires = "repo")]
    pub chart_version: Option<String>,

    /// Repository URL; registers the repository before rendering
    #[arg(long, value_name = "URL", requires = "repo")]
    pub repo_url: Option<String>,

    /// Output file path ("-" for stdout; defaults to <date>_vulnerabilities.<ext>)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format: csv or json
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Minimum severity to report: unknown, low, medium, high or critical
    #[arg(long, value_name = "LEVEL")]
    pub min_severity: Option<SeverityLevel>,

    /// Maximum number of concurrent image scans
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-image scan timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Namespace passed to helm template
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Release name passed to helm template
    #[arg(long, value_name = "NAME")]
    pub release_name: Option<String>,

    /// Values file passed to helm template (repeatable)
    #[arg(long = "values", value_name = "FILE")]
    pub values: Vec<PathBuf>,

    /// Value override passed to helm template (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Vulnerability id to leave out of the report (repeatable)
    #[arg(long = "ignore", value_name = "ID")]
    pub ignore: Vec<String>,

    /// helm executable
    #[arg(long, value_name = "PATH")]
    pub helm_bin: Option<String>,

    /// trivy executable
    #[arg(long, value_name = "PATH")]
    pub trivy_bin: Option<String>,

    /// Config file (defaults to ./helm-vuln-scan.config.yml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Everything a scan run needs after merging flags, config file and defaults
#[derive(Debug)]
pub struct ScanSettings {
    pub request: ScanRequest,
    pub format: ReportFormat,
    pub output: PathBuf,
    pub helm_binary: String,
    pub trivy_binary: String,
}

impl ScanArgs {
    /// Builds the chart source; clap has already enforced archive XOR repo
    pub fn chart_source(&self) -> Result<ChartSource> {
        if let Some(archive) = &self.archive {
            return Ok(ChartSource::local(archive.clone()));
        }

        let (Some(repo), Some(chart), Some(version)) =
            (&self.repo, &self.chart, &self.chart_version)
        else {
            return Err(AppError::Validation {
                message: "--repo requires --chart and --chart-version".to_string(),
            }
            .into());
        };

        let mut repository = RepositoryChart::new(repo.clone(), chart.clone(), version.clone())
            .map_err(invalid_argument)?;
        if let Some(url) = &self.repo_url {
            repository = repository
                .with_repo_url(url.clone())
                .map_err(invalid_argument)?;
        }
        Ok(ChartSource::Repository(repository))
    }

    /// Merges flags over the config file over built-in defaults
    pub fn into_settings(self, config: &ConfigFile) -> Result<ScanSettings> {
        let source = self.chart_source()?;
        let format = self.format.or(config.format()).unwrap_or_default();

        let render_options = RenderOptions {
            release_name: self
                .release_name
                .or_else(|| config.release_name.clone())
                .unwrap_or_else(|| RenderOptions::DEFAULT_RELEASE_NAME.to_string()),
            namespace: self.namespace.or_else(|| config.namespace.clone()),
            values_files: prefer_flags(self.values, &config.values_files),
            set_values: prefer_flags(self.set, &config.set_values),
        };

        let mut ignored = config.ignored_ids();
        ignored.extend(self.ignore);

        let request = ScanRequest::builder(source)
            .render_options(render_options)
            .min_severity(
                self.min_severity
                    .or(config.min_severity())
                    .unwrap_or(ScanRequest::DEFAULT_MIN_SEVERITY),
            )
            .concurrency(
                self.concurrency
                    .or(config.concurrency)
                    .unwrap_or(ScanRequest::DEFAULT_CONCURRENCY),
            )
            .scan_timeout(
                self.timeout
                    .or(config.timeout_secs)
                    .map(Duration::from_secs)
                    .unwrap_or(ScanRequest::DEFAULT_TIMEOUT),
            )
            .ignored_vulnerabilities(ignored)
            .build()?;

        Ok(ScanSettings {
            request,
            format,
            output: self.output.unwrap_or_else(|| default_output_path(format)),
            helm_binary: self
                .helm_bin
                .or_else(|| config.helm_binary.clone())
                .unwrap_or_else(|| HelmCli::DEFAULT_BINARY.to_string()),
            trivy_binary: self
                .trivy_bin
                .or_else(|| config.trivy_binary.clone())
                .unwrap_or_else(|| TrivyScanner::DEFAULT_BINARY.to_string()),
        })
    }
}

/// Repeatable flags replace the config list when given at least once
fn prefer_flags<T: Clone>(flags: Vec<T>, configured: &Option<Vec<T>>) -> Vec<T> {
    if flags.is_empty() {
        configured.clone().unwrap_or_default()
    } else {
        flags
    }
}

/// `<YYYY-MM-DD>_vulnerabilities.<ext>` in the current directory
pub fn default_output_path(format: ReportFormat) -> PathBuf {
    PathBuf::from(format!(
        "{}_vulnerabilities.{}",
        Local::now().format("%Y-%m-%d"),
        format.extension()
    ))
}

/// Chart coordinates rejected by the domain are argument errors, not runtime ones
fn invalid_argument(error: anyhow::Error) -> anyhow::Error {
    AppError::Validation {
        message: error.to_string(),
    }
    .into()
}
