use crate::shared::Result;
use std::fmt;
use std::path::PathBuf;

/// Maximum length for repository / chart names and versions (security limit)
const MAX_NAME_LENGTH: usize = 255;

/// Where the chart to scan comes from
///
/// Immutable once constructed; consumed once by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSource {
    /// Packaged chart archive (`helm package` output) on local disk
    Local { archive_path: PathBuf },
    /// Chart published in a Helm repository
    Repository(RepositoryChart),
}

impl ChartSource {
    pub fn local(archive_path: impl Into<PathBuf>) -> Self {
        ChartSource::Local {
            archive_path: archive_path.into(),
        }
    }
}

impl fmt::Display for ChartSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartSource::Local { archive_path } => write!(f, "{}", archive_path.display()),
            ChartSource::Repository(chart) => write!(f, "{}", chart),
        }
    }
}

/// Repository chart coordinates, pinned to a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryChart {
    repo_name: String,
    chart_name: String,
    version: String,
    repo_url: Option<String>,
}

impl RepositoryChart {
    pub fn new(repo_name: String, chart_name: String, version: String) -> Result<Self> {
        validate_name(&repo_name, "Repository name")?;
        validate_name(&chart_name, "Chart name")?;
        validate_version(&version)?;

        Ok(Self {
            repo_name,
            chart_name,
            version,
            repo_url: None,
        })
    }

    /// Registers the repository under `repo_name` from this URL before rendering
    pub fn with_repo_url(mut self, url: String) -> Result<Self> {
        let url = url.trim().to_string();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            anyhow::bail!(
                "Repository URL '{}' must start with http:// or https://",
                url
            );
        }
        if url.chars().any(char::is_whitespace) {
            anyhow::bail!("Repository URL '{}' contains whitespace", url);
        }
        self.repo_url = Some(url);
        Ok(self)
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    pub fn chart_name(&self) -> &str {
        &self.chart_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    /// `repo/chart`, the form the render collaborator expects
    pub fn reference(&self) -> String {
        format!("{}/{}", self.repo_name, self.chart_name)
    }
}

impl fmt::Display for RepositoryChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.repo_name, self.chart_name, self.version)
    }
}

fn validate_name(name: &str, what: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("{} cannot be empty", what);
    }

    if name.len() > MAX_NAME_LENGTH {
        anyhow::bail!(
            "{} is too long ({} bytes). Maximum allowed: {} bytes",
            what,
            name.len(),
            MAX_NAME_LENGTH
        );
    }

    // Names are passed as process arguments and joined into `repo/chart`
    if name.starts_with('-')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        anyhow::bail!(
            "{} '{}' contains invalid characters. Only alphanumeric, hyphens, underscores and dots are allowed.",
            what,
            name
        );
    }

    Ok(())
}

fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() {
        anyhow::bail!("Chart version cannot be empty");
    }

    if version.len() > MAX_NAME_LENGTH {
        anyhow::bail!(
            "Chart version is too long ({} bytes). Maximum allowed: {} bytes",
            version.len(),
            MAX_NAME_LENGTH
        );
    }

    if version.starts_with('-') || version.chars().any(char::is_whitespace) {
        anyhow::bail!("Chart version '{}' is not a valid version constraint", version);
    }

    Ok(())
}
