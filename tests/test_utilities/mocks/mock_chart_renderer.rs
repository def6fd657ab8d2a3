use async_trait::async_trait;
use helm_vuln_scan::chart_scanning::domain::RepositoryChart;
use helm_vuln_scan::ports::outbound::{ChartRenderer, RenderOptions, RenderTarget};
use helm_vuln_scan::shared::error::ResolutionError;
use std::sync::{Arc, Mutex};

/// Mock ChartRenderer returning a fixed manifest stream
#[derive(Clone)]
pub struct MockChartRenderer {
    manifest: Result<Vec<u8>, ResolutionError>,
    repository_error: Option<ResolutionError>,
    pub rendered_targets: Arc<Mutex<Vec<RenderTarget>>>,
    pub ensured_repositories: Arc<Mutex<Vec<String>>>,
}

impl MockChartRenderer {
    pub fn with_manifest(manifest: &str) -> Self {
        Self {
            manifest: Ok(manifest.as_bytes().to_vec()),
            repository_error: None,
            rendered_targets: Arc::new(Mutex::new(Vec::new())),
            ensured_repositories: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: ResolutionError) -> Self {
        Self {
            manifest: Err(error),
            ..Self::with_manifest("")
        }
    }

    pub fn with_unknown_repository(mut self, error: ResolutionError) -> Self {
        self.repository_error = Some(error);
        self
    }

    pub fn targets(&self) -> Vec<RenderTarget> {
        self.rendered_targets.lock().unwrap().clone()
    }

    pub fn repositories(&self) -> Vec<String> {
        self.ensured_repositories.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChartRenderer for MockChartRenderer {
    async fn ensure_repository(&self, chart: &RepositoryChart) -> Result<(), ResolutionError> {
        self.ensured_repositories
            .lock()
            .unwrap()
            .push(chart.repo_name().to_string());
        match &self.repository_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn render(
        &self,
        target: &RenderTarget,
        _options: &RenderOptions,
    ) -> Result<Vec<u8>, ResolutionError> {
        self.rendered_targets.lock().unwrap().push(target.clone());
        self.manifest.clone()
    }
}
