use super::command::{describe_status, run_captured, stderr_excerpt};
use crate::chart_scanning::domain::RepositoryChart;
use crate::ports::outbound::{ChartRenderer, RenderOptions, RenderTarget};
use crate::shared::error::ResolutionError;
use async_trait::async_trait;
use std::ffi::OsString;

/// stderr fragments helm prints when a repository, chart or version is missing
const NOT_FOUND_MARKERS: &[&str] = &[
    "no chart version found",
    "no chart name found",
    "no repo named",
    "repo not found",
    "chart not found",
    "not found in",
    "failed to download",
];

/// HelmCli adapter: renders charts with `helm template`
///
/// This adapter implements the ChartRenderer port by shelling out to the
/// helm binary. Repository registration uses `helm repo add/update`.
pub struct HelmCli {
    binary: String,
}

impl HelmCli {
    pub const DEFAULT_BINARY: &'static str = "helm";

    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Builds the `helm template` argument list
    fn template_args(target: &RenderTarget, options: &RenderOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["template".into(), options.release_name.clone().into()];

        match target {
            RenderTarget::Directory(path) => args.push(path.clone().into_os_string()),
            RenderTarget::Repository { reference, version } => {
                args.push(reference.into());
                args.push("--version".into());
                args.push(version.into());
            }
        }

        if let Some(namespace) = &options.namespace {
            args.push("--namespace".into());
            args.push(namespace.into());
        }
        for values_file in &options.values_files {
            args.push("--values".into());
            args.push(values_file.clone().into_os_string());
        }
        for set_value in &options.set_values {
            args.push("--set".into());
            args.push(set_value.into());
        }

        args
    }

    fn is_not_found(stderr: &str) -> bool {
        let lowered = stderr.to_lowercase();
        NOT_FOUND_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    }

    async fn run_repo_command(&self, args: &[&str]) -> Result<(), ResolutionError> {
        let output = run_captured(&self.binary, args).await.map_err(|e| {
            ResolutionError::render_failed(format!("failed to launch {}: {}", self.binary, e))
        })?;

        if output.status.success() {
            return Ok(());
        }

        Err(ResolutionError::not_found(format!(
            "`{} {}` failed ({}): {}",
            self.binary,
            args.join(" "),
            describe_status(&output),
            stderr_excerpt(&output)
        )))
    }
}

impl Default for HelmCli {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BINARY)
    }
}

#[async_trait]
impl ChartRenderer for HelmCli {
    async fn ensure_repository(&self, chart: &RepositoryChart) -> Result<(), ResolutionError> {
        if let Some(url) = chart.repo_url() {
            tracing::info!(repo = chart.repo_name(), url, "registering chart repository");
            self.run_repo_command(&["repo", "add", "--force-update", chart.repo_name(), url])
                .await?;
        }

        tracing::info!(repo = chart.repo_name(), "updating chart repository index");
        self.run_repo_command(&["repo", "update", chart.repo_name()])
            .await
    }

    async fn render(
        &self,
        target: &RenderTarget,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, ResolutionError> {
        let args = Self::template_args(target, options);
        tracing::debug!(binary = %self.binary, ?args, "running helm template");

        let output = run_captured(&self.binary, &args).await.map_err(|e| {
            ResolutionError::render_failed(format!("failed to launch {}: {}", self.binary, e))
        })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = stderr_excerpt(&output);
        let detail = format!("helm template {}: {}", describe_status(&output), stderr);
        if Self::is_not_found(&stderr) {
            Err(ResolutionError::not_found(detail))
        } else {
            Err(ResolutionError::render_failed(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ResolutionErrorKind;
    use std::path::PathBuf;

    fn args_as_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_template_args_for_directory() {
        let args = HelmCli::template_args(
            &RenderTarget::Directory(PathBuf::from("/tmp/work/chart/app")),
            &RenderOptions::default(),
        );
        assert_eq!(
            args_as_strings(args),
            vec!["template", "helm-vuln-scan", "/tmp/work/chart/app"]
        );
    }

    #[test]
    fn test_template_args_for_repository_with_options() {
        let options = RenderOptions {
            release_name: "demo".to_string(),
            namespace: Some("prod".to_string()),
            values_files: vec![PathBuf::from("values-prod.yaml")],
            set_values: vec!["image.tag=1.2.3".to_string()],
        };
        let args = HelmCli::template_args(
            &RenderTarget::Repository {
                reference: "bitnami/nginx".to_string(),
                version: "15.0.0".to_string(),
            },
            &options,
        );
        assert_eq!(
            args_as_strings(args),
            vec![
                "template",
                "demo",
                "bitnami/nginx",
                "--version",
                "15.0.0",
                "--namespace",
                "prod",
                "--values",
                "values-prod.yaml",
                "--set",
                "image.tag=1.2.3",
            ]
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(HelmCli::is_not_found(
            "Error: chart \"nginx\" version \"99.0.0\" not found in https://charts.example.com repository"
        ));
        assert!(HelmCli::is_not_found("Error: no repo named \"bitnami\" found"));
        assert!(!HelmCli::is_not_found(
            "Error: parse error at (app/templates/deployment.yaml:12)"
        ));
    }

    #[tokio::test]
    async fn test_render_missing_binary_is_render_failed() {
        let helm = HelmCli::new("helm-vuln-scan-no-such-helm");
        let error = helm
            .render(
                &RenderTarget::Directory(PathBuf::from(".")),
                &RenderOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(error.kind, ResolutionErrorKind::RenderFailed);
        assert!(error.detail.contains("failed to launch"));
    }
}
