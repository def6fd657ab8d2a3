use super::command::{describe_status, run_captured, stderr_excerpt};
use crate::chart_scanning::domain::{ImageRef, RawFinding};
use crate::ports::outbound::ImageScanner;
use crate::shared::error::ScanFailure;
use async_trait::async_trait;
use serde::Deserialize;

/// Subset of the trivy JSON report this adapter reads
#[derive(Debug, Deserialize)]
struct TrivyReport {
    #[serde(rename = "Results", default)]
    results: Option<Vec<TrivyResult>>,
}

#[derive(Debug, Deserialize)]
struct TrivyResult {
    #[serde(rename = "Vulnerabilities", default)]
    vulnerabilities: Option<Vec<TrivyVulnerability>>,
}

#[derive(Debug, Deserialize)]
struct TrivyVulnerability {
    #[serde(rename = "PkgName")]
    pkg_name: String,
    #[serde(rename = "VulnerabilityID")]
    vulnerability_id: String,
    #[serde(rename = "Severity", default)]
    severity: Option<String>,
}

/// TrivyScanner adapter: scans one image with `trivy image`
///
/// This adapter implements the ImageScanner port. The severity threshold is
/// not passed to trivy; every finding is returned and filtered later so
/// UNKNOWN severities stay visible at the lowest threshold.
pub struct TrivyScanner {
    binary: String,
}

impl TrivyScanner {
    pub const DEFAULT_BINARY: &'static str = "trivy";

    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn scan_args(image: &ImageRef) -> [&str; 7] {
        [
            "image",
            "--format",
            "json",
            "--quiet",
            "--scanners",
            "vuln",
            image.as_str(),
        ]
    }
}

impl Default for TrivyScanner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BINARY)
    }
}

#[async_trait]
impl ImageScanner for TrivyScanner {
    async fn scan(&self, image: &ImageRef) -> Result<Vec<RawFinding>, ScanFailure> {
        let output = run_captured(&self.binary, Self::scan_args(image))
            .await
            .map_err(|e| {
                ScanFailure::process_error(format!("failed to launch {}: {}", self.binary, e))
            })?;

        if !output.status.success() {
            return Err(ScanFailure::process_error(format!(
                "{} {}: {}",
                self.binary,
                describe_status(&output),
                stderr_excerpt(&output)
            )));
        }

        parse_report(&output.stdout)
    }
}

/// Parses trivy's JSON report into raw findings
///
/// A report without `Results`, or results with `Vulnerabilities: null`, is a
/// clean scan. Empty or non-JSON output is `MalformedOutput`.
pub(crate) fn parse_report(stdout: &[u8]) -> Result<Vec<RawFinding>, ScanFailure> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(ScanFailure::malformed_output("scanner produced no output"));
    }

    let report: TrivyReport = serde_json::from_slice(stdout)
        .map_err(|e| ScanFailure::malformed_output(format!("invalid scanner JSON: {}", e)))?;

    let findings = report
        .results
        .unwrap_or_default()
        .into_iter()
        .flat_map(|result| result.vulnerabilities.unwrap_or_default())
        .map(|vulnerability| {
            RawFinding::new(
                vulnerability.pkg_name,
                vulnerability.vulnerability_id,
                vulnerability.severity.unwrap_or_default(),
            )
        })
        .collect();

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ScanFailureKind;

    const SAMPLE_REPORT: &str = r#"{
        "SchemaVersion": 2,
        "ArtifactName": "nginx:1.25",
        "Results": [
            {
                "Target": "nginx:1.25 (debian 12.4)",
                "Class": "os-pkgs",
                "Vulnerabilities": [
                    {"VulnerabilityID": "CVE-2024-0001", "PkgName": "openssl", "Severity": "HIGH"},
                    {"VulnerabilityID": "CVE-2023-0002", "PkgName": "zlib", "Severity": "LOW"}
                ]
            },
            {
                "Target": "usr/local/bin/app",
                "Class": "lang-pkgs",
                "Vulnerabilities": null
            }
        ]
    }"#;

    #[test]
    fn test_parse_report() {
        let findings = parse_report(SAMPLE_REPORT.as_bytes()).unwrap();
        assert_eq!(
            findings,
            vec![
                RawFinding::new("openssl", "CVE-2024-0001", "HIGH"),
                RawFinding::new("zlib", "CVE-2023-0002", "LOW"),
            ]
        );
    }

    #[test]
    fn test_parse_report_without_results() {
        let findings = parse_report(br#"{"SchemaVersion": 2, "ArtifactName": "scratch"}"#).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_parse_report_missing_severity_is_empty_string() {
        let findings = parse_report(
            br#"{"Results":[{"Vulnerabilities":[{"VulnerabilityID":"GHSA-1","PkgName":"lib"}]}]}"#,
        )
        .unwrap();
        assert_eq!(findings, vec![RawFinding::new("lib", "GHSA-1", "")]);
    }

    #[test]
    fn test_parse_report_empty_output() {
        let failure = parse_report(b"  \n").unwrap_err();
        assert_eq!(failure.kind, ScanFailureKind::MalformedOutput);
    }

    #[test]
    fn test_parse_report_invalid_json() {
        let failure = parse_report(b"FATAL image scan error").unwrap_err();
        assert_eq!(failure.kind, ScanFailureKind::MalformedOutput);
        assert!(failure.detail.contains("invalid scanner JSON"));
    }

    #[test]
    fn test_scan_args() {
        let image = ImageRef::new("ghcr.io/org/app:1.0").unwrap();
        assert_eq!(
            TrivyScanner::scan_args(&image),
            [
                "image",
                "--format",
                "json",
                "--quiet",
                "--scanners",
                "vuln",
                "ghcr.io/org/app:1.0"
            ]
        );
    }

    #[tokio::test]
    async fn test_scan_missing_binary_is_process_error() {
        let scanner = TrivyScanner::new("helm-vuln-scan-no-such-trivy");
        let image = ImageRef::new("app:1.0").unwrap();
        let failure = scanner.scan(&image).await.unwrap_err();
        assert_eq!(failure.kind, ScanFailureKind::ProcessError);
    }
}
