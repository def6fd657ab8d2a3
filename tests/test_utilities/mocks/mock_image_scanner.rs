use async_trait::async_trait;
use helm_vuln_scan::chart_scanning::domain::{ImageRef, RawFinding};
use helm_vuln_scan::ports::outbound::ImageScanner;
use helm_vuln_scan::shared::error::ScanFailure;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Behavior {
    Findings(Vec<RawFinding>),
    Fail(ScanFailure),
    Hang,
}

/// Mock ImageScanner with per-image scripted behavior
///
/// Images without a script return no findings.
#[derive(Clone, Default)]
pub struct MockImageScanner {
    behaviors: HashMap<String, Behavior>,
    pub scanned: Arc<Mutex<Vec<String>>>,
}

impl MockImageScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_findings(mut self, image: &str, findings: Vec<RawFinding>) -> Self {
        self.behaviors
            .insert(image.to_string(), Behavior::Findings(findings));
        self
    }

    pub fn with_failure(mut self, image: &str, failure: ScanFailure) -> Self {
        self.behaviors
            .insert(image.to_string(), Behavior::Fail(failure));
        self
    }

    /// The scan for `image` never finishes on its own
    pub fn with_hang(mut self, image: &str) -> Self {
        self.behaviors.insert(image.to_string(), Behavior::Hang);
        self
    }

    pub fn scanned_images(&self) -> Vec<String> {
        let mut images = self.scanned.lock().unwrap().clone();
        images.sort();
        images
    }
}

#[async_trait]
impl ImageScanner for MockImageScanner {
    async fn scan(&self, image: &ImageRef) -> Result<Vec<RawFinding>, ScanFailure> {
        self.scanned.lock().unwrap().push(image.to_string());
        match self.behaviors.get(image.as_str()).cloned() {
            Some(Behavior::Findings(findings)) => Ok(findings),
            Some(Behavior::Fail(failure)) => Err(failure),
            Some(Behavior::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}
