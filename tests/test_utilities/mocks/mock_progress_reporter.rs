use std::sync::{Arc, Mutex};

use helm_vuln_scan::ports::outbound::ProgressReporter;

/// Records every progress event as a tagged line
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|event| event.contains(needle))
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.record(match message {
            Some(image) => format!("Scanned {}/{}: {}", current, total, image),
            None => format!("Scanned {}/{}", current, total),
        });
    }

    fn report_error(&self, message: &str) {
        self.record(format!("Warning: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.record(format!("Done: {}", message));
    }
}
