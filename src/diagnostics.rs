use std::sync::Mutex;

/// Receives a message for every failed request. Must never fail.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Emits reports as error-level tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &str) {
        tracing::error!(diagnostic = message, "Cluster request failed");
    }
}

/// Keeps reports in memory for embedders that render them.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<String> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, message: &str) {
        // A poisoned lock still holds usable data; reporting must not panic.
        let mut reports = match self.reports.lock() {
            Ok(reports) => reports,
            Err(poisoned) => poisoned.into_inner(),
        };
        reports.push(message.to_string());
    }
}
