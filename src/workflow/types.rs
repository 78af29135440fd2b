use serde::Serialize;

/// Whether a request is currently outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InFlight,
}

/// Busy/error record owned by one request-issuing context.
///
/// Does not keep the [`crate::outcome::Outcome`]; that is handed to the
/// caller through [`super::InFlight::settled`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowState {
    /// True exactly while a request is outstanding.
    pub busy: bool,
    /// Set when the most recent attempt failed, cleared on a new attempt.
    pub last_error: Option<String>,
    /// Request id of the most recent attempt that settled with an outcome.
    /// Survives later failures; never gates `submit`.
    pub deployed: Option<String>,
}

impl WorkflowState {
    pub fn is_deployed(&self) -> bool {
        self.deployed.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.busy {
            Phase::InFlight
        } else {
            Phase::Idle
        }
    }
}
