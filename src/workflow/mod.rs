pub mod types;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cluster::{ClusterOperation, TransportFailure};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::outcome::Outcome;

pub use types::{Phase, WorkflowState};

/// Recorded when the request task is torn down before the operation settles.
pub const ABORTED_MESSAGE: &str = "request aborted before settling";

/// Single-flight coordinator for cluster requests issued by one context.
///
/// At most one operation is outstanding at a time. A `submit` while busy is
/// ignored; every accepted request returns the state to idle once it
/// settles, whether it succeeded, failed or panicked.
pub struct RequestWorkflow<T>
where
    T: Send + Sync + 'static,
{
    state: Arc<watch::Sender<WorkflowState>>,
    operation: Arc<dyn ClusterOperation<T>>,
    sink: Arc<dyn DiagnosticSink>,
}

/// Result of a `submit` call.
#[derive(Debug)]
pub enum Submission {
    /// The request was dispatched.
    Accepted(InFlight),
    /// Another request was still outstanding; nothing happened.
    Ignored,
    /// No tokio runtime to run the request on; nothing happened.
    NoRuntime,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }

    pub fn into_in_flight(self) -> Option<InFlight> {
        match self {
            Submission::Accepted(in_flight) => Some(in_flight),
            Submission::Ignored | Submission::NoRuntime => None,
        }
    }
}

/// Handle to a dispatched request. Dropping it does not cancel the request.
#[derive(Debug)]
pub struct InFlight {
    request_id: String,
    handle: JoinHandle<Option<Outcome>>,
}

impl InFlight {
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Wait for the request to settle.
    ///
    /// Returns the outcome the cluster operation produced, or `None` if it
    /// failed. By the time this returns the workflow is idle again.
    pub async fn settled(self) -> Option<Outcome> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    request_id = %self.request_id,
                    error = %e,
                    "Cluster request task did not complete"
                );
                None
            }
        }
    }
}

impl<T> RequestWorkflow<T>
where
    T: Send + Sync + 'static,
{
    /// Create an idle workflow that reports failures through tracing.
    pub fn new(operation: Arc<dyn ClusterOperation<T>>) -> Self {
        Self::with_sink(operation, Arc::new(TracingSink))
    }

    pub fn with_sink(operation: Arc<dyn ClusterOperation<T>>, sink: Arc<dyn DiagnosticSink>) -> Self {
        let (state, _) = watch::channel(WorkflowState::default());
        Self {
            state: Arc::new(state),
            operation,
            sink,
        }
    }

    /// Observe every state change.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> WorkflowState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().busy
    }

    /// Request id of the most recent attempt that settled with an outcome.
    pub fn deployed(&self) -> Option<String> {
        self.state.borrow().deployed.clone()
    }

    /// Dispatch a request for `target` unless one is already in flight.
    ///
    /// Returns as soon as the operation is spawned. Outside a tokio runtime
    /// nothing is dispatched and the state is left untouched.
    pub fn submit(&self, target: T, request_id: impl Into<String>) -> Submission {
        let request_id = request_id.into();

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    error = %e,
                    "No tokio runtime, cannot dispatch cluster request"
                );
                return Submission::NoRuntime;
            }
        };

        let accepted = self.state.send_if_modified(|state| {
            if state.busy {
                return false;
            }
            state.busy = true;
            state.last_error = None;
            true
        });

        if !accepted {
            tracing::debug!(request_id = %request_id, "Request already in flight, ignoring submit");
            return Submission::Ignored;
        }

        tracing::info!(request_id = %request_id, "Dispatching cluster request");

        let guard = SettleGuard {
            state: Arc::clone(&self.state),
            sink: Arc::clone(&self.sink),
            request_id: request_id.clone(),
            settled: false,
            resolved: false,
            failure: None,
        };
        let operation = Arc::clone(&self.operation);

        let handle = runtime.spawn(async move {
            let mut guard = guard;
            let result = operation.request(&target, &guard.request_id).await;
            guard.record(result)
        });

        Submission::Accepted(InFlight { request_id, handle })
    }
}

/// Returns the workflow to idle when the request task ends, however it ends.
struct SettleGuard {
    state: Arc<watch::Sender<WorkflowState>>,
    sink: Arc<dyn DiagnosticSink>,
    request_id: String,
    settled: bool,
    resolved: bool,
    failure: Option<String>,
}

impl SettleGuard {
    fn record(&mut self, result: Result<Outcome, TransportFailure>) -> Option<Outcome> {
        self.settled = true;
        match result {
            Ok(outcome) => {
                tracing::info!(
                    request_id = %self.request_id,
                    outcome = %outcome.kind(),
                    has_value = outcome.is_value(),
                    detail = %outcome,
                    "Cluster request settled"
                );
                self.resolved = true;
                Some(outcome)
            }
            Err(failure) => {
                self.failure = Some(failure.to_string());
                None
            }
        }
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        let failure = if self.settled {
            self.failure.take()
        } else {
            Some(ABORTED_MESSAGE.to_string())
        };

        // Report before the transition so observers never see idle first.
        if let Some(error) = &failure {
            self.sink
                .report(&format!("request {} failed: {error}", self.request_id));
        }

        let deployed = self.resolved.then(|| self.request_id.clone());

        self.state.send_modify(|state| {
            state.busy = false;
            state.last_error = failure;
            if deployed.is_some() {
                state.deployed = deployed;
            }
        });
    }
}
