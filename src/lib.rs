pub mod catalog;
pub mod cluster;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod outcome;
pub mod telemetry;
pub mod workflow;

pub use cluster::{ClusterOperation, TransportFailure};
pub use outcome::{Outcome, OutcomeHandlers};
pub use workflow::{RequestWorkflow, Submission, WorkflowState};
