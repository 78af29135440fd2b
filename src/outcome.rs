use std::fmt;

use serde::{Deserialize, Serialize};

/// Possible results of a request to the real-time cluster.
///
/// The cluster is distributed and may be unreliable, so a round-trip can
/// legitimately end in any of these four ways. None of them is a transport
/// failure: a request that never completed its round-trip is reported
/// through [`crate::cluster::TransportFailure`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// No response arrived within the allotted window.
    Timeout,
    /// A response arrived but carried no payload.
    Empty,
    /// The cluster answered with a textual payload.
    Value { value: String },
    /// The cluster answered but reported a failure.
    Error { error: String },
}

/// Fieldless mirror of [`Outcome`], used as a logging field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Timeout,
    Empty,
    Value,
    Error,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Timeout => "timeout",
            OutcomeKind::Empty => "empty",
            OutcomeKind::Value => "value",
            OutcomeKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// One handler per [`Outcome`] variant.
///
/// Implementors must cover every variant; extending [`Outcome`] breaks the
/// build at each implementation rather than falling through at runtime.
pub trait OutcomeHandlers<R> {
    fn on_timeout(&mut self) -> R;
    fn on_empty(&mut self) -> R;
    fn on_value(&mut self, value: String) -> R;
    fn on_error(&mut self, error: String) -> R;
}

impl Outcome {
    pub fn timeout() -> Self {
        Outcome::Timeout
    }

    pub fn empty() -> Self {
        Outcome::Empty
    }

    pub fn value(payload: impl Into<String>) -> Self {
        Outcome::Value {
            value: payload.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Outcome::Error {
            error: message.into(),
        }
    }

    /// Hand the outcome to exactly one of `handlers`.
    pub fn dispatch<R, H>(self, handlers: &mut H) -> R
    where
        H: OutcomeHandlers<R> + ?Sized,
    {
        match self {
            Outcome::Timeout => handlers.on_timeout(),
            Outcome::Empty => handlers.on_empty(),
            Outcome::Value { value } => handlers.on_value(value),
            Outcome::Error { error } => handlers.on_error(error),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Timeout => OutcomeKind::Timeout,
            Outcome::Empty => OutcomeKind::Empty,
            Outcome::Value { .. } => OutcomeKind::Value,
            Outcome::Error { .. } => OutcomeKind::Error,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Timeout => f.write_str("timed out"),
            Outcome::Empty => f.write_str("empty response"),
            Outcome::Value { value } => write!(f, "value: {value}"),
            Outcome::Error { error } => write!(f, "cluster error: {error}"),
        }
    }
}
