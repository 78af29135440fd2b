use async_trait::async_trait;
use thiserror::Error;

use crate::error::AppError;
use crate::outcome::Outcome;

/// The request never completed a round-trip with the cluster.
///
/// Distinct from the unfavorable [`Outcome`] variants, which are all
/// successful round-trips. The display text is the bare diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportFailure {
    message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for TransportFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for TransportFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<AppError> for TransportFailure {
    fn from(e: AppError) -> Self {
        Self::new(e.to_string())
    }
}

/// The collaborator that actually talks to the cluster.
///
/// Each call must settle exactly once. Timeouts, if any, are the
/// implementation's concern and come back as [`Outcome::Timeout`] or as a
/// [`TransportFailure`].
#[async_trait]
pub trait ClusterOperation<T>: Send + Sync
where
    T: Send + Sync,
{
    async fn request(&self, target: &T, request_id: &str) -> Result<Outcome, TransportFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_message() {
        let failure = TransportFailure::from("network down");
        assert_eq!(failure.to_string(), "network down");
        assert_eq!(failure.message(), "network down");
    }

    #[test]
    fn test_from_app_error_keeps_context() {
        let failure = TransportFailure::from(AppError::Internal("socket closed".to_string()));
        assert_eq!(failure.to_string(), "Internal error: socket closed");
    }
}
