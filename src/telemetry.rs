use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{AppError, Result};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .map_err(|e| AppError::Config(format!("invalid log filter '{}': {e}", logging.filter)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| AppError::Internal(format!("failed to install tracing subscriber: {e}")))
}
