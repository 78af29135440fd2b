use std::collections::BTreeMap;

use serde::Deserialize;

use crate::catalog::DeployableApp;
use crate::error::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Fallback filter used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Deployable apps keyed by their catalog id.
    #[serde(default)]
    pub apps: BTreeMap<String, DeployableApp>,
}

fn default_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("clusterdeploy").required(false));
        }

        // Environment variable overrides with CLUSTERDEPLOY_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("CLUSTERDEPLOY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
