use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::error::{AppError, Result};

/// Where a deployable app's WebAssembly package is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Ipfs,
    Swarm,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Ipfs => f.write_str("ipfs"),
            StorageType::Swarm => f.write_str("swarm"),
        }
    }
}

/// An app that can be deployed to a real-time cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployableApp {
    pub name: String,
    pub storage_hash: String,
    pub storage_type: StorageType,
    pub cluster_size: u8,
}

/// Static lookup from catalog id to app metadata. Display only.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    apps: BTreeMap<String, DeployableApp>,
}

impl Catalog {
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        for (id, app) in &config.apps {
            if app.cluster_size == 0 {
                return Err(AppError::Config(format!(
                    "catalog entry '{id}' has a cluster size of zero"
                )));
            }
        }

        tracing::debug!(apps = config.apps.len(), "Loaded deployable app catalog");

        Ok(Self {
            apps: config.apps.clone(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&DeployableApp> {
        self.apps.get(id)
    }

    /// Like [`Catalog::get`], but an unknown id is an error.
    pub fn lookup(&self, id: &str) -> Result<&DeployableApp> {
        self.get(id)
            .ok_or_else(|| AppError::Catalog(format!("unknown app id '{id}'")))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeployableApp)> {
        self.apps.iter().map(|(id, app)| (id.as_str(), app))
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(name: &str, cluster_size: u8) -> DeployableApp {
        DeployableApp {
            name: name.to_string(),
            storage_hash: "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".to_string(),
            storage_type: StorageType::Ipfs,
            cluster_size,
        }
    }

    #[test]
    fn test_lookup_known_and_unknown_ids() {
        let mut config = CatalogConfig::default();
        config.apps.insert("redis".to_string(), app("Redis", 4));
        config.apps.insert("llamadb".to_string(), app("LlamaDB", 7));

        let catalog = Catalog::from_config(&config).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("redis").unwrap().cluster_size, 4);
        assert!(catalog.get("tic-tac-toe").is_none());
        assert!(matches!(catalog.lookup("tic-tac-toe"), Err(AppError::Catalog(_))));

        let ids: Vec<&str> = catalog.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["llamadb", "redis"]);
    }

    #[test]
    fn test_rejects_zero_cluster_size() {
        let mut config = CatalogConfig::default();
        config.apps.insert("broken".to_string(), app("Broken", 0));

        assert!(matches!(
            Catalog::from_config(&config),
            Err(AppError::Config(_))
        ));
    }
}
