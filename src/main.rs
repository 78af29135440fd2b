use clap::{Parser, Subcommand};

use clusterdeploy::catalog::{Catalog, DeployableApp};
use clusterdeploy::config::{AppConfig, LoggingConfig};

#[derive(Parser)]
#[command(name = "clusterdeploy", about = "Deployable app catalog for real-time clusters")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every deployable app in the catalog
    Apps {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one deployable app
    App {
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            clusterdeploy::telemetry::init(&LoggingConfig::default())?;
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    clusterdeploy::telemetry::init(&config.logging)?;

    let catalog = Catalog::from_config(&config.catalog)?;
    tracing::debug!(apps = catalog.len(), "Catalog ready");

    match cli.command {
        Command::Apps { json } => {
            if json {
                let apps: std::collections::BTreeMap<&str, &DeployableApp> = catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&apps)?);
            } else if catalog.is_empty() {
                println!("No deployable apps configured");
            } else {
                for (id, app) in catalog.iter() {
                    println!("{id}\t{}\t{} nodes", app.name, app.cluster_size);
                }
            }
        }
        Command::App { id, json } => {
            let app = catalog.lookup(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(app)?);
            } else {
                println!("{}", app.name);
                println!("  WebAssembly package: {} ({})", app.storage_hash, app.storage_type);
                println!("  Cluster size: {} nodes", app.cluster_size);
            }
        }
    }

    Ok(())
}
