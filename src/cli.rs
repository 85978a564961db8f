//! # Command Line Interface
//!
//! Starts the portal server or prints its OpenAPI document.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use utoipa::OpenApi;

use crate::api::{build_router_with_config, docs::ApiDoc, start_api_server, ApiState};
use crate::auth::StaticTokenIdentityProvider;
use crate::config::AppConfig;
use crate::observability::{init_observability, log_config_info};
use crate::services::InMemoryPortal;
use crate::{APP_NAME, VERSION};

#[derive(Parser, Debug)]
#[command(name = "portal-rest")]
#[command(about = "Public portal REST surface")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (overrides PORTAL_CONFIG)
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the portal HTTP server
    Serve {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind to
        #[arg(short, long)]
        addr: Option<String>,

        /// Prefix every portal resource is mounted under
        #[arg(long)]
        base_path: Option<String>,

        /// Populate the in-memory services with a demo API and application
        #[arg(long)]
        seed_demo_data: bool,
    },

    /// Print the OpenAPI document as JSON
    Openapi,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve { port: None, addr: None, base_path: None, seed_demo_data: false }
    }
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Commands::Serve { port, addr, base_path, seed_demo_data } => {
            let mut config = match cli.config.as_deref() {
                Some(path) => AppConfig::load_from(Some(path)),
                None => AppConfig::load(),
            }
            .context("failed to load configuration")?;

            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(addr) = addr {
                config.server.host = addr;
            }
            if let Some(base_path) = base_path {
                config.server.base_path = base_path;
            }
            config.validate().context("invalid configuration")?;

            serve(config, seed_demo_data).await
        }
        Commands::Openapi => {
            let document = ApiDoc::openapi()
                .to_pretty_json()
                .context("failed to render OpenAPI document")?;
            println!("{}", document);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, seed_demo_data: bool) -> anyhow::Result<()> {
    init_observability(&config.observability).await?;
    info!(app_name = APP_NAME, version = VERSION, "Starting portal REST service");
    log_config_info(&config);

    let portal = Arc::new(InMemoryPortal::new());
    if seed_demo_data {
        portal.seed_demo_data().await;
        info!("Seeded demo portal data");
    }

    let identity = Arc::new(StaticTokenIdentityProvider::from_config(&config.auth.tokens));
    let state = ApiState::from_portal(portal, &config.server.base_path);
    let router = build_router_with_config(state, identity, &config.server);

    start_api_server(&config.server, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::try_parse_from([
            "portal-rest",
            "--config",
            "portal.toml",
            "serve",
            "--port",
            "9001",
            "--base-path",
            "/portal/environments/DEFAULT",
            "--seed-demo-data",
        ])
        .expect("valid arguments");

        assert_eq!(cli.config.as_deref(), Some("portal.toml"));
        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                port: Some(9001),
                addr: None,
                base_path: Some("/portal/environments/DEFAULT".into()),
                seed_demo_data: true,
            })
        );
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["portal-rest"]).expect("valid arguments");
        assert_eq!(cli.command.unwrap_or_default(), Commands::default());
    }
}
