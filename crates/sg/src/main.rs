use clap::{Parser, Subcommand};
use sg_catalog::FileCatalog;
use sg_core::config::{load_config, ScangateConfig};
use sg_core::sessions::SessionRegistry;
use sg_events::EventBus;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "sg")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Serve,
    Openapi,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve => {
            let config_path = std::env::var("SCANGATE_CONFIG")
                .unwrap_or_else(|_| "scangate.toml".to_string());
            let config = match load_config(Path::new(&config_path)) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("config error: {err}");
                    return;
                }
            };
            let port = std::env::var("SCANGATE_PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .or(config.server.port)
                .unwrap_or(4821);
            let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port);

            let catalog = match load_catalog(&config) {
                Ok(catalog) => catalog,
                Err(err) => {
                    eprintln!("catalog error: {err}");
                    return;
                }
            };

            let state = sg_serve::AppState {
                registry: Arc::new(SessionRegistry::new()),
                event_bus: EventBus::new(1024),
                lookup: Arc::new(catalog),
                default_tuning: config.tuning(),
            };
            if let Err(err) = sg_serve::serve(state, addr).await {
                eprintln!("serve error: {err}");
            }
        }
        Command::Openapi => {
            println!("{}", sg_serve::openapi::generate_spec());
        }
    }
}

fn load_catalog(config: &ScangateConfig) -> Result<FileCatalog, sg_catalog::CatalogError> {
    let path = std::env::var("SCANGATE_CATALOG")
        .ok()
        .map(PathBuf::from)
        .or_else(|| config.catalog.clone());
    match path {
        Some(path) => FileCatalog::load(&path),
        None => Ok(FileCatalog::empty()),
    }
}
