mod app;
mod components;
mod config;
mod data;
mod deploy;
mod events;
mod session;
mod theme;
mod utils;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::{Command, Config};
use crate::data::contract::{self, ProductPurchaser, ProductReader};
use crate::data::provider::{self, ChainProvider};
use crate::data::types::ChainConfig;
use crate::data::wallet::{Wallet, WalletConnector};
use crate::data::{chains, StoreService};
use crate::events::AppEvent;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    let Some(chain) = chains::get_chain_config(&config.chain) else {
        bail!(
            "Unknown chain '{}' (supported: {})",
            config.chain,
            chains::supported_chains().join(", ")
        );
    };
    let rpc_url = config.rpc_url.clone().unwrap_or_else(|| chain.rpc_url.clone());

    match &config.command {
        Some(Command::Deploy(args)) => {
            init_logging(None)?;
            deploy::run(args, &chain, &rpc_url, config.private_key.as_deref()).await
        }
        None => {
            init_logging(Some(log_path(&config)))?;
            run_storefront(&config, chain, rpc_url).await
        }
    }
}

/// Logs go to stderr, or to `file` while the terminal belongs to the TUI.
fn init_logging(file: Option<PathBuf>) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jengawize=info".into());

    let file_layer = match file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .wrap_err_with(|| format!("Cannot open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = file_layer
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

fn log_path(config: &Config) -> PathBuf {
    config.log_file.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("jengawize")
            .join("jengawize.log")
    })
}

async fn run_storefront(config: &Config, chain: ChainConfig, rpc_url: String) -> Result<()> {
    // Create event channel
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Read-only proxy for the catalog; building it does not touch the network
    let store = contract::get_contract(provider::read_only(&rpc_url)?);
    let abi = store.interface()?;
    tracing::info!(
        address = %store.address(),
        functions = abi.functions().count(),
        events = abi.events().count(),
        "store contract bound"
    );
    let reader: Arc<dyn ProductReader> = Arc::new(store);

    // Report node reachability once the loop is running
    let tx = event_tx.clone();
    let url = rpc_url.clone();
    let expected_chain_id = chain.chain_id;
    tokio::spawn(async move {
        let event = match ChainProvider::connect(&url).await {
            Ok(node) => {
                if node.chain_id() != expected_chain_id {
                    tracing::warn!(
                        expected = expected_chain_id,
                        actual = node.chain_id(),
                        "RPC endpoint serves a different chain than the preset"
                    );
                }
                AppEvent::Connected(node.chain_id())
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "node unreachable");
                AppEvent::NodeUnreachable(format!("{e:#}"))
            }
        };
        let _ = tx.send(event);
    });

    let wallet = match Wallet::from_config(
        config.wallet_url.as_deref(),
        config.private_key.as_deref(),
        &rpc_url,
    ) {
        Ok(wallet) => wallet.map(Arc::new),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "wallet configuration rejected");
            let _ = event_tx.send(AppEvent::Error(format!("{e:#}")));
            None
        }
    };
    let wallet_kind = wallet.as_ref().map(|w| w.kind());
    let purchaser = wallet.as_ref().map(|w| {
        Arc::new(contract::get_contract(w.signing_provider())) as Arc<dyn ProductPurchaser>
    });
    let connector = wallet.map(|w| w as Arc<dyn WalletConnector>);
    tracing::info!(chain = %chain.name, %rpc_url, wallet = wallet_kind.unwrap_or("none"), "starting storefront");

    // Create store service
    let service = Arc::new(StoreService::new(reader, connector, purchaser, event_tx));

    // Create app
    let mut app = App::with_service(service, event_rx, config.tick_rate_ms);
    app.set_chain_info(chain.name, chain.symbol, chain.explorer_url);
    app.set_wallet_kind(wallet_kind);

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}
