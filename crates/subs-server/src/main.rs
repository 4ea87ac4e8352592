//! subs-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), applies `.env`
//! and `SUBS_*` overrides, opens the SQLite store, and serves the REST API
//! under `/api/v1` until Ctrl-C or SIGTERM.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use subs_server::{ServerConfig, expand_tilde};
use subs_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Subscription ledger REST server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the resolved configuration and exit.
  #[arg(long)]
  print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // `.env` is optional; real environment variables take precedence.
  dotenvy::dotenv().ok();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  if cli.print_config {
    println!("{server_cfg:#?}");
    return Ok(());
  }

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server_cfg.log_level)),
    )
    .init();

  let store = if server_cfg.store_path.as_os_str() == ":memory:" {
    tracing::warn!("using in-memory store; data will not survive a restart");
    SqliteStore::open_in_memory()
      .await
      .context("failed to open in-memory store")?
  } else {
    let store_path = expand_tilde(&server_cfg.store_path);
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?
  };

  let app = subs_server::app(Arc::new(store));
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}{}", subs_server::API_PREFIX);

  axum::serve(listener, app)
    .with_graceful_shutdown(subs_server::shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}
