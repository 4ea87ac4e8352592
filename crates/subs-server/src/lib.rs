//! HTTP server wiring for the subscription ledger.
//!
//! Loads [`ServerConfig`], mounts the [`subs_api`] router under
//! [`API_PREFIX`], and provides the shutdown signal used by the binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use subs_core::store::SubscriptionStore;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Versioned base path for every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Prefix for environment overrides, e.g. `SUBS_PORT=9000`.
pub const ENV_PREFIX: &str = "SUBS";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment (environment wins).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite database file; `:memory:` keeps everything in RAM.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Default `tracing` filter directive when `RUST_LOG` is unset.
  #[serde(default = "default_log_level")]
  pub log_level:  String,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("subscriptions.db") }

fn default_log_level() -> String { "info".to_string() }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `SUBS_*` environment
  /// variables. Missing keys take their defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with_env(path, None)
  }

  /// As [`ServerConfig::load`], reading `SUBS_*` variables from `env`
  /// instead of the process environment when it is given.
  pub fn load_with_env(
    path: &Path,
    env: Option<config::Map<String, String>>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix(ENV_PREFIX)
          .try_parsing(true)
          .source(env),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the API under [`API_PREFIX`], Swagger UI at
/// [`subs_api::docs::SWAGGER_PATH`], and per-request tracing spans.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: SubscriptionStore + 'static,
{
  Router::new()
    .nest(API_PREFIX, subs_api::api_router(store))
    .merge(subs_api::docs::docs_router())
    .layer(TraceLayer::new_for_http())
}

// ─── Shutdown ─────────────────────────────────────────────────────────────────

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to install Ctrl-C handler");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => tracing::info!("received Ctrl-C"),
    _ = terminate => tracing::info!("received SIGTERM"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use subs_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  fn temp_path(ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("subs-server-{}.{ext}", uuid::Uuid::new_v4()))
  }

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(&temp_path("toml")).unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("subscriptions.db"));
    assert_eq!(cfg.log_level, "info");
  }

  #[test]
  fn file_values_override_defaults() {
    let path = temp_path("toml");
    std::fs::write(
      &path,
      "host = \"127.0.0.1\"\nport = 9000\nstore_path = \"/var/lib/subs.db\"\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:9000");
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/subs.db"));
    assert_eq!(cfg.log_level, "info");

    std::fs::remove_file(&path).unwrap();
  }

  #[test]
  fn environment_overrides_file() {
    let path = temp_path("toml");
    std::fs::write(&path, "port = 9000\nlog_level = \"warn\"\n").unwrap();

    let env: config::Map<String, String> = [
      ("SUBS_PORT".to_owned(), "9100".to_owned()),
      ("SUBS_STORE_PATH".to_owned(), ":memory:".to_owned()),
      ("OTHER_PORT".to_owned(), "1".to_owned()),
    ]
    .into_iter()
    .collect();

    let cfg = ServerConfig::load_with_env(&path, Some(env)).unwrap();
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.store_path, PathBuf::from(":memory:"));
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.host, "0.0.0.0");

    std::fs::remove_file(&path).unwrap();
  }

  #[test]
  fn tilde_is_expanded_only_at_start() {
    let plain = PathBuf::from("/data/subs.db");
    assert_eq!(expand_tilde(&plain), plain);
    let inner = PathBuf::from("data/~/subs.db");
    assert_eq!(expand_tilde(&inner), inner);
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let app = app(store);

    let req = Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder().uri("/api/v1/subscriptions").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, serde_json::json!([]));

    let req = Request::builder().uri("/subscriptions").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = Request::builder().uri("/swagger/doc.json").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
