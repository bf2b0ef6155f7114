//! Application setup and runtime.

use crate::{db, db::LogStore, http};
use std::net::SocketAddr;
use tracing::info;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub store: LogStore,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("invalid SPACEREMIT_ADDR '{0}': {1}")]
  InvalidAddr(String, std::net::AddrParseError),
}

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub addr: SocketAddr,
  pub table_prefix: String,
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build the configuration from any variable source, e.g. a map in tests.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let database_url =
      lookup("SPACEREMIT_DATABASE").unwrap_or_else(|| "sqlite://spaceremit.db".to_string());

    let addr_raw = lookup("SPACEREMIT_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());
    let addr = addr_raw
      .parse()
      .map_err(|e| ConfigError::InvalidAddr(addr_raw.clone(), e))?;

    // Validated when the store is opened.
    let table_prefix = lookup("SPACEREMIT_TABLE_PREFIX").unwrap_or_default();

    Ok(Config {
      database_url,
      addr,
      table_prefix,
    })
  }
}

async fn open_store(config: &Config) -> Result<LogStore, Box<dyn std::error::Error + Send + Sync>> {
  let pool = db::connect(&config.database_url).await?;
  Ok(LogStore::new(pool, &config.table_prefix)?)
}

/// Provision the log table and exit.
pub async fn install() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();
  let config = Config::from_env()?;
  let store = install_with(&config).await?;
  info!("log table ready: {}", store.table());
  Ok(())
}

/// Open the configured store and create its table. Any failure is fatal to
/// installation.
pub async fn install_with(
  config: &Config,
) -> Result<LogStore, Box<dyn std::error::Error + Send + Sync>> {
  let store = open_store(config).await?;
  store.ensure_schema().await?;
  Ok(store)
}

/// Drop the log table and every entry in it.
pub async fn uninstall() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();
  let config = Config::from_env()?;
  let store = uninstall_with(&config).await?;
  info!("log table dropped: {}", store.table());
  Ok(())
}

pub async fn uninstall_with(
  config: &Config,
) -> Result<LogStore, Box<dyn std::error::Error + Send + Sync>> {
  let store = open_store(config).await?;
  store.teardown().await?;
  Ok(store)
}

/// Ensure the log table exists, then serve the listener endpoint.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();

  let config = Config::from_env()?;
  let store = install_with(&config).await?;

  let state = AppState { store };
  let app = http::build_router(state.clone());

  info!("log table:         {}", state.store.table());
  info!("listener endpoint: GET|POST http://{}{}", config.addr, http::LISTENER_PATH);

  let listener = tokio::net::TcpListener::bind(config.addr).await?;
  axum::serve(
    listener,
    app.into_make_service_with_connect_info::<SocketAddr>(),
  )
  .await?;
  Ok(())
}
