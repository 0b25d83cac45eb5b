//! HTTP server wiring for the incident feedback service.
//!
//! Builds the top-level axum [`Router`] around [`feedback_api::api_router`]
//! and loads [`ServerConfig`] from a TOML file layered under `FEEDBACK_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use feedback_core::store::FeedbackStore;
use feedback_store_sqlite::DatabaseConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:     String,
  #[serde(default = "default_port")]
  pub port:     u16,
  #[serde(default)]
  pub database: DatabaseConfig,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8080 }

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Read `path` (if it exists), then apply `FEEDBACK_*` overrides such as
/// `FEEDBACK_PORT` or `FEEDBACK_DATABASE__URL`.
pub fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(
      config::Environment::with_prefix("FEEDBACK")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let mut cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  cfg.database.url = expand_tilde(&cfg.database.url);
  Ok(cfg)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(url: &str) -> String {
  if let Some(rest) = url.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest).to_string_lossy().into_owned();
  }
  url.to_string()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server's [`Router`]: the feedback API plus request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: FeedbackStore + 'static,
{
  Router::new()
    .merge(feedback_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
