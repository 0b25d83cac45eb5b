//! Connection settings for [`SqliteStore`](crate::SqliteStore).

use std::time::Duration;

use serde::Deserialize;

/// Where the database lives and how each connection is tuned.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  /// Filesystem path or SQLite `file:` URI.
  #[serde(default = "default_url")]
  pub url:             String,
  /// How long a connection waits on a locked database before failing.
  #[serde(default = "default_busy_timeout_ms")]
  pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
  pub fn busy_timeout(&self) -> Duration { Duration::from_millis(self.busy_timeout_ms) }
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self { url: default_url(), busy_timeout_ms: default_busy_timeout_ms() }
  }
}

fn default_url() -> String { "feedback.db".to_string() }

fn default_busy_timeout_ms() -> u64 { 5_000 }
