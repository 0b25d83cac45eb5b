//! SQLite backend for the incident feedback service.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Each operation opens its own
//! connection and closes it before returning.

mod config;
mod encode;
mod schema;
mod store;

pub mod error;

pub use config::DatabaseConfig;
pub use error::{Error, Result};
pub use store::SqliteStore;
