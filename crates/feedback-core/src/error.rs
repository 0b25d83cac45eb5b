//! Error types for `feedback-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown feedback type: {0:?}")]
  UnknownFeedbackType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
