//! The `FeedbackStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `feedback-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::feedback::{FeedbackKey, FeedbackSummary, FeedbackType};

/// Abstraction over a feedback storage backend.
///
/// Every method returns the incident's aggregate counts as they stand after
/// the operation, so callers never need a second round trip.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FeedbackStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read counts for `incident_number`, and the latest opinion of `racf`
  /// if one is given. Never writes.
  fn status(
    &self,
    incident_number: String,
    racf: Option<String>,
  ) -> impl Future<Output = Result<FeedbackSummary, Self::Error>> + Send + '_;

  /// Record a like or dislike for `key`.
  ///
  /// Inserts a row when the pair has none, rewrites the latest row in place
  /// when it holds the other opinion, and does nothing otherwise. Commits
  /// once before recomputing the summary.
  fn vote(
    &self,
    key: FeedbackKey,
    feedback_type: FeedbackType,
  ) -> impl Future<Output = Result<FeedbackSummary, Self::Error>> + Send + '_;

  /// Delete every row for `key` and return the recomputed summary.
  fn cancel(
    &self,
    key: FeedbackKey,
  ) -> impl Future<Output = Result<FeedbackSummary, Self::Error>> + Send + '_;
}
