//! JSON API for incident feedback.
//!
//! Exposes an axum [`Router`] backed by any
//! [`feedback_core::store::FeedbackStore`]. TLS, auth and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(feedback_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod feedback;

use std::sync::Arc;

use axum::{Router, routing::post};
use feedback_core::store::FeedbackStore;

pub use error::ApiError;
pub use feedback::{FeedbackRequest, FeedbackResponse};

/// Build the feedback router for `store`.
///
/// The returned `Router<()>` can be merged or nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FeedbackStore + 'static,
{
  Router::new()
    .route("/feedback/status", post(feedback::status::<S>))
    .route("/feedback/like", post(feedback::like::<S>))
    .route("/feedback/dislike", post(feedback::dislike::<S>))
    .route("/feedback/cancel", post(feedback::cancel::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
