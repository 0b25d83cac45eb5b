//! Handlers for `/feedback` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/feedback/status`  | `similarincident_number` required; `racf` optional |
//! | `POST` | `/feedback/like`    | Both fields required |
//! | `POST` | `/feedback/dislike` | Both fields required |
//! | `POST` | `/feedback/cancel`  | Both fields required; deletes the user's feedback |
//!
//! Every endpoint answers with [`FeedbackResponse`]. A body that is not a
//! JSON object is treated as `{}` and fails validation.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use feedback_core::{
  feedback::{FeedbackKey, FeedbackSummary, FeedbackType},
  store::FeedbackStore,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

const INCIDENT_REQUIRED: &str = "incident_number required";
const PAIR_REQUIRED: &str = "racf and incident_number required";

// ─── Wire types ───────────────────────────────────────────────────────────────

/// Request body shared by all four endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackRequest {
  pub racf:                   Option<String>,
  pub similarincident_number: Option<String>,
}

impl FeedbackRequest {
  /// Read the two fields from a JSON object body. Strings and non-zero
  /// numbers are accepted; `null`, `""`, `false`, `0` and any other JSON
  /// type count as missing. A body that is not a JSON object reads as `{}`.
  fn parse(body: &[u8]) -> Self {
    let fields: Map<String, Value> = serde_json::from_slice(body).unwrap_or_else(|e| {
      tracing::debug!(error = %e, "feedback body is not a JSON object; treating as empty");
      Map::new()
    });

    Self {
      racf:                   field_text(fields.get("racf")),
      similarincident_number: field_text(fields.get("similarincident_number")),
    }
  }

  fn incident_number(&self) -> Option<&str> { non_empty(&self.similarincident_number) }

  fn racf(&self) -> Option<&str> { non_empty(&self.racf) }

  fn key(&self) -> Result<FeedbackKey, ApiError> {
    match (self.incident_number(), self.racf()) {
      (Some(incident), Some(racf)) => Ok(FeedbackKey::new(incident, racf)),
      _ => Err(ApiError::BadRequest(PAIR_REQUIRED.to_string())),
    }
  }
}

fn field_text(value: Option<&Value>) -> Option<String> {
  match value? {
    Value::String(s) if !s.is_empty() => Some(s.clone()),
    Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
    _ => None,
  }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
  field.as_deref().filter(|s| !s.is_empty())
}

/// Response body for a successful call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
  pub success:       bool,
  pub likes:         u64,
  pub dislikes:      u64,
  pub user_feedback: Option<FeedbackType>,
  pub can_cancel:    bool,
}

impl From<FeedbackSummary> for FeedbackResponse {
  fn from(summary: FeedbackSummary) -> Self {
    Self {
      success:       true,
      likes:         summary.likes,
      dislikes:      summary.dislikes,
      user_feedback: summary.user_feedback,
      can_cancel:    summary.can_cancel(),
    }
  }
}

fn store_error<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(e))
}

// ─── Status ───────────────────────────────────────────────────────────────────

/// `POST /feedback/status`
pub async fn status<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<FeedbackResponse>, ApiError>
where
  S: FeedbackStore,
{
  let req = FeedbackRequest::parse(&body);
  let incident = req
    .incident_number()
    .ok_or_else(|| ApiError::BadRequest(INCIDENT_REQUIRED.to_string()))?;

  tracing::debug!(incident, racf = req.racf(), "feedback status");
  let summary = store
    .status(incident.to_owned(), req.racf().map(str::to_owned))
    .await
    .map_err(store_error)?;
  Ok(Json(summary.into()))
}

// ─── Like / dislike ───────────────────────────────────────────────────────────

/// `POST /feedback/like`
pub async fn like<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<FeedbackResponse>, ApiError>
where
  S: FeedbackStore,
{
  vote(store.as_ref(), &body, FeedbackType::Like).await
}

/// `POST /feedback/dislike`
pub async fn dislike<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<FeedbackResponse>, ApiError>
where
  S: FeedbackStore,
{
  vote(store.as_ref(), &body, FeedbackType::Dislike).await
}

async fn vote<S>(
  store:         &S,
  body:          &[u8],
  feedback_type: FeedbackType,
) -> Result<Json<FeedbackResponse>, ApiError>
where
  S: FeedbackStore,
{
  let key = FeedbackRequest::parse(body).key()?;

  tracing::info!(
    incident = %key.incident_number,
    racf = %key.racf,
    %feedback_type,
    "feedback vote"
  );
  let summary = store.vote(key, feedback_type).await.map_err(store_error)?;
  Ok(Json(summary.into()))
}

// ─── Cancel ───────────────────────────────────────────────────────────────────

/// `POST /feedback/cancel`
pub async fn cancel<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<FeedbackResponse>, ApiError>
where
  S: FeedbackStore,
{
  let key = FeedbackRequest::parse(&body).key()?;

  tracing::info!(incident = %key.incident_number, racf = %key.racf, "feedback cancel");
  let summary = store.cancel(key).await.map_err(store_error)?;

  Ok(Json(FeedbackResponse {
    user_feedback: None,
    can_cancel: false,
    ..FeedbackResponse::from(summary)
  }))
}
