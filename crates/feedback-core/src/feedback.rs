//! Feedback values and the read model returned to callers.
//!
//! A user holds at most one current opinion about an incident. The opinion
//! is stored as a lowercase string; anything else found in storage is a
//! data-integrity error, not a third kind of feedback.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Feedback type ───────────────────────────────────────────────────────────

/// The opinion a user expresses about an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
  Like,
  Dislike,
}

impl FeedbackType {
  /// The normalized storage and wire representation.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Like => "like",
      Self::Dislike => "dislike",
    }
  }

  pub fn opposite(self) -> Self {
    match self {
      Self::Like => Self::Dislike,
      Self::Dislike => Self::Like,
    }
  }
}

impl fmt::Display for FeedbackType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Case-insensitive; rows written by older clients may be `"LIKE"` or
/// `"Dislike"`.
impl FromStr for FeedbackType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim();
    if normalized.eq_ignore_ascii_case("like") {
      Ok(Self::Like)
    } else if normalized.eq_ignore_ascii_case("dislike") {
      Ok(Self::Dislike)
    } else {
      Err(Error::UnknownFeedbackType(s.to_owned()))
    }
  }
}

// ─── Keys and rows ───────────────────────────────────────────────────────────

/// Identifies one user's feedback on one incident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackKey {
  pub incident_number: String,
  pub racf:            String,
}

impl FeedbackKey {
  pub fn new(incident_number: impl Into<String>, racf: impl Into<String>) -> Self {
    Self { incident_number: incident_number.into(), racf: racf.into() }
  }
}

/// The latest stored row for a [`FeedbackKey`] (highest `id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredFeedback {
  pub id:            i64,
  pub feedback_type: FeedbackType,
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// Aggregate counts for an incident plus the requesting user's opinion.
///
/// `likes` and `dislikes` count every row of the incident, not only the
/// latest row per user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSummary {
  pub likes:         u64,
  pub dislikes:      u64,
  pub user_feedback: Option<FeedbackType>,
}

impl FeedbackSummary {
  /// True iff the user currently has feedback that can be withdrawn.
  pub fn can_cancel(&self) -> bool { self.user_feedback.is_some() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_case_insensitively() {
    assert_eq!("like".parse::<FeedbackType>().unwrap(), FeedbackType::Like);
    assert_eq!("LIKE".parse::<FeedbackType>().unwrap(), FeedbackType::Like);
    assert_eq!("Dislike".parse::<FeedbackType>().unwrap(), FeedbackType::Dislike);
    assert_eq!(" dislike ".parse::<FeedbackType>().unwrap(), FeedbackType::Dislike);
  }

  #[test]
  fn rejects_unknown_values() {
    let err = "meh".parse::<FeedbackType>().unwrap_err();
    assert!(matches!(err, Error::UnknownFeedbackType(ref s) if s == "meh"));
    assert!("".parse::<FeedbackType>().is_err());
  }

  #[test]
  fn serializes_lowercase() {
    assert_eq!(serde_json::to_string(&FeedbackType::Dislike).unwrap(), "\"dislike\"");
    let summary = FeedbackSummary { likes: 1, dislikes: 0, user_feedback: None };
    let json = serde_json::to_value(summary).unwrap();
    assert!(json["user_feedback"].is_null());
  }

  #[test]
  fn opposite_flips() {
    assert_eq!(FeedbackType::Like.opposite(), FeedbackType::Dislike);
    assert_eq!(FeedbackType::Dislike.opposite(), FeedbackType::Like);
  }

  #[test]
  fn can_cancel_tracks_user_feedback() {
    let mut summary = FeedbackSummary::default();
    assert!(!summary.can_cancel());
    summary.user_feedback = Some(FeedbackType::Like);
    assert!(summary.can_cancel());
  }
}
