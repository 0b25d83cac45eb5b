//! Decoding helpers between the plain-text columns stored in SQLite and the
//! domain types in `feedback-core`.
//!
//! `feedback_type` is written lowercase but read case-insensitively, so rows
//! written by other clients as `"LIKE"` still decode.

use feedback_core::feedback::{FeedbackSummary, FeedbackType, StoredFeedback};

use crate::{Error, Result};

// ─── FeedbackType ─────────────────────────────────────────────────────────────

pub fn encode_feedback_type(t: FeedbackType) -> &'static str { t.as_str() }

pub fn decode_feedback_type(s: &str) -> Result<FeedbackType> { Ok(s.parse()?) }

pub fn decode_count(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::CountOutOfRange(n))
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// The latest row for a pair, as read from the database.
pub struct RawStoredFeedback {
  pub id:            i64,
  pub feedback_type: String,
}

impl RawStoredFeedback {
  pub fn into_stored(self) -> Result<StoredFeedback> {
    Ok(StoredFeedback {
      id:            self.id,
      feedback_type: decode_feedback_type(&self.feedback_type)?,
    })
  }
}

/// Grouped counts and the user's latest feedback type, undecoded.
pub struct RawSummary {
  /// `(lower(feedback_type), COUNT(*))` per group.
  pub counts:        Vec<(String, i64)>,
  pub user_feedback: Option<String>,
}

impl RawSummary {
  pub fn into_summary(self) -> Result<FeedbackSummary> {
    let mut summary = FeedbackSummary::default();

    for (raw_type, n) in self.counts {
      let n = decode_count(n)?;
      match decode_feedback_type(&raw_type)? {
        FeedbackType::Like => summary.likes += n,
        FeedbackType::Dislike => summary.dislikes += n,
      }
    }

    summary.user_feedback = self
      .user_feedback
      .as_deref()
      .map(decode_feedback_type)
      .transpose()?;

    Ok(summary)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn groups_that_normalize_to_the_same_type_are_summed() {
    let raw = RawSummary {
      counts:        vec![("like".into(), 2), (" like".into(), 1), ("dislike".into(), 4)],
      user_feedback: Some("DISLIKE".into()),
    };
    let summary = raw.into_summary().unwrap();
    assert_eq!(summary.likes, 3);
    assert_eq!(summary.dislikes, 4);
    assert_eq!(summary.user_feedback, Some(FeedbackType::Dislike));
  }

  #[test]
  fn unknown_group_is_an_integrity_error() {
    let raw = RawSummary { counts: vec![("meh".into(), 1)], user_feedback: None };
    assert!(matches!(
      raw.into_summary(),
      Err(Error::Core(feedback_core::Error::UnknownFeedbackType(_)))
    ));
  }

  #[test]
  fn negative_count_is_rejected() {
    assert!(matches!(decode_count(-1), Err(Error::CountOutOfRange(-1))));
  }
}
