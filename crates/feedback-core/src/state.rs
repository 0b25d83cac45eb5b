//! The per-pair feedback state machine.
//!
//! States are `None`, `Liked` and `Disliked`. Voting for the current state
//! is a no-op, voting for the other state flips the stored row in place and
//! cancelling always returns to `None`. There is no terminal state.

use crate::feedback::{FeedbackType, StoredFeedback};

/// The current opinion of one user about one incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackState {
  #[default]
  None,
  Liked,
  Disliked,
}

/// A user action against a [`FeedbackState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Vote(FeedbackType),
  Cancel,
}

impl FeedbackState {
  pub fn apply(self, action: Action) -> Self {
    match action {
      Action::Vote(t) => t.into(),
      Action::Cancel => Self::None,
    }
  }

  pub fn feedback_type(self) -> Option<FeedbackType> {
    match self {
      Self::None => None,
      Self::Liked => Some(FeedbackType::Like),
      Self::Disliked => Some(FeedbackType::Dislike),
    }
  }
}

impl From<FeedbackType> for FeedbackState {
  fn from(t: FeedbackType) -> Self {
    match t {
      FeedbackType::Like => Self::Liked,
      FeedbackType::Dislike => Self::Disliked,
    }
  }
}

impl From<Option<FeedbackType>> for FeedbackState {
  fn from(t: Option<FeedbackType>) -> Self { t.map(Self::from).unwrap_or_default() }
}

// ─── Write planning ──────────────────────────────────────────────────────────

/// The single write a vote requires, given the latest stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
  /// No row exists for the pair.
  Insert(FeedbackType),
  /// The latest row holds the other opinion; rewrite it in place.
  Update { id: i64, to: FeedbackType },
  /// The latest row already holds the requested opinion.
  Noop,
}

impl Mutation {
  /// Run `vote` through the state machine from the state held by `latest`
  /// and translate the resulting transition into a row write.
  pub fn plan(latest: Option<StoredFeedback>, vote: FeedbackType) -> Self {
    let current = FeedbackState::from(latest.map(|row| row.feedback_type));
    let next = current.apply(Action::Vote(vote));
    if next == current {
      return Self::Noop;
    }

    match (latest, next.feedback_type()) {
      (None, Some(to)) => Self::Insert(to),
      (Some(row), Some(to)) => Self::Update { id: row.id, to },
      // A vote never lands in `None`.
      (_, None) => Self::Noop,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use FeedbackType::{Dislike, Like};

  #[test]
  fn transitions_from_none() {
    assert_eq!(FeedbackState::None.apply(Action::Vote(Like)), FeedbackState::Liked);
    assert_eq!(FeedbackState::None.apply(Action::Vote(Dislike)), FeedbackState::Disliked);
    assert_eq!(FeedbackState::None.apply(Action::Cancel), FeedbackState::None);
  }

  #[test]
  fn repeat_vote_keeps_state() {
    assert_eq!(FeedbackState::Liked.apply(Action::Vote(Like)), FeedbackState::Liked);
    assert_eq!(FeedbackState::Disliked.apply(Action::Vote(Dislike)), FeedbackState::Disliked);
  }

  #[test]
  fn opposite_vote_flips_and_cancel_resets() {
    assert_eq!(FeedbackState::Liked.apply(Action::Vote(Dislike)), FeedbackState::Disliked);
    assert_eq!(FeedbackState::Disliked.apply(Action::Vote(Like)), FeedbackState::Liked);
    assert_eq!(FeedbackState::Liked.apply(Action::Cancel), FeedbackState::None);
    assert_eq!(FeedbackState::Disliked.apply(Action::Cancel), FeedbackState::None);
  }

  #[test]
  fn state_round_trips_through_option() {
    for state in [FeedbackState::None, FeedbackState::Liked, FeedbackState::Disliked] {
      assert_eq!(FeedbackState::from(state.feedback_type()), state);
    }
  }

  #[test]
  fn plan_inserts_when_no_row() {
    assert_eq!(Mutation::plan(None, Like), Mutation::Insert(Like));
  }

  #[test]
  fn plan_is_noop_for_same_opinion() {
    let row = StoredFeedback { id: 7, feedback_type: Dislike };
    assert_eq!(Mutation::plan(Some(row), Dislike), Mutation::Noop);
  }

  #[test]
  fn plan_updates_latest_row_in_place() {
    let row = StoredFeedback { id: 7, feedback_type: Dislike };
    assert_eq!(Mutation::plan(Some(row), Like), Mutation::Update { id: 7, to: Like });
  }

  #[test]
  fn plan_writes_exactly_when_state_changes() {
    let rows = [
      None,
      Some(StoredFeedback { id: 3, feedback_type: Like }),
      Some(StoredFeedback { id: 4, feedback_type: Dislike }),
    ];
    for latest in rows {
      for vote in [Like, Dislike] {
        let current = FeedbackState::from(latest.map(|row| row.feedback_type));
        let next = current.apply(Action::Vote(vote));
        let expected = match (latest, next == current) {
          (_, true) => Mutation::Noop,
          (None, false) => Mutation::Insert(vote),
          (Some(row), false) => Mutation::Update { id: row.id, to: vote },
        };
        assert_eq!(Mutation::plan(latest, vote), expected, "{latest:?} + {vote:?}");
      }
    }
  }
}
