//! [`SqliteStore`] — the SQLite implementation of [`FeedbackStore`].

use std::{
  sync::atomic::{AtomicU64, Ordering},
  time::Duration,
};

use rusqlite::{OptionalExtension as _, TransactionBehavior};

use feedback_core::{
  feedback::{FeedbackKey, FeedbackSummary, FeedbackType},
  state::{Action, FeedbackState, Mutation},
  store::FeedbackStore,
};

use crate::{
  DatabaseConfig, Error, Result,
  encode::{RawStoredFeedback, RawSummary, encode_feedback_type},
  schema::SCHEMA,
};

static MEMORY_DB_SEQ: AtomicU64 = AtomicU64::new(0);

// ─── Store ───────────────────────────────────────────────────────────────────

/// A feedback store backed by SQLite.
///
/// The store holds only the connection target and options. Every operation
/// opens a fresh connection, runs to completion, and closes it; a failed
/// operation drops its connection instead.
///
/// Cloning is cheap.
#[derive(Clone)]
pub struct SqliteStore {
  target:       String,
  busy_timeout: Duration,
  /// Keeps a shared-cache in-memory database alive between operations.
  _anchor:      Option<tokio_rusqlite::Connection>,
}

impl SqliteStore {
  /// Open (or create) the database named by `config.url` and run schema
  /// initialisation.
  pub async fn open(config: &DatabaseConfig) -> Result<Self> {
    let store = Self {
      target:       config.url.clone(),
      busy_timeout: config.busy_timeout(),
      _anchor:      None,
    };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a private in-memory store — useful for testing.
  ///
  /// Each call gets its own database, shared by every connection the store
  /// opens.
  pub async fn open_in_memory() -> Result<Self> {
    let seq = MEMORY_DB_SEQ.fetch_add(1, Ordering::Relaxed);
    let target = format!(
      "file:feedback-mem-{}-{seq}?mode=memory&cache=shared",
      std::process::id()
    );
    let anchor = tokio_rusqlite::Connection::open(&target).await?;
    let store = Self {
      target,
      busy_timeout: DatabaseConfig::default().busy_timeout(),
      _anchor: Some(anchor),
    };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .with_connection(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  /// Open a connection to the store's database with its options applied.
  pub(crate) async fn connect(&self) -> Result<tokio_rusqlite::Connection> {
    let conn = tokio_rusqlite::Connection::open(&self.target).await?;
    let timeout = self.busy_timeout;
    conn
      .call(move |conn| {
        conn.busy_timeout(timeout)?;
        Ok(())
      })
      .await?;
    Ok(conn)
  }

  /// Run `f` on a dedicated connection, closing it once `f` succeeds.
  async fn with_connection<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    let conn = self.connect().await?;
    let value = conn.call(f).await.map_err(lift_error)?;
    conn.close().await?;
    Ok(value)
  }
}

/// Recover a crate error that was boxed to cross the connection thread.
fn lift_error(e: tokio_rusqlite::Error) -> Error {
  match e {
    tokio_rusqlite::Error::Other(inner) => match inner.downcast::<Error>() {
      Ok(err) => *err,
      Err(inner) => Error::Database(tokio_rusqlite::Error::Other(inner)),
    },
    other => Error::Database(other),
  }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

fn latest_row(
  conn:            &rusqlite::Connection,
  incident_number: &str,
  racf:            &str,
) -> rusqlite::Result<Option<RawStoredFeedback>> {
  conn
    .query_row(
      "SELECT id, feedback_type
       FROM feedback
       WHERE incident_number = ?1 AND racf = ?2
       ORDER BY id DESC
       LIMIT 1",
      rusqlite::params![incident_number, racf],
      |row| {
        Ok(RawStoredFeedback {
          id:            row.get(0)?,
          feedback_type: row.get(1)?,
        })
      },
    )
    .optional()
}

fn read_summary(
  conn:            &rusqlite::Connection,
  incident_number: &str,
  racf:            Option<&str>,
) -> rusqlite::Result<RawSummary> {
  let mut stmt = conn.prepare(
    "SELECT lower(feedback_type), COUNT(*)
     FROM feedback
     WHERE incident_number = ?1
     GROUP BY lower(feedback_type)",
  )?;
  let counts = stmt
    .query_map(rusqlite::params![incident_number], |row| {
      Ok((row.get(0)?, row.get(1)?))
    })?
    .collect::<rusqlite::Result<Vec<(String, i64)>>>()?;

  let user_feedback = match racf {
    Some(racf) => latest_row(conn, incident_number, racf)?.map(|r| r.feedback_type),
    None => None,
  };

  Ok(RawSummary { counts, user_feedback })
}

// ─── FeedbackStore impl ──────────────────────────────────────────────────────

impl FeedbackStore for SqliteStore {
  type Error = Error;

  async fn status(
    &self,
    incident_number: String,
    racf:            Option<String>,
  ) -> Result<FeedbackSummary> {
    let raw = self
      .with_connection(move |conn| {
        Ok(read_summary(conn, &incident_number, racf.as_deref())?)
      })
      .await?;

    raw.into_summary()
  }

  async fn vote(
    &self,
    key:           FeedbackKey,
    feedback_type: FeedbackType,
  ) -> Result<FeedbackSummary> {
    let FeedbackKey { incident_number, racf } = key.clone();

    // The write lock is taken before the read, so concurrent votes for the
    // same pair serialize.
    let (before, mutation, raw) = self
      .with_connection(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let latest = latest_row(&tx, &incident_number, &racf)?
          .map(RawStoredFeedback::into_stored)
          .transpose()
          .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;

        let mutation = Mutation::plan(latest, feedback_type);
        match mutation {
          Mutation::Insert(t) => {
            tx.execute(
              "INSERT INTO feedback (incident_number, racf, feedback_type)
               VALUES (?1, ?2, ?3)",
              rusqlite::params![incident_number, racf, encode_feedback_type(t)],
            )?;
          }
          Mutation::Update { id, to } => {
            tx.execute(
              "UPDATE feedback SET feedback_type = ?1 WHERE id = ?2",
              rusqlite::params![encode_feedback_type(to), id],
            )?;
          }
          Mutation::Noop => {}
        }
        tx.commit()?;

        let raw = read_summary(conn, &incident_number, Some(&racf))?;
        let before = FeedbackState::from(latest.map(|l| l.feedback_type));
        Ok((before, mutation, raw))
      })
      .await?;

    tracing::debug!(
      incident = %key.incident_number,
      racf = %key.racf,
      from = ?before,
      to = ?before.apply(Action::Vote(feedback_type)),
      ?mutation,
      "recorded vote"
    );

    raw.into_summary()
  }

  async fn cancel(&self, key: FeedbackKey) -> Result<FeedbackSummary> {
    let FeedbackKey { incident_number, racf } = key.clone();

    let (deleted, raw) = self
      .with_connection(move |conn| {
        let tx = conn.transaction()?;
        let deleted = tx.execute(
          "DELETE FROM feedback WHERE incident_number = ?1 AND racf = ?2",
          rusqlite::params![incident_number, racf],
        )?;
        tx.commit()?;

        let raw = read_summary(conn, &incident_number, Some(&racf))?;
        Ok((deleted, raw))
      })
      .await?;

    tracing::debug!(
      incident = %key.incident_number,
      racf = %key.racf,
      deleted,
      "cancelled feedback"
    );

    raw.into_summary()
  }
}
