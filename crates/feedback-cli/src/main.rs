//! `feedback` — command-line client for the incident feedback API.
//!
//! # Usage
//!
//! ```
//! feedback status  --incident INC001 --racf abc123
//! feedback like    --incident INC001 --racf abc123
//! feedback --url http://feedback.internal:8080 cancel --incident INC001 --racf abc123
//! ```

mod client;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig, Endpoint};
use feedback_api::{FeedbackRequest, FeedbackResponse};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "feedback", about = "Like, dislike and inspect incident feedback")]
struct Args {
  /// Base URL of the feedback server.
  #[arg(long, env = "FEEDBACK_URL", default_value = "http://localhost:8080")]
  url: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show counts for an incident (and your feedback, with --racf).
  Status(Target),
  /// Like an incident.
  Like(Target),
  /// Dislike an incident.
  Dislike(Target),
  /// Withdraw your feedback on an incident.
  Cancel(Target),
}

#[derive(clap::Args, Debug)]
struct Target {
  /// Incident number the feedback is attached to.
  #[arg(long)]
  incident: String,

  /// Your user id. Required by every command except `status`.
  #[arg(long, env = "FEEDBACK_RACF")]
  racf: Option<String>,
}

impl Command {
  fn split(self) -> (Endpoint, Target) {
    match self {
      Self::Status(t) => (Endpoint::Status, t),
      Self::Like(t) => (Endpoint::Like, t),
      Self::Dislike(t) => (Endpoint::Dislike, t),
      Self::Cancel(t) => (Endpoint::Cancel, t),
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let client = ApiClient::new(ApiConfig { base_url: args.url })?;

  let (endpoint, target) = args.command.split();
  let body = FeedbackRequest {
    racf:                   target.racf,
    similarincident_number: Some(target.incident.clone()),
  };

  let resp = client.send(endpoint, &body).await?;
  println!("{}", render(&target.incident, &resp));
  Ok(())
}

fn render(incident: &str, resp: &FeedbackResponse) -> String {
  let mine = match resp.user_feedback {
    Some(t) => format!("you: {t}"),
    None => "you: -".to_string(),
  };
  format!("{incident}: {} like(s), {} dislike(s); {mine}", resp.likes, resp.dislikes)
}

#[cfg(test)]
mod tests {
  use super::*;
  use feedback_core::feedback::FeedbackType;

  #[test]
  fn parses_subcommands() {
    let args = Args::try_parse_from([
      "feedback", "--url", "http://x", "dislike", "--incident", "INC9", "--racf", "u1",
    ])
    .unwrap();
    assert_eq!(args.url, "http://x");
    let (endpoint, target) = args.command.split();
    assert_eq!(endpoint, Endpoint::Dislike);
    assert_eq!(target.incident, "INC9");
    assert_eq!(target.racf.as_deref(), Some("u1"));
  }

  #[test]
  fn incident_is_required() {
    assert!(Args::try_parse_from(["feedback", "like", "--racf", "u1"]).is_err());
  }

  #[test]
  fn renders_summary() {
    let resp = FeedbackResponse {
      success:       true,
      likes:         3,
      dislikes:      1,
      user_feedback: Some(FeedbackType::Like),
      can_cancel:    true,
    };
    assert_eq!(render("INC001", &resp), "INC001: 3 like(s), 1 dislike(s); you: like");
  }
}
