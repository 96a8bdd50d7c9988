//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Decoding raw `content` according to the declared submission type
//!   - Scoring with the effective challenge rules
//!   - Writing the review back onto the stored submission
//!   - The submit flow (store pending, then validate)

use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
  AutomationSubmission, ManualTestCase, ScoreResult, Submission, SubmissionContent, SubmissionType,
};
use crate::error::AppError;
use crate::scoring::score_submission;
use crate::state::AppState;

/// Decode client content for the declared type.
pub fn decode_content(kind: SubmissionType, content: &serde_json::Value) -> Result<SubmissionContent, AppError> {
  Ok(match kind {
    SubmissionType::Manual => {
      SubmissionContent::Manual(serde_json::from_value::<Vec<ManualTestCase>>(content.clone())?)
    }
    SubmissionType::Automation => {
      SubmissionContent::Automation(serde_json::from_value::<AutomationSubmission>(content.clone())?)
    }
  })
}

/// Score without touching the store.
#[instrument(level = "info", skip(state, content), fields(%challenge_id, kind = kind.as_str()))]
pub fn score_content(
  state: &AppState,
  challenge_id: &str,
  kind: SubmissionType,
  content: &serde_json::Value,
) -> Result<ScoreResult, AppError> {
  let decoded = decode_content(kind, content)?;
  let rules = state.rules_for(challenge_id);
  Ok(score_submission(&rules, &decoded))
}

/// Score a stored submission and persist the review.
#[instrument(level = "info", skip(state, content), fields(%submission_id, %challenge_id, kind = kind.as_str()))]
pub async fn validate_submission(
  state: &AppState,
  submission_id: Uuid,
  challenge_id: &str,
  kind: SubmissionType,
  content: &serde_json::Value,
) -> Result<ScoreResult, AppError> {
  let result = score_content(state, challenge_id, kind, content)?;
  state
    .record_review(submission_id, &result)
    .await
    .ok_or_else(|| AppError::NotFound(format!("Unknown submissionId: {}", submission_id)))?;
  info!(target: "scoring", %submission_id, score = result.score, status = ?result.status, "Submission validated");
  Ok(result)
}

/// Store a new pending submission, then validate it.
/// Content is checked before anything is stored, so a bad payload leaves no record behind.
#[instrument(level = "info", skip(state, content), fields(%challenge_id, kind = kind.as_str()))]
pub async fn submit_challenge(
  state: &AppState,
  challenge_id: String,
  kind: SubmissionType,
  content: serde_json::Value,
) -> Result<(Submission, ScoreResult), AppError> {
  decode_content(kind, &content)?;
  let pending = Submission::new_pending(challenge_id.clone(), kind, content);
  let id = pending.id;
  state.insert_submission(pending.clone()).await;

  let result = validate_submission(state, id, &challenge_id, kind, &pending.content).await?;
  let stored = state
    .get_submission(id)
    .await
    .ok_or_else(|| AppError::Internal(format!("submission {} vanished after review", id)))?;
  Ok((stored, result))
}
