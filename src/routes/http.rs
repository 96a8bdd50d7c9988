//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::Submission;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::logic::{score_content, submit_challenge, validate_submission};
use crate::protocol::*;
use crate::rules::ChallengeRules;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(submission_id = %body.submission_id, challenge_id = %body.challenge_id, kind = body.submission_type.as_str()))]
pub async fn http_validate_submission(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<ValidateIn>,
) -> Result<Json<ValidateOut>, AppError> {
    let result = validate_submission(
        &state,
        body.submission_id,
        &body.challenge_id,
        body.submission_type,
        &body.content,
    )
    .await?;
    info!(target: "qa_arena", id = %body.submission_id, score = result.score, "HTTP validate-submission done");
    Ok(Json(result.into()))
}

#[instrument(level = "info", skip(state, body), fields(challenge_id = %body.challenge_id, kind = body.submission_type.as_str()))]
pub async fn http_post_submission(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<SubmitIn>,
) -> Result<Json<SubmitOut>, AppError> {
    let (submission, result) =
        submit_challenge(&state, body.challenge_id, body.submission_type, body.content).await?;
    info!(target: "qa_arena", id = %submission.id, score = result.score, "HTTP submission stored and validated");
    Ok(Json(SubmitOut { submission, validation: result.into() }))
}

#[instrument(level = "info", skip(state, body), fields(challenge_id = %body.challenge_id, kind = body.submission_type.as_str()))]
pub async fn http_post_score(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<SubmitIn>,
) -> Result<Json<crate::domain::ScoreResult>, AppError> {
    let result = score_content(&state, &body.challenge_id, body.submission_type, &body.content)?;
    Ok(Json(result))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Submission>, AppError> {
    state
        .get_submission(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unknown submissionId: {}", id)))
}

#[instrument(level = "info", skip(state), fields(challenge_id = %q.challenge_id))]
pub async fn http_list_submissions(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SubmissionsQuery>,
) -> Json<Vec<Submission>> {
    let list = state.submissions_for_challenge(&q.challenge_id).await;
    info!(target: "qa_arena", challenge_id = %q.challenge_id, count = list.len(), "HTTP submissions listed");
    Json(list)
}

#[instrument(level = "info", skip(state), fields(%challenge_id))]
pub async fn http_get_rules(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
) -> Json<ChallengeRules> {
    Json(state.rules_for(&challenge_id))
}
