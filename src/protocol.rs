//! Public HTTP request/response structs (serde ready, camelCase on the wire).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Feedback, ScoreResult, ScoreStatus, Submission, SubmissionType};

/// Body of `POST /api/v1/validate-submission`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateIn {
    pub submission_id: Uuid,
    pub challenge_id: String,
    pub submission_type: SubmissionType,
    /// Array of test cases or one automation object, depending on `submission_type`.
    pub content: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ValidateOut {
    pub success: bool,
    pub score: u32,
    pub status: ScoreStatus,
    pub feedback: Feedback,
}

impl From<ScoreResult> for ValidateOut {
    fn from(r: ScoreResult) -> Self {
        Self { success: true, score: r.score, status: r.status, feedback: r.feedback }
    }
}

/// Body of `POST /api/v1/submissions` and `POST /api/v1/score`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitIn {
    pub challenge_id: String,
    pub submission_type: SubmissionType,
    pub content: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct SubmitOut {
    pub submission: Submission,
    pub validation: ValidateOut,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionsQuery {
    #[serde(rename = "challengeId")]
    pub challenge_id: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
