//! Domain models: submitted test cases / automation code, scoring results, and stored submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Outcome the tester recorded for a manual test case.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestCaseStatus {
  Pass,
  Fail,
  #[default]
  Pending,
}

/// Missing or `null` both decode to the default value.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// One row of a manual test-case table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualTestCase {
  #[serde(default, deserialize_with = "null_as_default")] pub id: String,
  #[serde(default, deserialize_with = "null_as_default")] pub title: String,
  #[serde(default, deserialize_with = "null_as_default")] pub steps: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")] pub expected_result: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub actual_result: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")] pub status: TestCaseStatus,
}

/// A snippet of automation code (Selenium, Playwright, Cypress, ...).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AutomationSubmission {
  #[serde(default)] pub language: String,
  pub code: String,
  #[serde(default)] pub framework: String,
}

/// Declared kind of a submission; decides how `content` is decoded.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
  Manual,
  Automation,
}

impl SubmissionType {
  pub fn as_str(&self) -> &'static str {
    match self {
      SubmissionType::Manual => "manual",
      SubmissionType::Automation => "automation",
    }
  }
}

/// Decoded submission content.
#[derive(Clone, Debug)]
pub enum SubmissionContent {
  Manual(Vec<ManualTestCase>),
  Automation(AutomationSubmission),
}

/// Verdict of a scoring run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
  Passed,
  Reviewing,
  Failed,
}

/// Lifecycle status of a stored submission.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
  Pending,
  Passed,
  Reviewing,
  Failed,
}

impl From<ScoreStatus> for SubmissionStatus {
  fn from(s: ScoreStatus) -> Self {
    match s {
      ScoreStatus::Passed => SubmissionStatus::Passed,
      ScoreStatus::Reviewing => SubmissionStatus::Reviewing,
      ScoreStatus::Failed => SubmissionStatus::Failed,
    }
  }
}

/// Per-test-case breakdown inside manual feedback.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
  pub test_case_id: String,
  pub title: String,
  pub points: u32,
  pub feedback: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManualFeedback {
  pub test_case_results: Vec<TestCaseResult>,
  pub suggestions: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutomationFeedback {
  pub code_quality: Vec<String>,
  pub suggestions: Vec<String>,
  pub errors: Vec<String>,
}

/// Categorised feedback. Serialized without a tag so the wire shape is the bare object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Feedback {
  Manual(ManualFeedback),
  Automation(AutomationFeedback),
}

/// Output of either scorer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreResult {
  pub score: u32, // always within 0..=100
  pub status: ScoreStatus,
  pub feedback: Feedback,
}

/// A stored submission. `content` is kept exactly as the client sent it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
  pub id: Uuid,
  pub challenge_id: String,
  pub submission_type: SubmissionType,
  pub content: serde_json::Value,
  pub status: SubmissionStatus,
  pub score: Option<u32>,
  pub feedback: Option<Feedback>,
  pub submitted_at: DateTime<Utc>,
  pub reviewed_at: Option<DateTime<Utc>>,
}

impl Submission {
  /// Fresh pending submission with a random id.
  pub fn new_pending(challenge_id: String, submission_type: SubmissionType, content: serde_json::Value) -> Self {
    Self {
      id: Uuid::new_v4(),
      challenge_id,
      submission_type,
      content,
      status: SubmissionStatus::Pending,
      score: None,
      feedback: None,
      submitted_at: Utc::now(),
      reviewed_at: None,
    }
  }
}
