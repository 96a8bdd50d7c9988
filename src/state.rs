//! Application state: the in-memory submission store and the challenge rule book.
//!
//! Submissions are keyed by id. Reviews overwrite status, score, feedback and
//! `reviewed_at` on the stored record, nothing else.

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::domain::{ScoreResult, Submission};
use crate::rules::{ChallengeRules, RuleBook};

#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<RwLock<HashMap<Uuid, Submission>>>,
    pub rules: RuleBook,
}

impl AppState {
    /// Build state from the loaded config.
    #[instrument(level = "info", skip_all)]
    pub fn new(cfg: &AppConfig) -> Self {
        let rules = RuleBook::new(&cfg.challenges);
        info!(target: "qa_arena", overrides = rules.override_count(), "Challenge rule book ready");
        Self {
            submissions: Arc::new(RwLock::new(HashMap::new())),
            rules,
        }
    }

    /// Effective rules for a challenge (config override or built-in).
    pub fn rules_for(&self, challenge_id: &str) -> ChallengeRules {
        self.rules.rules_for(challenge_id)
    }

    #[instrument(level = "debug", skip(self, s), fields(id = %s.id, challenge_id = %s.challenge_id))]
    pub async fn insert_submission(&self, s: Submission) {
        self.submissions.write().await.insert(s.id, s);
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_submission(&self, id: Uuid) -> Option<Submission> {
        self.submissions.read().await.get(&id).cloned()
    }

    /// Write a scoring result onto a stored submission. Returns the updated record,
    /// or None when the id is unknown.
    #[instrument(level = "debug", skip(self, result), fields(%id, score = result.score))]
    pub async fn record_review(&self, id: Uuid, result: &ScoreResult) -> Option<Submission> {
        let mut subs = self.submissions.write().await;
        let Some(s) = subs.get_mut(&id) else {
            warn!(target: "qa_arena", %id, "Review for unknown submission");
            return None;
        };
        s.status = result.status.into();
        s.score = Some(result.score);
        s.feedback = Some(result.feedback.clone());
        s.reviewed_at = Some(Utc::now());
        debug!(target: "qa_arena", %id, status = ?s.status, "Submission reviewed");
        Some(s.clone())
    }

    /// All submissions for a challenge, newest first.
    #[instrument(level = "debug", skip(self), fields(%challenge_id))]
    pub async fn submissions_for_challenge(&self, challenge_id: &str) -> Vec<Submission> {
        let mut out: Vec<Submission> = self
            .submissions
            .read()
            .await
            .values()
            .filter(|s| s.challenge_id == challenge_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        out
    }
}
