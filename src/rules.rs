//! Per-challenge expectations: minimum test-case count and the test types a
//! good submission should cover.
//!
//! The built-in mapping keys off substrings of the challenge id. A `RuleBook`
//! layers exact-id overrides from config on top of it.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::ChallengeCfg;

/// Effective rules for one challenge.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRules {
    pub challenge_id: String,
    pub min_test_cases: usize,
    pub required_test_types: Vec<String>,
}

impl ChallengeRules {
    /// Built-in rules, no overrides.
    pub fn builtin(challenge_id: &str) -> Self {
        Self {
            challenge_id: challenge_id.to_string(),
            min_test_cases: min_test_cases_for_challenge(challenge_id),
            required_test_types: required_test_types_for_challenge(challenge_id),
        }
    }
}

/// Minimum number of manual test cases expected for a challenge.
pub fn min_test_cases_for_challenge(challenge_id: &str) -> usize {
    if challenge_id.contains("login") || challenge_id.contains("auth") {
        return 5;
    }
    if challenge_id.contains("sql") || challenge_id.contains("security") {
        return 6;
    }
    4
}

/// Test categories a thorough submission should cover. Informational only.
pub fn required_test_types_for_challenge(challenge_id: &str) -> Vec<String> {
    let types: &[&str] = if challenge_id.contains("login") {
        &["positive", "negative", "boundary", "security"]
    } else if challenge_id.contains("sql") {
        &["injection", "validation", "security"]
    } else {
        &["positive", "negative"]
    };
    types.iter().map(|s| s.to_string()).collect()
}

/// Built-in rules plus exact-id overrides.
#[derive(Clone, Debug, Default)]
pub struct RuleBook {
    overrides: HashMap<String, ChallengeCfg>,
}

impl RuleBook {
    pub fn new(challenges: &[ChallengeCfg]) -> Self {
        let overrides = challenges
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();
        Self { overrides }
    }

    pub fn rules_for(&self, challenge_id: &str) -> ChallengeRules {
        let mut rules = ChallengeRules::builtin(challenge_id);
        if let Some(o) = self.overrides.get(challenge_id) {
            if let Some(min) = o.min_test_cases {
                rules.min_test_cases = min;
            }
            if let Some(types) = &o.required_test_types {
                rules.required_test_types = types.clone();
            }
        }
        rules
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}
