//! Heuristic scoring of submissions.
//!
//! Manual test cases earn points per case for structure (title, steps,
//! expected result) and outcome. Automation code earns points for keyword
//! signals found in its lower-cased text. Nothing is parsed or executed.
//!
//! Both scorers are pure and never fail: poor or empty input lands on a low
//! score with status `failed`.

use tracing::{debug, instrument};

use crate::domain::{
  AutomationFeedback, AutomationSubmission, Feedback, ManualFeedback, ManualTestCase, ScoreResult,
  ScoreStatus, SubmissionContent, TestCaseResult, TestCaseStatus,
};
use crate::rules::ChallengeRules;
use crate::util::{contains_any, trimmed_len};

pub const MAX_SCORE: u32 = 100;

// Manual: per-case points
const TITLE_MIN_CHARS: usize = 5;
const TITLE_POINTS: u32 = 2;
const DETAILED_STEPS_MIN: usize = 3;
const DETAILED_STEPS_POINTS: u32 = 5;
const SOME_STEPS_POINTS: u32 = 2;
const EXPECTED_MIN_CHARS: usize = 10;
const EXPECTED_POINTS: u32 = 3;
const PASS_POINTS: u32 = 5;
/// Best score a single case can reach.
pub const MAX_POINTS_PER_CASE: u32 = 15;
const COVERAGE_BONUS: u32 = 10;

// Manual: percentage thresholds
const MANUAL_PASSED_PCT: f64 = 70.0;
const MANUAL_REVIEWING_PCT: f64 = 50.0;

// Automation: signal points and status thresholds
const FRAMEWORK_POINTS: u32 = 10;
const WAIT_POINTS: u32 = 15;
const ASSERT_POINTS: u32 = 15;
const ERROR_HANDLING_POINTS: u32 = 10;
const PAGE_OBJECT_POINTS: u32 = 15;
const TEST_STRUCTURE_POINTS: u32 = 10;
const AUTOMATION_PASSED: u32 = 60;
const AUTOMATION_REVIEWING: u32 = 30;

/// Score a manual test-case table against the built-in rules for `challenge_id`.
#[allow(dead_code)]
pub fn score_manual_submission(challenge_id: &str, test_cases: &[ManualTestCase]) -> ScoreResult {
  score_manual_with_rules(&ChallengeRules::builtin(challenge_id), test_cases)
}

/// Score a manual test-case table against explicit rules.
#[instrument(level = "debug", skip(rules, test_cases), fields(challenge_id = %rules.challenge_id, cases = test_cases.len()))]
pub fn score_manual_with_rules(rules: &ChallengeRules, test_cases: &[ManualTestCase]) -> ScoreResult {
  let min_cases = rules.min_test_cases;
  let mut feedback = ManualFeedback::default();
  let mut score: u32 = 0;

  if test_cases.len() < min_cases {
    feedback
      .suggestions
      .push(format!("Consider adding more test cases. Minimum recommended: {}", min_cases));
  }

  for tc in test_cases {
    let result = score_test_case(tc);
    score += result.points;
    feedback.test_case_results.push(result);
  }

  // len >= 1.5 * min, kept in integers
  if test_cases.len().saturating_mul(2) >= min_cases.saturating_mul(3) {
    score += COVERAGE_BONUS;
    feedback
      .suggestions
      .push("Great! You provided comprehensive test coverage.".into());
  }

  let max_possible = test_cases.len() as u32 * MAX_POINTS_PER_CASE;
  let status = if max_possible == 0 {
    ScoreStatus::Failed
  } else {
    let percentage = f64::from(score) / f64::from(max_possible) * 100.0;
    if percentage >= MANUAL_PASSED_PCT {
      ScoreStatus::Passed
    } else if percentage >= MANUAL_REVIEWING_PCT {
      ScoreStatus::Reviewing
    } else {
      ScoreStatus::Failed
    }
  };

  debug!(target: "scoring", raw_score = score, ?status, "Manual submission scored");
  ScoreResult { score: score.min(MAX_SCORE), status, feedback: Feedback::Manual(feedback) }
}

fn score_test_case(tc: &ManualTestCase) -> TestCaseResult {
  let mut points = 0;
  let mut notes = vec![];

  if trimmed_len(&tc.title) < TITLE_MIN_CHARS {
    notes.push("Test case title should be more descriptive".to_string());
  } else {
    points += TITLE_POINTS;
  }

  if tc.steps.is_empty() {
    notes.push("Test case should have clear steps".to_string());
  } else if tc.steps.len() < DETAILED_STEPS_MIN {
    notes.push("Consider adding more detailed steps".to_string());
    points += SOME_STEPS_POINTS;
  } else {
    points += DETAILED_STEPS_POINTS;
  }

  if trimmed_len(&tc.expected_result) < EXPECTED_MIN_CHARS {
    notes.push("Expected result should be more detailed".to_string());
  } else {
    points += EXPECTED_POINTS;
  }

  if tc.status == TestCaseStatus::Pass {
    points += PASS_POINTS;
  }

  TestCaseResult { test_case_id: tc.id.clone(), title: tc.title.clone(), points, feedback: notes }
}

/// Score automation code by keyword signals.
/// `_challenge_id` is accepted so both scorers share a call shape.
#[instrument(level = "debug", skip(submission), fields(%_challenge_id, language = %submission.language, framework = %submission.framework, code_len = submission.code.len()))]
pub fn score_automation_submission(_challenge_id: &str, submission: &AutomationSubmission) -> ScoreResult {
  let code = submission.code.to_lowercase();
  let mut fb = AutomationFeedback::default();
  let mut score: u32 = 0;

  if contains_any(&code, &["webdriver", "selenium"]) {
    score += FRAMEWORK_POINTS;
    fb.code_quality.push("Good: Uses proper automation framework".into());
  }

  if code.contains("wait") && contains_any(&code, &["until", "expected"]) {
    score += WAIT_POINTS;
    fb.code_quality.push("Excellent: Implements proper waits".into());
  } else {
    fb.suggestions.push("Consider using explicit waits instead of sleep/delays".into());
  }

  if contains_any(&code, &["assert", "expect", "should"]) {
    score += ASSERT_POINTS;
    fb.code_quality.push("Good: Includes assertions".into());
  } else {
    fb.suggestions.push("Add assertions to verify expected outcomes".into());
  }

  if code.contains("try") && code.contains("catch") {
    score += ERROR_HANDLING_POINTS;
    fb.code_quality.push("Good: Includes error handling".into());
  }

  // Page object heuristic: a "page" together with some class/def declaration.
  if code.contains("page") && contains_any(&code, &["class", "def"]) {
    score += PAGE_OBJECT_POINTS;
    fb.code_quality.push("Excellent: Uses page object pattern".into());
  }

  if contains_any(&code, &["test", "@test", "it("]) {
    score += TEST_STRUCTURE_POINTS;
    fb.code_quality.push("Good: Proper test structure".into());
  }

  let status = if score >= AUTOMATION_PASSED {
    ScoreStatus::Passed
  } else if score >= AUTOMATION_REVIEWING {
    ScoreStatus::Reviewing
  } else {
    ScoreStatus::Failed
  };

  if score < AUTOMATION_REVIEWING {
    fb.errors
      .push("Code needs significant improvement to meet quality standards".into());
  }

  debug!(target: "scoring", raw_score = score, ?status, "Automation submission scored");
  ScoreResult { score: score.min(MAX_SCORE), status, feedback: Feedback::Automation(fb) }
}

/// Dispatch decoded content to the matching scorer.
pub fn score_submission(rules: &ChallengeRules, content: &SubmissionContent) -> ScoreResult {
  match content {
    SubmissionContent::Manual(cases) => score_manual_with_rules(rules, cases),
    SubmissionContent::Automation(sub) => score_automation_submission(&rules.challenge_id, sub),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full_case(i: usize) -> ManualTestCase {
    ManualTestCase {
      id: format!("tc{i}"),
      title: format!("Valid login case {i}"),
      steps: vec!["Open page".into(), "Enter credentials".into(), "Click submit".into()],
      expected_result: "User lands on the dashboard".into(),
      actual_result: None,
      status: TestCaseStatus::Pass,
    }
  }

  fn code(s: &str) -> AutomationSubmission {
    AutomationSubmission { language: "python".into(), code: s.into(), framework: "selenium".into() }
  }

  fn manual(fb: &Feedback) -> &ManualFeedback {
    match fb {
      Feedback::Manual(m) => m,
      other => panic!("expected manual feedback, got {other:?}"),
    }
  }

  fn automation(fb: &Feedback) -> &AutomationFeedback {
    match fb {
      Feedback::Automation(a) => a,
      other => panic!("expected automation feedback, got {other:?}"),
    }
  }

  #[test]
  fn empty_manual_submission_fails_with_zero() {
    let r = score_manual_submission("login-form", &[]);
    assert_eq!(r.score, 0);
    assert_eq!(r.status, ScoreStatus::Failed);
    let m = manual(&r.feedback);
    assert!(m.test_case_results.is_empty());
    assert_eq!(m.suggestions, vec!["Consider adding more test cases. Minimum recommended: 5"]);
  }

  #[test]
  fn well_formed_passing_case_scores_fifteen() {
    let r = score_manual_submission("shopping-cart", &[full_case(1)]);
    assert_eq!(r.score, 15);
    assert_eq!(r.status, ScoreStatus::Passed);
    let m = manual(&r.feedback);
    assert_eq!(m.test_case_results[0].points, MAX_POINTS_PER_CASE);
    assert!(m.test_case_results[0].feedback.is_empty());
  }

  #[test]
  fn coverage_bonus_added_once_at_one_and_a_half_times_minimum() {
    let seven: Vec<_> = (0..7).map(full_case).collect();
    assert_eq!(score_manual_submission("login-form", &seven).score, 100);

    // 7 cases < 7.5 → no bonus; use weaker cases so the clamp does not hide it
    let weak = |i| ManualTestCase { status: TestCaseStatus::Fail, ..full_case(i) };
    let seven_weak: Vec<_> = (0..7).map(weak).collect();
    let eight_weak: Vec<_> = (0..8).map(weak).collect();
    assert_eq!(score_manual_submission("login-form", &seven_weak).score, 70);
    assert_eq!(score_manual_submission("login-form", &eight_weak).score, 90);
    let m = manual(&score_manual_submission("login-form", &eight_weak).feedback).clone();
    assert_eq!(
      m.suggestions.iter().filter(|s| s.starts_with("Great!")).count(),
      1
    );
  }

  #[test]
  fn manual_score_is_clamped_to_hundred() {
    let many: Vec<_> = (0..20).map(full_case).collect();
    let r = score_manual_submission("shopping-cart", &many);
    assert_eq!(r.score, 100);
    assert_eq!(r.status, ScoreStatus::Passed);
  }

  #[test]
  fn short_fields_collect_per_case_feedback() {
    let tc = ManualTestCase {
      id: "x".into(),
      title: "  ab ".into(),
      steps: vec!["one".into()],
      expected_result: "ok".into(),
      actual_result: Some("ok".into()),
      status: TestCaseStatus::Pending,
    };
    let r = score_manual_submission("shopping-cart", &[tc]);
    let res = &manual(&r.feedback).test_case_results[0];
    assert_eq!(res.points, 2);
    assert_eq!(
      res.feedback,
      vec![
        "Test case title should be more descriptive",
        "Consider adding more detailed steps",
        "Expected result should be more detailed",
      ]
    );
    // 2 / 15 → failed
    assert_eq!(r.status, ScoreStatus::Failed);
  }

  #[test]
  fn missing_steps_award_nothing() {
    let tc = ManualTestCase { steps: vec![], ..full_case(0) };
    let r = score_manual_submission("shopping-cart", &[tc]);
    let res = &manual(&r.feedback).test_case_results[0];
    assert_eq!(res.points, 10);
    assert_eq!(res.feedback, vec!["Test case should have clear steps"]);
  }

  #[test]
  fn manual_status_thresholds() {
    // 10/15 = 66.7% → reviewing
    let reviewing = ManualTestCase { status: TestCaseStatus::Fail, ..full_case(0) };
    assert_eq!(score_manual_submission("shopping-cart", &[reviewing]).status, ScoreStatus::Reviewing);
    // 7/15 = 46.7% → failed
    let failed = ManualTestCase { steps: vec!["a".into()], status: TestCaseStatus::Fail, ..full_case(0) };
    assert_eq!(score_manual_submission("shopping-cart", &[failed]).status, ScoreStatus::Failed);
  }

  #[test]
  fn rules_override_changes_minimum() {
    let rules = ChallengeRules { challenge_id: "custom".into(), min_test_cases: 2, required_test_types: vec![] };
    let cases: Vec<_> = (0..3).map(full_case).collect();
    let r = score_manual_with_rules(&rules, &cases);
    assert_eq!(r.score, 55);
  }

  #[test]
  fn huge_minimum_never_grants_bonus() {
    let rules = ChallengeRules { challenge_id: "custom".into(), min_test_cases: usize::MAX, required_test_types: vec![] };
    let r = score_manual_with_rules(&rules, &[full_case(0)]);
    assert_eq!(r.score, 15);
    assert!(!manual(&r.feedback).suggestions.iter().any(|s| s.starts_with("Great!")));
  }

  #[test]
  fn automation_with_all_signals_scores_seventy_five() {
    let src = r#"
      from selenium import webdriver
      class LoginPage:
          def open(self): pass
      def test_login():
          try:
              WebDriverWait(driver, 10).until(EC.visibility_of(el))
              assert driver.title == "Home"
          catch:
              pass
    "#;
    let r = score_automation_submission("login-form", &code(src));
    assert_eq!(r.score, 75);
    assert_eq!(r.status, ScoreStatus::Passed);
    let a = automation(&r.feedback);
    assert_eq!(a.code_quality.len(), 6);
    assert!(a.suggestions.is_empty());
    assert!(a.errors.is_empty());
  }

  #[test]
  fn automation_without_signals_fails_with_error() {
    let r = score_automation_submission("x", &code("print('hello')"));
    assert_eq!(r.score, 0);
    assert_eq!(r.status, ScoreStatus::Failed);
    let a = automation(&r.feedback);
    assert_eq!(a.errors, vec!["Code needs significant improvement to meet quality standards"]);
    assert_eq!(
      a.suggestions,
      vec!["Consider using explicit waits instead of sleep/delays", "Add assertions to verify expected outcomes"]
    );
  }

  #[test]
  fn automation_matching_is_case_insensitive() {
    let r = score_automation_submission("x", &code("WebDriver d; Assert.True(x);"));
    assert_eq!(r.score, 25);
    assert_eq!(r.status, ScoreStatus::Failed);
  }

  #[test]
  fn automation_reviewing_band() {
    // assertions + wait/until = 30
    let r = score_automation_submission("x", &code("driver.wait.until(x)\nexpect x"));
    assert_eq!(r.score, 30);
    assert_eq!(r.status, ScoreStatus::Reviewing);
    assert!(automation(&r.feedback).errors.is_empty());
  }

  #[test]
  fn dispatch_uses_content_kind() {
    let rules = ChallengeRules::builtin("login-form");
    let r = score_submission(&rules, &SubmissionContent::Manual(vec![]));
    assert!(matches!(r.feedback, Feedback::Manual(_)));
    let r = score_submission(&rules, &SubmissionContent::Automation(code("")));
    assert!(matches!(r.feedback, Feedback::Automation(_)));
  }
}
