// SPDX-License-Identifier: MIT OR Apache-2.0
//! Snapshot tests for finding text and the serialized report.
//!
//! Message wording is user-facing; these pin it so changes show up in review.

use microlens_common::{ModelType, Solution, Submission};
use microlens_validation::SubmissionValidator;

fn render(sub: &Submission) -> String {
    SubmissionValidator::default()
        .validate(sub)
        .findings
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn typical_problem_submission() {
    let mut sub = Submission::new("Team Alpha", "beginner");
    sub.repo_url = Some("https://github.com/alpha/fits".to_string());

    let ev = sub.event_mut("rmdc26_0500");
    let sol = ev.add_solution(Solution::new("binary", ModelType::PointSourceBinaryLens)).unwrap();
    sol.set_parameter("t0", 2459123.5)
        .set_parameter("u0", 0.1)
        .set_parameter("tE", 20.0)
        .set_parameter("s", 1.1)
        .set_parameter("alpha", 0.5)
        .set_physical_parameter("Mtot", 1.0)
        .set_physical_parameter("M1", 0.6)
        .set_physical_parameter("M2", 0.3)
        .set_alias(Some("best".to_string()));
    let other = ev.add_solution(Solution::new("single", ModelType::PointSourcePointLens)).unwrap();
    other
        .set_parameter("t0", 2459123.5)
        .set_parameter("u0", 0.1)
        .set_parameter("tE", 20.0)
        .set_alias(Some("best".to_string()));

    insta::assert_snapshot!(render(&sub), @r"
    [warning] event_id_not_in_tier: event rmdc26_0500: Event 'rmdc26_0500' is not part of tier 'beginner' (expected rmdc26_0 to rmdc26_200)
    [error] missing_parameter: event rmdc26_0500, solution binary: Missing required parameter 'q' for model type '1S2L'
    [error] mass_budget_mismatch: event rmdc26_0500, solution binary: Total mass Mtot = 1 does not match M1 + M2 = 0.8999999999999999 (10.0% difference, tolerance 1.0%)
    [error] duplicate_alias: event rmdc26_0500: Duplicate alias 'best' found in event 'rmdc26_0500' for solutions [binary, single]. Aliases must be unique within each event; rename one of them.
    ");
}

#[test]
fn report_json_shape() {
    let mut sub = Submission::new("Team Alpha", "test");
    sub.repo_url = Some("https://github.com/alpha/fits".to_string());
    let ev = sub.event_mut("rmdc26_2001");
    ev.add_solution(Solution::new("a", ModelType::PointSourcePointLens))
        .unwrap()
        .set_parameter("t0", 1.0)
        .set_parameter("u0", 0.1)
        .set_parameter("tE", 20.0);

    let report = SubmissionValidator::default().validate(&sub);
    let json = serde_json::to_string_pretty(&report).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "findings": [],
      "probabilities": [
        {
          "event_id": "rmdc26_2001",
          "estimates": [
            {
              "solution_id": "a",
              "probability": 1.0,
              "source": {
                "kind": "sole"
              }
            }
          ]
        }
      ]
    }
    "#);
}
