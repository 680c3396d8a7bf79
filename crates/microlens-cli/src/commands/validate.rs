// SPDX-License-Identifier: MIT OR Apache-2.0
//! `validate` subcommand: run the full validation pass over a submission file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use microlens_common::Submission;
use microlens_validation::{SubmissionValidator, ValidationReport};
use tracing::info;

use crate::exit::{EXIT_SUCCESS, EXIT_VALIDATION_FAILED};
use crate::output::{OutputConfig, render_finding};

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Submission JSON file
    #[arg(value_name = "SUBMISSION")]
    pub submission: PathBuf,

    /// Treat warnings as failures
    #[arg(long)]
    pub deny_warnings: bool,

    /// Write a copy of the submission with computed relative probabilities
    /// filled in for active solutions that have none
    #[arg(long, value_name = "PATH")]
    pub fill_probabilities: Option<PathBuf>,
}

pub fn load_submission(path: &Path) -> Result<Submission> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid submission json '{}'", path.display()))
}

/// Copy of `submission` with unset probabilities taken from `report`.
fn with_probabilities(submission: &Submission, report: &ValidationReport) -> Submission {
    let mut filled = submission.clone();
    for event in &mut filled.events {
        let Some(probs) = report.probabilities_for(&event.event_id) else {
            continue;
        };
        for solution in event.solutions.iter_mut().filter(|s| s.is_active) {
            if solution.relative_probability.is_none() {
                solution.relative_probability = probs.get(&solution.solution_id);
            }
        }
    }
    filled
}

impl ValidateCommand {
    pub fn execute(&self, validator: &SubmissionValidator, output: &OutputConfig) -> Result<i32> {
        let submission = load_submission(&self.submission)?;
        info!(
            path = %self.submission.display(),
            events = submission.events.len(),
            solutions = submission.solution_count(),
            "loaded submission"
        );

        let report = validator.validate(&submission);
        output.emit_result(&report, print_report)?;

        if let Some(out) = &self.fill_probabilities {
            let filled = with_probabilities(&submission, &report);
            let json = serde_json::to_string_pretty(&filled)?;
            std::fs::write(out, json).with_context(|| format!("failed to write '{}'", out.display()))?;
            info!(path = %out.display(), "wrote submission with relative probabilities");
        }

        let (errors, warnings) = report.counts();
        let failed = errors > 0 || (self.deny_warnings && warnings > 0);
        Ok(if failed { EXIT_VALIDATION_FAILED } else { EXIT_SUCCESS })
    }
}

fn print_report(report: &ValidationReport) {
    for finding in &report.findings {
        println!("{}", render_finding(finding));
    }

    let with_estimates: Vec<_> = report.probabilities.iter().filter(|p| !p.estimates.is_empty()).collect();
    if !with_estimates.is_empty() {
        println!();
        println!("{}", style("Relative probabilities").bold());
        for probs in with_estimates {
            println!("  {}", style(&probs.event_id).cyan());
            for e in &probs.estimates {
                println!("    {:<24} {:>8.4}  ({})", e.solution_id, e.probability, source_label(&e.source));
            }
        }
    }

    let (errors, warnings) = report.counts();
    println!();
    let summary = format!("{errors} error(s), {warnings} warning(s)");
    if errors > 0 {
        println!("{}", style(summary).red().bold());
    } else if warnings > 0 {
        println!("{}", style(summary).yellow());
    } else {
        println!("{} {}", style("✓").green(), summary);
    }
}

fn source_label(source: &microlens_validation::ProbabilitySource) -> String {
    use microlens_validation::ProbabilitySource::*;
    match source {
        Sole => "only active solution".to_string(),
        Provided => "provided".to_string(),
        InformationCriterion { ic, k } => format!("IC {ic:.2}, k={k}"),
        EqualShare => "equal share".to_string(),
        Fallback => "equal split after overflow".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microlens_common::{ModelType, Solution};

    #[test]
    fn fill_only_touches_unset_active_solutions() {
        let mut sub = Submission::new("Team", "experienced");
        let ev = sub.event_mut("rmdc26_0001");
        ev.add_solution(Solution::new("a", ModelType::PointSourcePointLens)).unwrap();
        ev.add_solution(Solution::new("b", ModelType::PointSourcePointLens))
            .unwrap()
            .set_relative_probability(Some(0.25))
            .unwrap();
        ev.add_solution(Solution::new("c", ModelType::PointSourcePointLens)).unwrap().deactivate();

        let report = SubmissionValidator::default().validate(&sub);
        let filled = with_probabilities(&sub, &report);
        let ev = filled.event("rmdc26_0001").unwrap();
        assert_eq!(ev.solution("a").unwrap().relative_probability, Some(0.75));
        assert_eq!(ev.solution("b").unwrap().relative_probability, Some(0.25));
        assert_eq!(ev.solution("c").unwrap().relative_probability, None);
    }

    #[test]
    fn fill_never_writes_probabilities_outside_unit_range() {
        let mut sub = Submission::new("Team", "experienced");
        let ev = sub.event_mut("rmdc26_0001");
        ev.add_solution(Solution::new("a", ModelType::PointSourcePointLens)).unwrap().relative_probability =
            Some(-0.5);
        ev.add_solution(Solution::new("b", ModelType::PointSourcePointLens)).unwrap();

        let report = SubmissionValidator::default().validate(&sub);
        let filled = with_probabilities(&sub, &report);
        let ev = filled.event("rmdc26_0001").unwrap();
        assert_eq!(ev.solution("a").unwrap().relative_probability, Some(-0.5));
        assert_eq!(ev.solution("b").unwrap().relative_probability, Some(0.5));
    }
}
