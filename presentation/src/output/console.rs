//! Console output formatter for auction results

use auction_application::ExperimentOutcome;
use auction_domain::{
    OutputFormat, PipelineOutcome, ProcessReport, ProposalRecord, RoundRecord, StageOutcome,
};
use colored::Colorize;
use serde::Serialize;

/// Formats stage, pipeline, and experiment results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn ANSI colors off for every formatter and progress line
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format one stage in the requested format
    pub fn stage(outcome: &StageOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format_stage(outcome),
            OutputFormat::Winner => Self::format_stage_winner_only(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format a pipeline in the requested format
    pub fn pipeline(outcome: &PipelineOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format_pipeline(outcome),
            OutputFormat::Winner => Self::format_pipeline_winner_only(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format an experiment in the requested format
    pub fn experiment(outcome: &ExperimentOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(outcome),
            OutputFormat::Full | OutputFormat::Winner => {
                let mut output = String::new();
                for (i, pipeline) in outcome.pipelines.iter().enumerate() {
                    output.push_str(&Self::header(&format!("Task {}", i + 1)));
                    output.push('\n');
                    if format == OutputFormat::Full {
                        output.push_str(&Self::format_pipeline(pipeline));
                    } else {
                        output.push_str(&Self::format_pipeline_winner_only(pipeline));
                    }
                    output.push('\n');
                }
                output.push_str(&Self::format_report(&outcome.report));
                output
            }
        }
    }

    /// Every round of a stage: proposals, scores, winner, and feedback
    pub fn format_stage(outcome: &StageOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("{} Stage", outcome.role)));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n\n",
            "Task:".cyan().bold(),
            Self::truncate(&outcome.task, 400)
        ));

        for round in &outcome.rounds {
            output.push_str(&Self::format_round(round));
        }

        output.push_str(&Self::section_header("Result"));
        output.push_str(&Self::format_stage_summary(outcome));
        output.push_str(&Self::footer());

        output
    }

    fn format_round(round: &RoundRecord) -> String {
        let mut output = Self::section_header(&format!(
            "Round {} (diversity {:.2})",
            round.round, round.diversity
        ));

        for proposal in &round.proposals {
            let is_winner = round.winner.as_deref() == Some(proposal.owner.as_str());
            let title = format!(
                "── {} v{} · {} ──",
                proposal.owner,
                proposal.version,
                Self::score_label(proposal)
            );
            let title = if is_winner {
                format!("{} {}", title.green().bold(), "(winner)".green())
            } else {
                title.yellow().bold().to_string()
            };
            output.push_str(&format!("\n{}\n{}\n", title, proposal.content));

            if !proposal.metrics.is_empty() {
                let metrics: Vec<String> = proposal
                    .metrics
                    .iter()
                    .map(|(criterion, value)| format!("{}={:.1}", criterion, value))
                    .collect();
                output.push_str(&format!("{}\n", metrics.join("  ").dimmed()));
            }
        }

        if !round.feedback.is_empty() {
            output.push_str(&format!("\n{}\n", "Feedback:".cyan().bold()));
            for entry in &round.feedback {
                let marker = if entry.fallback { " (generic)" } else { "" };
                output.push_str(&format!(
                    "{}{}\n{}\n",
                    format!("  → {}", entry.recipient).bold(),
                    marker.dimmed(),
                    Self::indent(&entry.text, "    ")
                ));
            }
        }

        if !round.peer_reviews.is_empty() {
            output.push_str(&format!("\n{}\n", "Peer reviews:".cyan().bold()));
            for review in &round.peer_reviews {
                let failed = review.failure_count();
                let status = if failed == 0 {
                    format!("{} criteria answered", review.judgments.len())
                } else {
                    format!("{} of {} criteria failed", failed, review.judgments.len())
                };
                output.push_str(&format!(
                    "  {} on {}: {}\n",
                    review.evaluator, review.peer, status
                ));
            }
        }

        output
    }

    fn format_stage_summary(outcome: &StageOutcome) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {} after {} round(s) ({})\n",
            "Ended:".cyan().bold(),
            outcome.termination,
            outcome.round_count(),
            outcome.convergence
        ));
        match &outcome.winner {
            Some(winner) => output.push_str(&format!(
                "{} {} v{} · {}\n",
                "Winner:".green().bold(),
                winner.owner,
                winner.version,
                Self::score_label(winner)
            )),
            None => output.push_str(&format!(
                "{} none, the task description is passed through\n",
                "Winner:".yellow().bold()
            )),
        }
        output
    }

    /// Only the winning proposal of a stage
    pub fn format_stage_winner_only(outcome: &StageOutcome) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n\n",
            format!("=== {} ===", outcome.role).cyan().bold()
        ));
        output.push_str(&Self::format_stage_summary(outcome));
        output.push('\n');
        output.push_str(&outcome.output);
        output.push('\n');
        output
    }

    /// Every stage in full, then the final output
    pub fn format_pipeline(outcome: &PipelineOutcome) -> String {
        let mut output = String::new();
        for stage in &outcome.stages {
            output.push_str(&Self::format_stage(stage));
        }
        output.push_str(&Self::format_pipeline_winner_only(outcome));
        output
    }

    /// Stage winners in one line each, then the final output
    pub fn format_pipeline_winner_only(outcome: &PipelineOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Pipeline Result ===".cyan().bold()
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Task:".bold(),
            Self::truncate(&outcome.task, 200)
        ));

        for stage in &outcome.stages {
            let winner = stage
                .winner
                .as_ref()
                .map(|w| format!("{} ({})", w.owner, Self::score_label(w)))
                .unwrap_or_else(|| "no winner".to_string());
            output.push_str(&format!(
                "  {} {:<18} {} · {} round(s)\n",
                "*".cyan(),
                stage.role.to_string(),
                winner,
                stage.round_count()
            ));
        }

        output.push_str(&format!("\n{}\n", "Final output:".green().bold()));
        output.push_str(outcome.final_output());
        output.push('\n');
        output
    }

    /// The three process metrics
    pub fn format_report(report: &ProcessReport) -> String {
        let mut output = Self::section_header(&format!(
            "Process metrics over {} stage(s)",
            report.stages
        ));
        output.push_str(&format!(
            "  {:<32} {:.3}\n",
            "Task ownership entropy", report.task_ownership_entropy
        ));
        output.push_str(&format!(
            "  {:<32} {:.3}\n",
            "Adaptation responsiveness rate", report.adaptation_responsiveness_rate
        ));
        output.push_str(&format!(
            "  {:<32} {:.3}\n",
            "Feedback utilization score", report.feedback_utilization_score
        ));
        output
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn score_label(record: &ProposalRecord) -> String {
        match record.score {
            Some(score) => format!("score {:.2}", score),
            None => "unscored".to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_chars).collect();
            format!("{}…", cut)
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_domain::{
        ConvergencePolicy, CriterionScores, FeedbackEntry, Role, StageTermination,
    };

    fn sample_stage() -> StageOutcome {
        let winner = ProposalRecord::new("Engineer-2", "Use a trie for prefix lookups.", 1)
            .with_score(6.4, CriterionScores::from([("novelty".to_string(), 8.0)]));
        let loser = ProposalRecord::new("Engineer-1", "Use a hash map.", 1)
            .with_score(4.0, CriterionScores::new());
        StageOutcome {
            role: Role::Engineer,
            task: "Implement autocomplete".to_string(),
            output: winner.content.clone(),
            winner: Some(winner.clone()),
            rounds: vec![RoundRecord {
                round: 1,
                proposals: vec![loser, winner],
                winner: Some("Engineer-2".to_string()),
                feedback: vec![FeedbackEntry {
                    recipient: "Engineer-1".to_string(),
                    text: "- Consider prefix structure".to_string(),
                    fallback: false,
                }],
                diversity: 0.5,
                peer_reviews: Vec::new(),
            }],
            convergence: ConvergencePolicy::FullBudget,
            termination: StageTermination::BudgetExhausted,
        }
    }

    #[test]
    fn test_full_stage_lists_rounds_and_feedback() {
        let output = ConsoleFormatter::format_stage(&sample_stage());
        assert!(output.contains("Round 1"));
        assert!(output.contains("Use a hash map."));
        assert!(output.contains("Consider prefix structure"));
        assert!(output.contains("novelty=8.0"));
        assert!(output.contains("budget_exhausted"));
    }

    #[test]
    fn test_winner_only_shows_output() {
        let output = ConsoleFormatter::stage(&sample_stage(), OutputFormat::Winner);
        assert!(output.contains("Use a trie for prefix lookups."));
        assert!(output.contains("score 6.40"));
        assert!(!output.contains("Use a hash map."));
    }

    #[test]
    fn test_no_winner_message() {
        let mut stage = sample_stage();
        stage.winner = None;
        stage.output = stage.task.clone();
        stage.termination = StageTermination::NoWinner;
        let output = ConsoleFormatter::format_stage_winner_only(&stage);
        assert!(output.contains("task description is passed through"));
        assert!(output.contains("Implement autocomplete"));
    }

    #[test]
    fn test_pipeline_json_round_trips() {
        let pipeline = PipelineOutcome {
            task: "Implement autocomplete".to_string(),
            stages: vec![sample_stage()],
        };
        let json = ConsoleFormatter::pipeline(&pipeline, OutputFormat::Json);
        let parsed: PipelineOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pipeline);
    }

    #[test]
    fn test_report_lists_all_metrics() {
        let report = ProcessReport {
            task_ownership_entropy: 1.5,
            adaptation_responsiveness_rate: 0.25,
            feedback_utilization_score: 0.5,
            stages: 8,
        };
        let output = ConsoleFormatter::format_report(&report);
        assert!(output.contains("8 stage(s)"));
        assert!(output.contains("1.500"));
        assert!(output.contains("0.250"));
        assert!(output.contains("0.500"));
    }

    #[test]
    fn test_truncate_long_task() {
        let long = "x".repeat(500);
        assert_eq!(ConsoleFormatter::truncate(&long, 10).chars().count(), 11);
        assert_eq!(ConsoleFormatter::truncate("short", 10), "short");
    }
}
