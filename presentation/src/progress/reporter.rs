//! Progress reporting for auction stages

use auction_application::StageProgressNotifier;
use auction_domain::{ProposalRecord, Role};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;

/// A bar per role; concurrent pipelines running the same role share it.
struct RoleBar {
    bar: ProgressBar,
    active: usize,
}

/// Reports progress during stage execution with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<Role, RoleBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, role: &Role, f: impl FnOnce(&mut RoleBar)) {
        if let Ok(mut bars) = self.bars.lock()
            && let Some(entry) = bars.get_mut(role)
        {
            f(entry);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StageProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, role: &Role, agents: usize, max_rounds: usize) {
        let total = (agents * max_rounds) as u64;
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };

        if let Some(entry) = bars.get_mut(role) {
            entry.bar.inc_length(total);
            entry.active += 1;
            return;
        }

        let bar = self.multi.add(ProgressBar::new(total));
        bar.set_style(Self::stage_style());
        bar.set_prefix(role.to_string());
        bar.set_message("Starting...");
        bars.insert(role.clone(), RoleBar { bar, active: 1 });
    }

    fn on_round_start(&self, role: &Role, round: usize) {
        self.with_bar(role, |entry| entry.bar.set_message(format!("round {}", round)));
    }

    fn on_proposal_ready(&self, role: &Role, agent: &str, fallback: bool) {
        self.with_bar(role, |entry| {
            let status = if fallback {
                format!("{} {}", "x".red(), agent)
            } else {
                format!("{} {}", "v".green(), agent)
            };
            entry.bar.set_message(status);
            entry.bar.inc(1);
        });
    }

    fn on_round_complete(&self, role: &Role, round: usize, winner: Option<&ProposalRecord>) {
        self.with_bar(role, |entry| {
            let message = match winner {
                Some(w) => format!(
                    "round {} won by {} ({:.2})",
                    round,
                    w.owner,
                    w.score.unwrap_or_default()
                ),
                None => format!("round {}: {}", round, "no winner".yellow()),
            };
            entry.bar.set_message(message);
        });
    }

    fn on_stage_complete(&self, role: &Role) {
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };
        let Some(entry) = bars.get_mut(role) else {
            return;
        };

        entry.active = entry.active.saturating_sub(1);
        if entry.active == 0 {
            // Early stops leave the bar short of its length
            let position = entry.bar.position();
            entry.bar.set_length(position);
            entry
                .bar
                .finish_with_message(format!("{} complete!", role.to_string().green()));
            bars.remove(role);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl StageProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, role: &Role, agents: usize, max_rounds: usize) {
        println!(
            "{} {} ({} agents, up to {} rounds)",
            "->".cyan(),
            role.to_string().bold(),
            agents,
            max_rounds
        );
    }

    fn on_proposal_ready(&self, _role: &Role, agent: &str, fallback: bool) {
        if fallback {
            println!("  {} {} (fallback)", "x".red(), agent);
        } else {
            println!("  {} {}", "v".green(), agent);
        }
    }

    fn on_round_complete(&self, _role: &Role, round: usize, winner: Option<&ProposalRecord>) {
        match winner {
            Some(w) => println!("  round {}: {} wins", round, w.owner.bold()),
            None => println!("  round {}: {}", round, "no winner".yellow()),
        }
    }

    fn on_stage_complete(&self, _role: &Role) {
        println!();
    }
}
