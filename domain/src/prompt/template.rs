//! Prompt templates for proposal generation, scoring, and feedback

use crate::agent::PeerSummary;
use crate::role::{Role, RubricCriterion};

/// Templates for generating prompts at each step of a stage
pub struct PromptTemplate;

impl PromptTemplate {
    // ==================== Generation ====================

    /// System prompt for an agent writing its first proposal
    pub fn generation_system(role: &Role, agent: &str) -> String {
        format!(
            "You are a {} agent named {}. Follow the SOP to generate a proposal.",
            role, agent
        )
    }

    /// User prompt for an agent writing its first proposal
    pub fn generation_prompt(task: &str, guideline: &str) -> String {
        format!(
            r#"Task: {}
SOP Guidelines: {}
Please provide a structured and thoughtful proposal for your role."#,
            task, guideline
        )
    }

    /// System prompt for refinement after feedback
    pub fn refinement_system(role: &Role, agent: &str) -> String {
        format!(
            "You are a {} agent named {}. Refine your proposal based on feedback.",
            role, agent
        )
    }

    /// User prompt for refinement after feedback
    pub fn refinement_prompt(previous: &str, feedback: &str) -> String {
        format!(
            r#"Previous Proposal:
{}

Feedback:
{}

Revise your proposal accordingly."#,
            previous, feedback
        )
    }

    /// System prompt for evolution from stronger peers
    pub fn evolution_system() -> &'static str {
        "You are a competitive LLM agent improving your solution by observing stronger peers."
    }

    /// User prompt for evolution from stronger peers
    pub fn evolution_prompt(previous: &str, peers: &[PeerSummary]) -> String {
        let summaries = peers
            .iter()
            .map(PeerSummary::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            r#"Your Previous Proposal:
{}

Top Peer Proposals:
{}

Identify two useful strategies or techniques, incorporate them into your solution, and justify the changes."#,
            previous, summaries
        )
    }

    // ==================== Critic ====================

    /// System prompt for rating a proposal
    pub fn scoring_system() -> &'static str {
        "You are an expert software reviewer evaluating proposals based on standard metrics."
    }

    /// User prompt for rating a proposal on the given criteria.
    ///
    /// `peers` are other proposals of the same round, shown as context when
    /// the critic evaluates a whole peer group at once.
    pub fn scoring_prompt(
        task: &str,
        content: &str,
        criteria: &[String],
        peers: &[(String, String)],
    ) -> String {
        let mut prompt = format!("Task: {}\nProposal:\n{}\n\n", task, content);

        if !peers.is_empty() {
            prompt.push_str("Other proposals in this round (for comparison only):\n");
            for (name, peer_content) in peers {
                prompt.push_str(&format!("\n--- {} ---\n{}\n", name, peer_content));
            }
            prompt.push('\n');
        }

        prompt.push_str("Evaluate this proposal on a scale from 1 to 10 for the following:\n");
        for criterion in criteria {
            prompt.push_str(&format!("- {}\n", criterion));
        }

        let example = criteria
            .iter()
            .enumerate()
            .map(|(i, c)| format!("\"{}\": {}", c, 8usize.saturating_sub(i).max(1)))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("\nRespond ONLY with JSON like:\n{{{}}}", example));
        prompt
    }

    /// System prompt for feedback to a losing proposal
    pub fn feedback_system() -> &'static str {
        "You are a reviewer providing feedback to improve a weaker proposal."
    }

    /// User prompt for feedback to a losing proposal
    pub fn feedback_prompt(task: &str, winning: &str, losing: &str) -> String {
        format!(
            r#"Task: {}

Winning Proposal:
{}

Losing Proposal:
{}

Give constructive, actionable feedback to the losing proposal to help it improve. Highlight how it differs from the winner and what can be better."#,
            task, winning, losing
        )
    }

    // ==================== Peer evaluation ====================

    /// System prompt for an agent judging a peer
    pub fn peer_evaluation_system(role: &Role) -> String {
        format!("You are a {} evaluating peer proposals.", role)
    }

    /// User prompt for one rubric question about one peer proposal
    pub fn peer_evaluation_prompt(proposal: &str, criterion: &RubricCriterion) -> String {
        format!(
            r#"Evaluate the following proposal:
{}

Criterion: {}
Question: {}
Please provide a concise and critical evaluation."#,
            proposal, criterion.name, criterion.question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::EvaluationRubric;

    #[test]
    fn test_generation_prompts() {
        let system = PromptTemplate::generation_system(&Role::QaEngineer, "QA Engineer-1");
        assert!(system.contains("QA Engineer agent named QA Engineer-1"));

        let prompt = PromptTemplate::generation_prompt("Build a todo app", "List test cases.");
        assert!(prompt.contains("Task: Build a todo app"));
        assert!(prompt.contains("SOP Guidelines: List test cases."));
    }

    #[test]
    fn test_refinement_prompt() {
        let prompt = PromptTemplate::refinement_prompt("old plan", "add caching");
        assert!(prompt.contains("Previous Proposal:\nold plan"));
        assert!(prompt.contains("Feedback:\nadd caching"));
    }

    #[test]
    fn test_evolution_prompt_lists_peers() {
        let peers = vec![
            PeerSummary {
                name: "a".into(),
                excerpt: "use a trie".into(),
            },
            PeerSummary {
                name: "b".into(),
                excerpt: "use bloom filters".into(),
            },
        ];
        let prompt = PromptTemplate::evolution_prompt("mine", &peers);
        assert!(prompt.contains("a: use a trie\nb: use bloom filters"));
        assert!(prompt.contains("Identify two useful strategies"));
    }

    #[test]
    fn test_scoring_prompt() {
        let criteria = vec!["diversity".to_string(), "novelty".to_string()];
        let prompt = PromptTemplate::scoring_prompt("task", "content", &criteria, &[]);
        assert!(prompt.contains("- diversity\n- novelty\n"));
        assert!(prompt.contains(r#"{"diversity": 8, "novelty": 7}"#));
        assert!(!prompt.contains("Other proposals"));

        let peers = vec![("Engineer-2".to_string(), "other".to_string())];
        let with_peers = PromptTemplate::scoring_prompt("task", "content", &criteria, &peers);
        assert!(with_peers.contains("--- Engineer-2 ---\nother"));
    }

    #[test]
    fn test_feedback_prompt() {
        let prompt = PromptTemplate::feedback_prompt("task", "WIN", "LOSE");
        assert!(prompt.contains("Winning Proposal:\nWIN"));
        assert!(prompt.contains("Losing Proposal:\nLOSE"));
    }

    #[test]
    fn test_peer_evaluation_prompt() {
        let rubric = EvaluationRubric::for_role(&Role::Architect);
        let criterion = &rubric.criteria()[1];
        let prompt = PromptTemplate::peer_evaluation_prompt("design", criterion);
        assert!(prompt.contains("Criterion: SOP Compliance"));
        assert!(prompt.starts_with("Evaluate the following proposal:\ndesign"));
    }
}
