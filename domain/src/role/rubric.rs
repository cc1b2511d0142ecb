//! Peer-evaluation rubrics
//!
//! Each built-in role judges its peers on three named criteria, each with a
//! guiding question. Custom roles have an empty rubric.

use super::kind::Role;

/// One rubric criterion and the question the evaluator answers for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RubricCriterion {
    pub name: &'static str,
    pub question: &'static str,
}

const fn criterion(name: &'static str, question: &'static str) -> RubricCriterion {
    RubricCriterion { name, question }
}

const PRODUCT_MANAGER_RUBRIC: &[RubricCriterion] = &[
    criterion(
        "Novelty",
        "How unique and innovative is the proposed approach compared to other Product Manager proposals?",
    ),
    criterion(
        "Feasibility",
        "How realistic and achievable is the proposed solution given the system constraints (e.g., time, resources, scalability)? Can it be implemented within the specified requirements?",
    ),
    criterion(
        "Alignment with Vision",
        "Does the proposal align well with the broader goals and vision of the project? Does it cover all major aspects of the product requirements?",
    ),
];

const ARCHITECT_RUBRIC: &[RubricCriterion] = &[
    criterion(
        "Novelty",
        "How innovative is the design? Does it introduce new architectural patterns or solutions compared to other proposals?",
    ),
    criterion(
        "SOP Compliance",
        "How well does the design adhere to standard architectural patterns, best practices, and coding standards (e.g., design patterns, modularity)? Is it easy to understand and integrate?",
    ),
    criterion(
        "Feasibility",
        "How practical and realistic is the design? Does it fit within the overall system constraints (e.g., performance, scalability, and maintenance)? Are there any potential implementation challenges?",
    ),
];

const ENGINEER_RUBRIC: &[RubricCriterion] = &[
    criterion(
        "Code Novelty",
        "How innovative and different is the implementation compared to others? Does the code use novel algorithms, libraries, or structures?",
    ),
    criterion(
        "Performance",
        "How well does the implementation perform? Are there any significant bottlenecks or inefficiencies?",
    ),
    criterion(
        "Code Diversity",
        "How diverse are the solutions proposed by different engineers? Does the code explore a range of potential approaches (e.g., different data structures, algorithms)?",
    ),
];

const QA_ENGINEER_RUBRIC: &[RubricCriterion] = &[
    criterion(
        "Test Coverage",
        "How comprehensive is the test coverage? Does it cover all key features, edge cases, and potential failure scenarios?",
    ),
    criterion(
        "Bug Detection Rate",
        "How effective are the QA agents at identifying bugs or issues? Do they identify critical problems that were missed in earlier stages?",
    ),
    criterion(
        "Robustness",
        "How resilient is the solution under various conditions? Does it handle unexpected inputs and edge cases gracefully?",
    ),
];

/// The fixed rubric a role applies when evaluating peers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationRubric {
    criteria: &'static [RubricCriterion],
}

impl EvaluationRubric {
    pub fn for_role(role: &Role) -> Self {
        let criteria = match role {
            Role::ProductManager => PRODUCT_MANAGER_RUBRIC,
            Role::Architect => ARCHITECT_RUBRIC,
            Role::Engineer => ENGINEER_RUBRIC,
            Role::QaEngineer => QA_ENGINEER_RUBRIC,
            Role::Custom(_) => &[],
        };
        Self { criteria }
    }

    pub fn criteria(&self) -> &'static [RubricCriterion] {
        self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
