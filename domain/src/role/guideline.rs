//! Role guideline store
//!
//! Structuring instructions per role, built once at startup and shared
//! read-only (`Arc<GuidelineStore>`) by every stage.

use super::kind::Role;
use crate::core::error::DomainError;
use std::collections::HashMap;

const PRODUCT_MANAGER_GUIDELINE: &str = "PRD (Product Requirement Document) Clarification:
- Summarize the end-user need and business goal.
- Break down the requirements into functional and non-functional goals.
- Identify constraints (e.g., response time, UI constraints).
- Highlight edge requirements or ambiguities to be discussed.
- Output in a numbered list or tabular format for clarity.";

const ARCHITECT_GUIDELINE: &str = "System Design Proposal:
- Provide a high-level architectural design using UML-like textual representations.
- Describe main components/modules, their responsibilities, and how they interact.
- Use bullet points or text diagrams to show relationships between modules.
- Include technologies/libraries/frameworks if applicable.";

const ENGINEER_GUIDELINE: &str = "Implementation Plan:
- Outline the main algorithm or implementation logic in structured pseudocode.
- Use indentation, control flow (if/else, loops), and function-like definitions.
- Explain data structures, helper functions, and error handling as needed.
- Keep it readable and suitable for implementation handoff.";

const QA_ENGINEER_GUIDELINE: &str = "Test Plan and Validation Strategy:
- List key functional and edge-case scenarios to validate.
- Include unit test cases, integration points, and any stress/load tests.
- Specify input-output expectations for each case.
- Mention frameworks or coverage tools if relevant.";

/// Read-only mapping from role to guideline text
#[derive(Debug, Clone, Default)]
pub struct GuidelineStore {
    guidelines: HashMap<Role, String>,
}

impl GuidelineStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the built-in guidelines of the four pipeline roles
    pub fn with_defaults() -> Self {
        Self::new()
            .with_guideline(Role::ProductManager, PRODUCT_MANAGER_GUIDELINE)
            .with_guideline(Role::Architect, ARCHITECT_GUIDELINE)
            .with_guideline(Role::Engineer, ENGINEER_GUIDELINE)
            .with_guideline(Role::QaEngineer, QA_ENGINEER_GUIDELINE)
    }

    /// Add or replace a guideline (builder style, before the store is shared)
    pub fn with_guideline(mut self, role: Role, guideline: impl Into<String>) -> Self {
        self.guidelines.insert(role, guideline.into());
        self
    }

    pub fn get(&self, role: &Role) -> Option<&str> {
        self.guidelines.get(role).map(String::as_str)
    }

    /// Guideline for `role`, or [`DomainError::MissingGuideline`]
    pub fn require(&self, role: &Role) -> Result<&str, DomainError> {
        self.get(role)
            .ok_or_else(|| DomainError::MissingGuideline(role.to_string()))
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.guidelines.contains_key(role)
    }

    pub fn len(&self) -> usize {
        self.guidelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guidelines.is_empty()
    }
}
