//! Role domain
//!
//! Roles are plain tags. Everything that differs between roles (structuring
//! guideline, peer-evaluation rubric) is configuration data looked up by tag.

pub mod guideline;
pub mod kind;
pub mod rubric;

pub use guideline::GuidelineStore;
pub use kind::Role;
pub use rubric::{EvaluationRubric, RubricCriterion};
