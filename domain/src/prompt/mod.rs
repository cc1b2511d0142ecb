//! Prompt domain
//!
//! Templates for every call the coordination loop makes into the generation
//! and critic capabilities.

mod template;

pub use template::PromptTemplate;
