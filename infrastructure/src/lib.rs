//! Infrastructure layer for agent-auction
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration file loading, the
//! OpenAI-compatible LLM gateway, and JSONL transcript logging.

pub mod config;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAuctionConfig, FileConfig, FileLoggingConfig,
    FileModelsConfig, FileOutputConfig, FilePipelineConfig, FileProviderConfig,
};
pub use logging::JsonlConversationLogger;
pub use openai::{ChatClient, OpenAiGateway, OpenAiSession};
