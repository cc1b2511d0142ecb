//! Configuration file loading for agent-auction
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `AGENT_AUCTION_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./auction.toml` or `./.auction.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/agent-auction/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAuctionConfig, FileConfig, FileLoggingConfig, FileModelsConfig,
    FileOutputConfig, FilePipelineConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
