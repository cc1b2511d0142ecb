//! Output and logging configuration from TOML (`[output]`, `[logging]`)

use auction_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Where transcripts and trace logs go
///
/// ```toml
/// [logging]
/// dir = "~/.local/share/agent-auction/logs"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for JSONL transcripts; none disables them
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "json"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(config.output.color);
    }

    #[test]
    fn test_logging_dir() {
        let toml_str = r#"
[logging]
dir = "/tmp/auction-logs"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.dir, Some(PathBuf::from("/tmp/auction-logs")));
    }
}
