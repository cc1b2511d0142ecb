//! Structured configuration issues.
//!
//! Validation collects every problem it finds instead of stopping at the
//! first, so a user can fix a config file in one pass.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a default is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// No criterion weights configured.
    EmptyWeights,
    /// A criterion weight is negative, infinite or not a number.
    NegativeWeight { criterion: String },
    /// `max_iterations` is zero.
    ZeroIterations,
    /// `agents_per_role` is zero.
    ZeroAgents,
    /// The pipeline has no roles.
    EmptyPipeline,
    /// An enum-valued field holds an unknown value.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A custom role appears in the pipeline without a guideline.
    MissingGuideline { role: String },
    /// A model field is set to an empty string.
    EmptyModelName { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let issue = ConfigIssue::error(ConfigIssueCode::ZeroIterations, "max_iterations is 0");
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: max_iterations is 0");

        let warning = ConfigIssue::warning(ConfigIssueCode::ZeroAgents, "agents_per_role is 0");
        assert!(!warning.is_error());
    }
}
