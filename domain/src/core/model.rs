//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// LLM models that can back the generation and critic capabilities (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    Gpt41Mini,
    // Custom (any OpenAI-compatible model id)
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4o => "gpt-4o-2024-05-13",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (GPT-4o, 2024-05-13 snapshot)
    fn default() -> Self {
        Model::Gpt4o
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gpt-4o-2024-05-13" | "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [Model::Gpt4o, Model::Gpt4oMini, Model::Gpt41, Model::Gpt41Mini] {
            let parsed = Model::from(model.to_string().as_str());
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_short_alias() {
        assert_eq!(Model::from("gpt-4o"), Model::Gpt4o);
    }

    #[test]
    fn test_custom_model() {
        let model = Model::from("qwen2.5-7b-instruct");
        assert_eq!(model, Model::Custom("qwen2.5-7b-instruct".to_string()));
        assert_eq!(model.to_string(), "qwen2.5-7b-instruct");
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default().as_str(), "gpt-4o-2024-05-13");
    }
}
