//! Role tag

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The role an agent plays within a role group (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    ProductManager,
    Architect,
    Engineer,
    QaEngineer,
    /// Any other role; its behaviour comes entirely from its guideline text
    Custom(String),
}

impl Role {
    /// The four built-in roles in pipeline order
    pub fn pipeline() -> Vec<Role> {
        vec![
            Role::ProductManager,
            Role::Architect,
            Role::Engineer,
            Role::QaEngineer,
        ]
    }

    /// Human-readable name, also used in prompts
    pub fn display_name(&self) -> &str {
        match self {
            Role::ProductManager => "Product Manager",
            Role::Architect => "Architect",
            Role::Engineer => "Engineer",
            Role::QaEngineer => "QA Engineer",
            Role::Custom(name) => name,
        }
    }

    /// Identifier used in configuration files
    pub fn config_key(&self) -> String {
        match self {
            Role::ProductManager => "product_manager".to_string(),
            Role::Architect => "architect".to_string(),
            Role::Engineer => "engineer".to_string(),
            Role::QaEngineer => "qa_engineer".to_string(),
            Role::Custom(name) => name.clone(),
        }
    }

    /// Agent name for the `index`-th (1-based) member of this role's group
    pub fn agent_name(&self, index: usize) -> String {
        format!("{}-{}", self.display_name(), index)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Role::Custom(_))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        Ok(match normalized.as_str() {
            "productmanager" | "pm" => Role::ProductManager,
            "architect" => Role::Architect,
            "engineer" => Role::Engineer,
            "qaengineer" | "qa" => Role::QaEngineer,
            _ => Role::Custom(s.trim().to_string()),
        })
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.config_key())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Role::from(s.as_str()))
    }
}
