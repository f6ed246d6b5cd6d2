use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::state::field;

/// The kind of a tracked work item, as named by the tracker's `_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactType {
    HierarchicalRequirement,
    Defect,
    Task,
    /// `PortfolioItem/<Kind>`; carries the kind.
    PortfolioItem(String),
    Other(String),
}

impl ArtifactType {
    pub fn parse(name: &str) -> Self {
        match name {
            "HierarchicalRequirement" => ArtifactType::HierarchicalRequirement,
            "Defect" => ArtifactType::Defect,
            "Task" => ArtifactType::Task,
            other => match other.strip_prefix("PortfolioItem/") {
                Some(kind) => ArtifactType::PortfolioItem(kind.to_string()),
                None => ArtifactType::Other(other.to_string()),
            },
        }
    }

    pub fn name(&self) -> String {
        match self {
            ArtifactType::HierarchicalRequirement => "HierarchicalRequirement".to_string(),
            ArtifactType::Defect => "Defect".to_string(),
            ArtifactType::Task => "Task".to_string(),
            ArtifactType::PortfolioItem(kind) => format!("PortfolioItem/{kind}"),
            ArtifactType::Other(name) => name.clone(),
        }
    }

    /// The field holding workflow status for this type, if automatic state
    /// updates are supported at all. Portfolio items have no mapping.
    pub fn state_field(&self) -> Option<&'static str> {
        match self {
            ArtifactType::HierarchicalRequirement => Some(field::SCHEDULE_STATE),
            ArtifactType::Defect | ArtifactType::Task => Some(field::STATE),
            ArtifactType::PortfolioItem(_) | ArtifactType::Other(_) => None,
        }
    }

    pub fn supports_blocked(&self) -> bool {
        matches!(
            self,
            ArtifactType::HierarchicalRequirement | ArtifactType::Defect | ArtifactType::Task
        )
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for ArtifactType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for ArtifactType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ArtifactType::parse(&name))
    }
}

/// A freshly resolved artifact. Never cached between intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    pub identifier: String,
    pub artifact_type: ArtifactType,
    /// Canonical URL of the artifact; the target of mutations and comments.
    pub reference: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_state: Option<String>,
    #[serde(default)]
    pub blocked: Option<bool>,
}

impl ArtifactDescriptor {
    pub fn state_field(&self) -> Option<&'static str> {
        self.artifact_type.state_field()
    }

    pub fn blocked_supported(&self) -> bool {
        self.artifact_type.supports_blocked()
    }
}
