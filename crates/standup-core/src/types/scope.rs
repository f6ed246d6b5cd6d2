use serde::{Deserialize, Serialize};

/// Workspace and optional project every tracker call is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub workspace: String,
    #[serde(default)]
    pub project: Option<String>,
}

impl Scope {
    pub fn new(workspace: impl Into<String>, project: Option<String>) -> Self {
        Self {
            workspace: workspace.into(),
            project: project.filter(|p| !p.trim().is_empty()),
        }
    }
}
