//! JSON shapes exchanged with the Rally Web Services API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use standup_core::{ArtifactDescriptor, ArtifactType, FieldChanges};

pub const ARTIFACT_FETCH: &str =
    "FormattedID,Name,State,ScheduleState,Blocked,BlockedReason,_ref,_type";

#[derive(Debug, Deserialize)]
pub struct QueryEnvelope {
    #[serde(rename = "QueryResult", default)]
    pub query_result: QueryResult,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "Results", default)]
    pub results: Vec<RawArtifact>,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawArtifact {
    #[serde(rename = "FormattedID", default)]
    pub formatted_id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(rename = "_type")]
    pub artifact_type: String,
    #[serde(rename = "ScheduleState", default)]
    pub schedule_state: Option<String>,
    /// A plain string on defects and tasks, a state object on portfolio items.
    #[serde(rename = "State", default)]
    pub state: Option<Value>,
    #[serde(rename = "Blocked", default)]
    pub blocked: Option<bool>,
}

impl RawArtifact {
    pub fn into_descriptor(self) -> ArtifactDescriptor {
        let artifact_type = ArtifactType::parse(&self.artifact_type);
        let state = self.state.as_ref().and_then(state_name);
        let current_state = match artifact_type {
            ArtifactType::HierarchicalRequirement => self.schedule_state,
            _ => state,
        };
        ArtifactDescriptor {
            identifier: self.formatted_id,
            artifact_type,
            reference: self.reference,
            name: self.name,
            current_state,
            blocked: self.blocked,
        }
    }
}

fn state_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("_refObjectName")
            .or_else(|| obj.get("Name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct OperationEnvelope {
    #[serde(rename = "OperationResult", default)]
    pub operation_result: Option<OperationResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OperationResult {
    #[serde(rename = "Errors", default)]
    pub errors: Vec<String>,
    #[serde(rename = "Warnings", default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEnvelope {
    #[serde(rename = "CreateResult", default)]
    pub create_result: Option<CreateResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateResult {
    #[serde(rename = "Errors", default)]
    pub errors: Vec<String>,
    #[serde(rename = "Object", default)]
    pub object: Option<CreatedObject>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedObject {
    #[serde(rename = "_ref", default)]
    pub reference: String,
}

/// `{"<Type>": {field: value, ...}}`, the body of an artifact update.
pub fn update_body(artifact_type: &ArtifactType, changes: &FieldChanges) -> Result<Value, serde_json::Error> {
    let mut body = Map::new();
    body.insert(artifact_type.name(), serde_json::to_value(changes)?);
    Ok(Value::Object(body))
}

#[derive(Debug, Serialize)]
pub struct ConversationPostRequest<'a> {
    #[serde(rename = "ConversationPost")]
    pub conversation_post: ConversationPost<'a>,
}

#[derive(Debug, Serialize)]
pub struct ConversationPost<'a> {
    #[serde(rename = "Artifact")]
    pub artifact: &'a str,
    #[serde(rename = "Text")]
    pub text: &'a str,
}
