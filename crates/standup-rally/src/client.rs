use async_trait::async_trait;

use standup_apply::{ArtifactTracker, TrackerError};
use standup_core::{ArtifactDescriptor, ArtifactType, FieldChanges, Scope};

use crate::config::RallyConfig;
use crate::wire::{
    update_body, ConversationPost, ConversationPostRequest, CreateEnvelope, OperationEnvelope,
    QueryEnvelope, ARTIFACT_FETCH,
};
use crate::RallyError;

const INTEGRATION_NAME: &str = "standup";
const INTEGRATION_VENDOR: &str = "standup contributors";

/// Rally Web Services API client. One instance is built per process and
/// shared by reference; it holds no per-artifact state.
#[derive(Debug, Clone)]
pub struct RallyClient {
    config: RallyConfig,
    client: reqwest::Client,
}

fn scope_params(scope: &Scope) -> Result<Vec<(&'static str, String)>, RallyError> {
    if scope.workspace.trim().is_empty() {
        return Err(RallyError::MissingWorkspace);
    }
    let mut params = vec![("workspace", scope.workspace.clone())];
    if let Some(project) = scope.project.as_ref().filter(|p| !p.is_empty()) {
        params.push(("project", project.clone()));
    }
    Ok(params)
}

impl RallyClient {
    pub fn new(config: RallyConfig) -> Result<Self, RallyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RallyConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("ApiKey {}", self.config.api_key),
            )
            .header("X-RallyIntegrationName", INTEGRATION_NAME)
            .header("X-RallyIntegrationVendor", INTEGRATION_VENDOR)
            .header("X-RallyIntegrationVersion", env!("CARGO_PKG_VERSION"))
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, RallyError> {
        let resp = builder.send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(RallyError::Status { status, body });
        }
        Ok(resp)
    }

    /// Look up any artifact type by formatted ID.
    pub async fn find_artifact(
        &self,
        formatted_id: &str,
        scope: &Scope,
    ) -> Result<ArtifactDescriptor, RallyError> {
        let mut params = scope_params(scope)?;
        params.extend([
            ("query", format!("(FormattedID = \"{formatted_id}\")")),
            ("pagesize", "1".to_string()),
            ("start", "1".to_string()),
            ("fetch", ARTIFACT_FETCH.to_string()),
        ]);

        let url = self.config.artifact_endpoint();
        let resp = self
            .send(self.request(reqwest::Method::GET, &url).query(&params))
            .await?;
        let envelope: QueryEnvelope = resp.json().await?;
        // A failed query is not a rejected write; the item just isn't found.
        for error in &envelope.query_result.errors {
            tracing::debug!("rally query error looking up {}: {}", formatted_id, error);
        }

        envelope
            .query_result
            .results
            .into_iter()
            .next()
            .map(|raw| raw.into_descriptor())
            .ok_or_else(|| RallyError::NotFound(formatted_id.to_string()))
    }

    pub async fn update_artifact(
        &self,
        reference: &str,
        artifact_type: &ArtifactType,
        changes: &FieldChanges,
    ) -> Result<(), RallyError> {
        let body = update_body(artifact_type, changes)?;
        let resp = self
            .send(self.request(reqwest::Method::POST, reference).json(&body))
            .await?;
        let envelope: OperationEnvelope = resp.json().await?;
        let result = envelope.operation_result.unwrap_or_default();
        if !result.errors.is_empty() {
            return Err(RallyError::Rejected(result.errors));
        }
        for warning in &result.warnings {
            tracing::debug!("rally warning updating {}: {}", reference, warning);
        }
        Ok(())
    }

    /// Post a discussion entry on the artifact; returns the new post's ref.
    pub async fn create_conversation_post(
        &self,
        reference: &str,
        text: &str,
    ) -> Result<String, RallyError> {
        let payload = ConversationPostRequest {
            conversation_post: ConversationPost {
                artifact: reference,
                text,
            },
        };
        let url = self.config.conversation_post_endpoint();
        let resp = self
            .send(self.request(reqwest::Method::POST, &url).json(&payload))
            .await?;
        let envelope: CreateEnvelope = resp.json().await?;
        let result = envelope.create_result.unwrap_or_default();
        if !result.errors.is_empty() {
            return Err(RallyError::Rejected(result.errors));
        }
        Ok(result.object.map(|o| o.reference).unwrap_or_default())
    }
}

#[async_trait]
impl ArtifactTracker for RallyClient {
    async fn resolve(
        &self,
        identifier: &str,
        scope: &Scope,
    ) -> Result<ArtifactDescriptor, TrackerError> {
        Ok(self.find_artifact(identifier, scope).await?)
    }

    async fn mutate(
        &self,
        reference: &str,
        artifact_type: &ArtifactType,
        changes: &FieldChanges,
    ) -> Result<(), TrackerError> {
        Ok(self.update_artifact(reference, artifact_type, changes).await?)
    }

    async fn comment(&self, reference: &str, text: &str) -> Result<(), TrackerError> {
        let created = self.create_conversation_post(reference, text).await?;
        tracing::debug!("posted conversation entry {} on {}", created, reference);
        Ok(())
    }
}
