use async_trait::async_trait;

use standup_core::{ArtifactDescriptor, ArtifactType, FieldChanges, Scope};

use crate::TrackerError;

/// The remote work-item tracker the pipeline reads from and writes to.
///
/// Implementations own transport concerns such as timeouts. Callers never
/// retry and never cache what `resolve` returns.
#[async_trait]
pub trait ArtifactTracker: Send + Sync {
    /// Look up an artifact by formatted identifier within `scope`.
    async fn resolve(
        &self,
        identifier: &str,
        scope: &Scope,
    ) -> Result<ArtifactDescriptor, TrackerError>;

    /// Persist all `changes` to the artifact at `reference` in one call.
    async fn mutate(
        &self,
        reference: &str,
        artifact_type: &ArtifactType,
        changes: &FieldChanges,
    ) -> Result<(), TrackerError>;

    /// Attach free text to the artifact's discussion.
    async fn comment(&self, reference: &str, text: &str) -> Result<(), TrackerError>;
}
