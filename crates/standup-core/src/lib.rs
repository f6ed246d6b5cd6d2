pub mod state;
pub mod types;

pub use types::{
    ApplyResult, ArtifactDescriptor, ArtifactType, BatchReport, FieldChanges, FieldValue,
    ItemOutcome, Scope, SkipEntry, UpdateIntent,
};
