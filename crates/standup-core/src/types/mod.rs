mod artifact;
mod field;
mod intent;
mod outcome;
mod scope;

pub use artifact::{ArtifactDescriptor, ArtifactType};
pub use field::{FieldChanges, FieldValue};
pub use intent::UpdateIntent;
pub use outcome::{ApplyResult, BatchReport, ItemOutcome, SkipEntry};
pub use scope::Scope;
