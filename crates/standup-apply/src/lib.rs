pub mod applier;
pub mod batch;
pub mod error;
pub mod manual;
pub mod memory;
pub mod tracker;

pub use applier::{apply_update, plan_update, UpdatePlan};
pub use batch::{Pipeline, TranscriptRequest};
pub use error::{ApplyError, TrackerError};
pub use manual::ManualUpdate;
pub use memory::MemoryTracker;
pub use tracker::ArtifactTracker;
