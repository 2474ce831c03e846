//! Artifact Module - persisted training bundle
//!
//! # Architecture
//! - `types.rs`: `Artifact`, `ArtifactMeta`, tagged `StoredPayload`
//! - `validate.rs`: format/layout/checksum validation
//! - `storage.rs`: atomic single-file store
//!
//! # Failure Strategy
//! Absent, corrupt, foreign-layout or unknown-format files load as "no
//! model" with a warning. The process keeps running and waits for a retrain.

pub mod types;
pub mod validate;
pub mod storage;

pub use types::{Artifact, ArtifactMeta, StoredPayload, ARTIFACT_FORMAT_VERSION};
pub use validate::ArtifactError;
pub use storage::{get_default_artifact_path, ArtifactStore};
