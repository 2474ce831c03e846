use sha2::{Digest, Sha256};

use crate::logic::features::layout::{validate_layout, LayoutMismatchError};
use super::types::{ArtifactFile, StoredPayload, ARTIFACT_FORMAT_VERSION};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Artifact format v{found} not supported (expected v{expected})")]
    UnsupportedFormat { found: u32, expected: u32 },

    #[error("Artifact checksum mismatch")]
    ChecksumMismatch,

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("Artifact corrupt: {0}")]
    Corrupt(String),
}

pub(super) fn checksum(payload: &str) -> String {
    hex::encode(Sha256::digest(payload.as_bytes()))
}

/// Validate envelope compatibility and integrity, then decode the payload
pub(super) fn validate_and_decode(file: &ArtifactFile) -> Result<StoredPayload, ArtifactError> {
    if file.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedFormat {
            found: file.format_version,
            expected: ARTIFACT_FORMAT_VERSION,
        });
    }

    validate_layout(file.feature_version, file.layout_hash)?;

    if checksum(&file.payload) != file.checksum {
        return Err(ArtifactError::ChecksumMismatch);
    }

    let payload: StoredPayload = serde_json::from_str(&file.payload)?;
    validate_payload(&payload)?;
    Ok(payload)
}

fn validate_payload(payload: &StoredPayload) -> Result<(), ArtifactError> {
    if !payload.model().is_well_formed() {
        return Err(ArtifactError::Corrupt("model trees are malformed".to_string()));
    }

    if let StoredPayload::Bundle(artifact) = payload {
        if !artifact.background.all_finite() {
            return Err(ArtifactError::Corrupt("background sample has non-finite values".to_string()));
        }
        validate_layout(artifact.meta.feature_version, artifact.meta.layout_hash)?;
    }

    Ok(())
}
