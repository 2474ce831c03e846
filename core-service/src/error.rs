//! Error handling
//!
//! Validation errors surface to the caller with the offending fields named.
//! Artifact corruption never reaches this type from `ArtifactStore::load`;
//! it is logged and reported as "no model loaded" instead.

use crate::logic::artifact::ArtifactError;
use crate::logic::features::SchemaError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing/malformed columns or input fields
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Upload could not be parsed into rows
    #[error("{0}")]
    DataFormat(String),

    /// Inference requested before any artifact exists
    #[error("Model not trained. Upload a training dataset first.")]
    ModelNotReady,

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl Error {
    /// True for errors caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Schema(_) | Error::DataFormat(_) | Error::ModelNotReady)
    }
}
