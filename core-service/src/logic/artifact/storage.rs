use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{APP_DIR_NAME, DEFAULT_ARTIFACT_FILE};
use crate::logic::features::layout::{layout_hash, FEATURE_VERSION};
use crate::logic::model::RandomForest;
use super::types::{Artifact, ArtifactFile, PayloadRef, StoredPayload, ARTIFACT_FORMAT_VERSION};
use super::validate::{checksum, validate_and_decode, ArtifactError};

/// Get default artifact path
pub fn get_default_artifact_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DEFAULT_ARTIFACT_FILE)
}

/// Single-file artifact store.
///
/// Writes go to a sibling temp file and are renamed over the target, so a
/// reader sees either the previous artifact or the new one, never a mix.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn at_default_location() -> Self {
        Self::new(get_default_artifact_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Persist a full training bundle, replacing any previous artifact
    pub fn save(&self, artifact: &Artifact) -> Result<(), ArtifactError> {
        self.write_payload(&PayloadRef::Bundle(artifact))?;
        log::info!(
            "Saved artifact {} to {} ({} trees, {} background rows)",
            artifact.meta.id,
            self.path.display(),
            artifact.model.trees().len(),
            artifact.background.len()
        );
        Ok(())
    }

    /// Persist a bare model (no background, metrics or preview)
    pub fn save_model_only(&self, model: &RandomForest) -> Result<(), ArtifactError> {
        self.write_payload(&PayloadRef::ModelOnly { model })
    }

    /// Strict load: `Ok(None)` when no file exists, classified error otherwise
    pub fn try_load(&self) -> Result<Option<StoredPayload>, ArtifactError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: ArtifactFile = serde_json::from_slice(&data)
            .map_err(|e| ArtifactError::Corrupt(format!("unreadable envelope: {e}")))?;

        validate_and_decode(&file).map(Some)
    }

    /// Lenient load used at startup: any failure degrades to "no model"
    pub fn load(&self) -> Option<StoredPayload> {
        match self.try_load() {
            Ok(Some(payload)) => {
                log::info!("Loaded {} artifact from {}", payload.kind(), self.path.display());
                Some(payload)
            }
            Ok(None) => {
                log::info!("No artifact at {}; waiting for training data", self.path.display());
                None
            }
            Err(e) => {
                log::warn!("Ignoring artifact at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn delete(&self) -> Result<(), ArtifactError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_ARTIFACT_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_payload<P: Serialize>(&self, payload: &P) -> Result<(), ArtifactError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_string(payload)?;
        let file = ArtifactFile {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            checksum: checksum(&payload),
            payload,
        };
        let bytes = serde_json::to_vec(&file)?;

        let tmp = self.temp_path();
        {
            let mut out = File::create(&tmp)?;
            out.write_all(&bytes)?;
            out.sync_all()?;
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        Ok(())
    }
}
