//! Persisted model artifact.
//!
//! The model lives in a single JSON file. Saving writes a sibling temp file,
//! fsyncs it and renames it over the target, so a reader sees either the old
//! model or the complete new one and never a partial write.

use crate::error::ModelError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Version of the on-disk envelope
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, M> {
    format_version: u32,
    model: &'a M,
}

#[derive(Deserialize)]
struct Envelope {
    format_version: u32,
    model: serde_json::Value,
}

/// Reads and atomically replaces the model file at a fixed path
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the persisted model.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet.
    pub fn load<M: DeserializeOwned>(&self) -> Result<Option<M>, ModelError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No persisted model at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let envelope: Envelope = serde_json::from_reader(BufReader::new(file))?;
        if envelope.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                expected: FORMAT_VERSION,
                found: envelope.format_version,
            });
        }

        let model = serde_json::from_value(envelope.model)?;
        info!("Loaded persisted model from {:?}", self.path);
        Ok(Some(model))
    }

    /// Replace the persisted model with `model`.
    ///
    /// Creates the parent directory if needed. On error the previous file is
    /// left as it was.
    pub fn save<M: Serialize>(&self, model: &M) -> Result<(), ModelError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".model-")
            .suffix(".tmp")
            .tempfile_in(dir)?;

        {
            let mut writer = BufWriter::new(&mut temp);
            serde_json::to_writer(
                &mut writer,
                &EnvelopeRef {
                    format_version: FORMAT_VERSION,
                    model,
                },
            )?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| ModelError::Persist {
            path: self.path.display().to_string(),
            source: e.error,
        })?;

        info!("Persisted model to {:?}", self.path);
        Ok(())
    }

    /// Delete the persisted model. Returns whether a file was removed.
    pub fn remove(&self) -> Result<bool, ModelError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed persisted model at {:?}", self.path);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
