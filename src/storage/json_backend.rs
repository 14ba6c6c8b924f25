use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{TransactionSlot, STORAGE_KEY};
use crate::{errors::Result, utils::files};

const SLOT_EXTENSION: &str = "json";

/// Filesystem-backed slot: one JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    key: String,
    path: PathBuf,
}

impl JsonFileSlot {
    /// Slot for the default key inside `data_dir`. The directory is created on first write.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::with_key(data_dir, STORAGE_KEY)
    }

    pub fn with_key(data_dir: impl AsRef<Path>, key: &str) -> Self {
        let path = data_dir
            .as_ref()
            .join(format!("{}.{}", key, SLOT_EXTENSION));
        Self {
            key: key.to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionSlot for JsonFileSlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, data: &str) -> Result<()> {
        files::write_atomic(&self.path, data)?;
        tracing::trace!(path = %self.path.display(), bytes = data.len(), "slot written");
        Ok(())
    }
}
