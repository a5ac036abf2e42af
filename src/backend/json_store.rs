use std::{fs, io, path::{Path, PathBuf}};

use log::debug;

use crate::backend::interface::{Storage, Result};

/// Keeps each slot as `<directory>/<key>.json`.
pub struct JsonStore {
    directory: PathBuf
}

impl JsonStore {
    pub fn new(directory: impl AsRef<Path>) -> JsonStore {
        JsonStore { directory: directory.as_ref().to_path_buf() }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl Storage for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into())
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.directory)?;

        // write aside and swap in, a crash mid-write must not truncate the slot
        let path = self.slot_path(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        debug!("wrote {} bytes to {}", value.len(), path.display());
        return Ok(());
    }
}
