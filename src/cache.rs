use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::error::{AppError, AppResult};
use crate::services::MarkerStore;

pub const DEFAULT_MARKER_FILE: &str = ".cache";

/// Keeps the last announced commit id as plain text in a single file.
pub struct FileMarkerStore {
    file_path: PathBuf,
}

impl FileMarkerStore {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_marker(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.file_path) {
            Ok(contents) => Ok(Some(contents.trim().to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AppError::CacheRead {
                path: self.file_path.clone(),
                source,
            }),
        }
    }

    fn write_marker(&self, id: &str) -> AppResult<()> {
        let wrap = |source: std::io::Error| AppError::CacheWrite {
            path: self.file_path.clone(),
            source,
        };
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
        fs::write(&self.file_path, id).map_err(wrap)
    }
}

impl MarkerStore for FileMarkerStore {
    fn load(&self) -> String {
        match self.read_marker() {
            Ok(Some(marker)) => marker,
            Ok(None) => {
                debug!(path = %self.file_path.display(), "no marker file yet");
                String::new()
            }
            Err(err) => {
                warn!(error = %err, "ignoring unreadable marker");
                String::new()
            }
        }
    }

    fn save(&self, id: &str) {
        if let Err(err) = self.write_marker(id) {
            error!(error = %err, "marker not persisted; next tick may repeat this batch");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMarkerStore::new(dir.path().join(".cache"));
        assert_eq!(store.load(), "");
    }

    #[test]
    fn save_then_load_returns_trimmed_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(".cache");
        let store = FileMarkerStore::new(path.clone());

        store.save("c3c3c3");
        assert_eq!(store.load(), "c3c3c3");

        fs::write(&path, "  d4d4d4\n").unwrap();
        assert_eq!(store.load(), "d4d4d4");
    }

    #[test]
    fn save_overwrites_previous_marker() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMarkerStore::new(dir.path().join(".cache"));
        store.save("a-much-longer-first-identifier");
        store.save("short");
        assert_eq!(store.load(), "short");
    }

    #[test]
    fn unreadable_marker_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as text.
        let store = FileMarkerStore::new(dir.path().to_path_buf());
        assert_eq!(store.load(), "");
    }

    #[test]
    fn failed_save_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMarkerStore::new(dir.path().to_path_buf());
        store.save("c3");
        assert!(dir.path().is_dir());
    }
}
