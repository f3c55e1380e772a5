//! # Filesystem-backed key/value store
//!
//! [`FileStore`] keeps each key in its own file under a base directory, so the
//! native build remembers its device id across restarts the same way the
//! browser build does through local storage.
//!
//! ```text
//! <base_dir>/
//! ├── X-GatorPool-Device-Id
//! └── X-GatorPool-Username
//! ```
//!
//! The ui crate uses the platform data dir joined with `gatorpool` as the base.

use std::path::PathBuf;

use crate::kv::KeyValueStore;

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn path(&self, key: &str) -> PathBuf {
        // Keys are header names; keep them filesystem-safe regardless.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = std::fs::create_dir_all(&self.base);
        let _ = std::fs::write(self.path(key), value);
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("gatorpool"));
        store.set("X-GatorPool-Username", "albert@ufl.edu");

        let reopened = FileStore::new(dir.path().join("gatorpool"));
        assert_eq!(
            reopened.get("X-GatorPool-Username").as_deref(),
            Some("albert@ufl.edu")
        );

        reopened.remove("X-GatorPool-Username");
        assert!(store.get("X-GatorPool-Username").is_none());
    }

    #[test]
    fn test_missing_base_dir_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("does-not-exist"));
        assert!(store.get("anything").is_none());
        // Removing a missing key is a no-op.
        store.remove("anything");
    }
}
