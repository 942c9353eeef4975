//! Core LocalStore implementation

use eyre::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A flat, file-backed string key-value store.
///
/// Each key is one file directly under the store directory. Writes are
/// atomic (temp file + rename) within one process, but the directory is
/// shared mutable state across processes with no coordination: concurrent
/// writers race and the last writer wins.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

/// Keys are flat identifiers, never paths
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(eyre::eyre!("Empty storage key"));
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
        return Err(eyre::eyre!("Invalid storage key: '{}'", key));
    }
    // Leading dots would collide with temp files (and ".." escapes the dir)
    if key.starts_with('.') {
        return Err(eyre::eyre!("Invalid storage key: '{}'", key));
    }
    Ok(())
}

impl LocalStore {
    /// Open or create a store at the given directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create storage directory")?;
        debug!(?dir, "Opened local store");
        Ok(Self { dir })
    }

    /// Directory this store persists into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Store a value under a key, replacing any previous value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let tmp = self.dir.join(format!(".{}.tmp", key));
        fs::write(&tmp, value).context(format!("Failed to write storage key '{}'", key))?;
        fs::rename(&tmp, self.key_path(key)).context(format!("Failed to commit storage key '{}'", key))?;
        debug!(key, len = value.len(), "set");
        Ok(())
    }

    /// Read a value, `None` if the key has never been set (or was removed)
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read storage key '{}'", key)),
        }
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => {
                debug!(key, "removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(format!("Failed to remove storage key '{}'", key)),
        }
    }

    /// List all keys currently present, sorted
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir).context("Failed to list storage directory")? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                // Skip in-flight temp files
                if name.starts_with('.') {
                    continue;
                }
                keys.push(name.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Remove every key starting with the given prefix, returning how many
    /// were removed
    pub fn remove_prefix(&self, prefix: &str) -> Result<usize> {
        let mut removed = 0;
        for key in self.keys()? {
            if key.starts_with(prefix) {
                self.remove(&key)?;
                removed += 1;
            }
        }
        debug!(prefix, removed, "remove_prefix");
        Ok(removed)
    }

    /// Serialize a value as JSON under a key
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).context(format!("Failed to serialize value for '{}'", key))?;
        self.set(key, &json)
    }

    /// Read and deserialize a JSON value.
    ///
    /// Returns `Ok(None)` for an absent key and an error for present but
    /// malformed data; callers decide whether corrupt data is discarded.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).context(format!("Malformed JSON under storage key '{}'", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        store.set("yprompt_token", "t1").unwrap();
        assert_eq!(store.get("yprompt_token").unwrap(), Some("t1".to_string()));

        // Overwrite
        store.set("yprompt_token", "t2").unwrap();
        assert_eq!(store.get("yprompt_token").unwrap(), Some("t2".to_string()));
    }

    #[test]
    fn test_get_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        // Second remove is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_keys_sorted_and_skip_temp() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        std::fs::write(temp.path().join(".a.tmp"), "junk").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_remove_prefix() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        store.set("yprompt_a", "1").unwrap();
        store.set("yprompt_b", "2").unwrap();
        store.set("user_prompt_c", "3").unwrap();
        store.set("other", "4").unwrap();

        let removed = store.remove_prefix("yprompt_").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.keys().unwrap(), vec!["other".to_string(), "user_prompt_c".to_string()]);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        assert!(store.set("", "v").is_err());
        assert!(store.set("a/b", "v").is_err());
        assert!(store.set("..", "v").is_err());
        assert!(store.set(".hidden", "v").is_err());
        assert!(store.get("a/../b").is_err());
    }

    #[test]
    fn test_json_helpers() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Blob {
            n: u32,
            s: String,
        }

        let blob = Blob { n: 7, s: "x".into() };
        store.set_json("blob", &blob).unwrap();
        assert_eq!(store.get_json::<Blob>("blob").unwrap(), Some(blob));

        // Malformed data is an error, not a panic or a silent None
        store.set("blob", "{not json").unwrap();
        assert!(store.get_json::<Blob>("blob").is_err());

        assert_eq!(store.get_json::<Blob>("absent").unwrap(), None);
    }
}
