use super::{VaultBackend, QUOTA_MARKER};
use crate::error::{Result, StashError};
use crate::model::Snippet;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Default byte ceiling for the vault file (5 MiB).
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// File-backed vault: the whole collection serialized as one JSON array in
/// `snippets.json`.
pub struct FileVault {
    root: PathBuf,
    quota_bytes: u64,
}

impl FileVault {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }

    pub fn with_quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    fn collection_path(&self) -> PathBuf {
        self.root.join("snippets.json")
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(StashError::Io)?;
        }
        Ok(())
    }
}

impl VaultBackend for FileVault {
    fn load_collection(&self) -> Result<Vec<Snippet>> {
        let path = self.collection_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(StashError::Io)?;
        let snippets: Vec<Snippet> =
            serde_json::from_str(&content).map_err(StashError::Serialization)?;
        Ok(snippets)
    }

    fn save_collection(&self, snippets: &[Snippet]) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let content = serde_json::to_string_pretty(snippets).map_err(StashError::Serialization)?;

        // Quota is checked before anything touches disk
        if content.len() as u64 > self.quota_bytes {
            return Err(StashError::Store(format!(
                "write of {} bytes exceeds the {} ceiling of {}",
                content.len(),
                QUOTA_MARKER,
                self.quota_bytes
            )));
        }

        let tmp_file = self.root.join(format!(".snippets-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(StashError::Io)?;
        fs::rename(&tmp_file, self.collection_path()).map_err(StashError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SnippetStore;
    use tempfile::TempDir;

    fn make_snippet(text: &str) -> Snippet {
        Snippet::new(
            text.to_string(),
            "https://example.com".to_string(),
            "Example".to_string(),
            String::new(),
        )
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path().to_path_buf());
        assert!(vault.load_collection().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path().to_path_buf());
        let snippets = vec![make_snippet("one"), make_snippet("two")];

        vault.save_collection(&snippets).unwrap();
        let loaded = vault.load_collection().unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, snippets[0].id);
        assert_eq!(loaded[1].id, snippets[1].id);
        assert_eq!(loaded[0].text, "one");
    }

    #[test]
    fn test_save_creates_vault_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("vault");
        let vault = FileVault::new(root.clone());

        vault.save_collection(&[make_snippet("first")]).unwrap();

        assert!(root.join("snippets.json").exists());
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path().to_path_buf());

        vault.save_collection(&[make_snippet("only")]).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["snippets.json".to_string()]);
    }

    #[test]
    fn test_over_quota_write_fails_and_keeps_old_file() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path().to_path_buf());
        let small = vec![make_snippet("small")];
        vault.save_collection(&small).unwrap();

        let tight = FileVault::new(dir.path().to_path_buf()).with_quota(16);
        let err = tight
            .save_collection(&[make_snippet("does not fit")])
            .unwrap_err();

        assert!(err.to_string().contains(QUOTA_MARKER));
        let kept = tight.load_collection().unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, small[0].id);
    }

    #[test]
    fn test_store_reports_quota_exceeded_over_file_vault() {
        let dir = TempDir::new().unwrap();
        let store =
            SnippetStore::with_backend(FileVault::new(dir.path().to_path_buf()).with_quota(16));

        let result = store.save(&make_snippet("does not fit"));

        assert!(matches!(result, Err(StashError::QuotaExceeded)));
    }
}
