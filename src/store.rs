use anyhow::Result;
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the submitted feed URL lives between sessions.
///
/// The session only ever consumes get/set/remove on this single key;
/// embedders with their own settings storage implement this themselves.
pub trait UrlStore {
    fn get(&self) -> Option<String>;
    fn set(&mut self, url: &str) -> Result<()>;
    fn remove(&mut self) -> Result<()>;
}

/// Default file-backed store in the platform data dir.
pub struct FileStore {
    path: Option<PathBuf>,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            path: Self::get_path(),
        }
    }

    /// Store under an explicit path (tests, portable installs).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn get_path() -> Option<PathBuf> {
        // ISOLATION: Check env var first
        if let Ok(test_dir) = env::var("NEXTROOM_TEST_DIR") {
            let path = PathBuf::from(test_dir);
            if !path.exists() {
                let _ = fs::create_dir_all(&path);
            }
            return Some(path.join("feed_url"));
        }

        if let Some(proj) = ProjectDirs::from("com", "nextroom", "nextroom") {
            let data_dir = proj.data_dir();
            if !data_dir.exists() {
                let _ = fs::create_dir_all(data_dir);
            }
            return Some(data_dir.join("feed_url"));
        }
        None
    }

    /// Atomic write: Write to .tmp file then rename
    fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlStore for FileStore {
    fn get(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        if !path.exists() {
            return None;
        }
        // An unreadable or empty file reads as "nothing stored"
        let url = fs::read_to_string(path).ok()?;
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        Some(url.to_string())
    }

    fn set(&mut self, url: &str) -> Result<()> {
        if let Some(path) = &self.path {
            Self::atomic_write(path, url)?;
        }
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        if let Some(path) = &self.path
            && path.exists()
        {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-process store for tests and embedders that persist elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    url: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UrlStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.url.clone()
    }

    fn set(&mut self, url: &str) -> Result<()> {
        self.url = Some(url.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        self.url = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(), None);
        store.set("https://example.org/feed.ics").unwrap();
        assert_eq!(store.get().as_deref(), Some("https://example.org/feed.ics"));
        store.remove().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = env::temp_dir().join(format!("nextroom-store-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut store = FileStore::at_path(dir.join("feed_url"));

        assert_eq!(store.get(), None);
        store.set("https://example.org/feed.ics").unwrap();
        assert_eq!(store.get().as_deref(), Some("https://example.org/feed.ics"));
        store.remove().unwrap();
        assert_eq!(store.get(), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn empty_file_reads_as_absent() {
        let dir = env::temp_dir().join(format!("nextroom-store-empty-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("feed_url");
        fs::write(&path, "  \n").unwrap();

        let store = FileStore::at_path(path);
        assert_eq!(store.get(), None);

        let _ = fs::remove_dir_all(dir);
    }
}
