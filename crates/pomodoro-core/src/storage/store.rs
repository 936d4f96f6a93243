//! Key-value persistence of user profiles.
//!
//! Profiles are keyed by [`UserProfile::name`]. The file-backed store keeps
//! every profile in one JSON document that is read whole and rewritten whole.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::profile::UserProfile;
use crate::error::{Result, StorageError};

pub trait ProfileStore {
    /// Look up the profile stored under `name`.
    fn load(&self, name: &str) -> Result<Option<UserProfile>>;

    /// Replace the profile with the same name, or add it.
    fn upsert(&mut self, profile: &UserProfile) -> Result<()>;
}

/// Load `name`, or build a default profile on first run. Nothing is written
/// until the caller saves.
///
/// # Errors
/// Returns an error if the store exists but cannot be read or parsed.
pub fn load_or_create<S: ProfileStore + ?Sized>(store: &S, name: &str) -> Result<UserProfile> {
    match store.load(name)? {
        Some(profile) => {
            debug!(user = name, days = profile.days.len(), "profile loaded");
            Ok(profile)
        }
        None => {
            info!(user = name, "no stored profile, starting with defaults");
            Ok(UserProfile::new(name))
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileDocument {
    profiles: Vec<UserProfile>,
}

impl ProfileDocument {
    fn upsert(&mut self, profile: &UserProfile) {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(slot) => *slot = profile.clone(),
            None => self.profiles.push(profile.clone()),
        }
    }
}

/// Profile store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as an empty document.
    fn read_document(&self) -> Result<ProfileDocument> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProfileDocument::default()),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    source,
                }
                .into())
            }
        };
        serde_json::from_str(&content).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
            .into()
        })
    }

    /// Writes a sibling temp file and renames it over the document, so a
    /// crash mid-save leaves the previous document intact.
    fn write_document(&self, doc: &ProfileDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)?;
        let failed = |source: std::io::Error| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(failed)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(failed)?;
        tmp.write_all(content.as_bytes()).map_err(failed)?;
        tmp.flush().map_err(failed)?;
        tmp.persist(&self.path).map_err(|e| failed(e.error))?;
        Ok(())
    }
}

impl ProfileStore for JsonStore {
    fn load(&self, name: &str) -> Result<Option<UserProfile>> {
        let doc = self.read_document()?;
        Ok(doc.profiles.into_iter().find(|p| p.name == name))
    }

    fn upsert(&mut self, profile: &UserProfile) -> Result<()> {
        let mut doc = self.read_document()?;
        doc.upsert(profile);
        self.write_document(&doc)
    }
}

/// In-memory store, handy for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    doc: ProfileDocument,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            doc: ProfileDocument {
                profiles: vec![profile],
            },
            writes: 0,
        }
    }

    /// Number of successful upserts so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self, name: &str) -> Result<Option<UserProfile>> {
        Ok(self.doc.profiles.iter().find(|p| p.name == name).cloned())
    }

    fn upsert(&mut self, profile: &UserProfile) -> Result<()> {
        self.doc.upsert(profile);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DEFAULT_USER;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_first_run() {
        let tmp = TempDir::new().unwrap();
        let store = JsonStore::new(tmp.path().join("profile.json"));
        assert!(store.load(DEFAULT_USER).unwrap().is_none());
        let profile = load_or_create(&store, DEFAULT_USER).unwrap();
        assert_eq!(profile, UserProfile::new(DEFAULT_USER));
        assert!(!store.path().exists());
    }

    #[test]
    fn upsert_replaces_by_name() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonStore::new(tmp.path().join("profile.json"));

        let mut profile = UserProfile::new(DEFAULT_USER);
        store.upsert(&profile).unwrap();
        profile.total_time_studied = 42;
        store.upsert(&profile).unwrap();
        store.upsert(&UserProfile::new("other")).unwrap();

        let doc = store.read_document().unwrap();
        assert_eq!(doc.profiles.len(), 2);
        assert_eq!(store.load(DEFAULT_USER).unwrap().unwrap().total_time_studied, 42);
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("profile.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonStore::new(&path);
        let err = store.load(DEFAULT_USER).unwrap_err();
        assert!(matches!(
            err,
            crate::CoreError::Storage(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn save_replaces_document_without_leftovers() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("profile.json");
        let mut store = JsonStore::new(&path);

        let mut profile = UserProfile::new(DEFAULT_USER);
        store.upsert(&profile).unwrap();
        profile.total_time_studied = 1500;
        store.upsert(&profile).unwrap();

        let entries: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("profile.json")]);
        assert_eq!(
            store.load(DEFAULT_USER).unwrap().unwrap().total_time_studied,
            1500
        );
    }

    #[test]
    fn failed_save_keeps_previous_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("profile.json");
        let mut store = JsonStore::new(&path);
        store.upsert(&UserProfile::new(DEFAULT_USER)).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        // A directory in the way of the document makes the final rename fail.
        let blocked = tmp.path().join("blocked.json");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::create_dir(blocked.join("child")).unwrap();
        let broken = JsonStore::new(&blocked);
        let err = broken.write_document(&ProfileDocument::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::CoreError::Storage(StorageError::WriteFailed { .. })
        ));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        let leftovers = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        store.upsert(&UserProfile::new(DEFAULT_USER)).unwrap();
        store.upsert(&UserProfile::new(DEFAULT_USER)).unwrap();
        assert_eq!(store.writes(), 2);
        assert!(store.load(DEFAULT_USER).unwrap().is_some());
    }
}
