//! File-backed store of generated tone profiles, keyed by a caller-chosen id.
//!
//! The whole store is one pretty-printed JSON document.  Every mutation
//! rewrites it through a `.tmp` sibling that is synced and then renamed over
//! the previous file, so readers never observe a half-written store.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use tone_analyzer::{MessageCorpus, ToneProfile};

const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile id must not be empty")]
    EmptyId,
    #[error("no stored profile with id `{0}`")]
    NotFound(String),
    #[error("profile store {} is not a valid store document: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode profile store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("profile store I/O failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub id: String,
    /// SHA-256 hex of the newline-joined corpus the profile was generated from.
    pub corpus_digest: String,
    pub message_count: usize,
    pub last_updated: DateTime<Utc>,
    pub profile: ToneProfile,
}

impl StoredProfile {
    /// True when `corpus` is exactly the corpus this profile was built from.
    pub fn is_current(&self, corpus: &MessageCorpus) -> bool {
        self.message_count == corpus.len() && self.corpus_digest == corpus_digest(corpus)
    }
}

/// SHA-256 over each message's byte length followed by its bytes, so
/// message boundaries are part of the digest.
pub fn corpus_digest(corpus: &MessageCorpus) -> String {
    let mut hasher = Sha256::new();
    for message in corpus.messages() {
        hasher.update((message.len() as u64).to_le_bytes());
        hasher.update(message.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    profiles: Vec<StoredProfile>,
}

#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    records: BTreeMap<String, StoredProfile>,
}

impl ProfileStore {
    /// Open the store at `path`.  A missing file is an empty store; it is
    /// created on the first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut records = BTreeMap::new();

        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|err| StoreError::io(&path, err))?;
            let document: StoreDocument =
                serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                    path: path.clone(),
                    source,
                })?;
            if document.version != DOCUMENT_VERSION {
                warn!(
                    version = document.version,
                    expected = DOCUMENT_VERSION,
                    path = %path.display(),
                    "profile store has an unexpected version; reading it anyway"
                );
            }
            for record in document.profiles {
                if let Some(previous) = records.insert(record.id.clone(), record) {
                    warn!(id = %previous.id, path = %path.display(), "duplicate profile id in store; keeping the later record");
                }
            }
        }

        debug!(path = %path.display(), profiles = records.len(), "opened profile store");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert or replace the profile stored under `id` and persist the store.
    pub fn save(
        &mut self,
        id: &str,
        corpus: &MessageCorpus,
        profile: ToneProfile,
    ) -> Result<&StoredProfile, StoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(StoreError::EmptyId);
        }

        let record = StoredProfile {
            id: id.to_string(),
            corpus_digest: corpus_digest(corpus),
            message_count: corpus.len(),
            last_updated: Utc::now(),
            profile,
        };
        let previous = self.records.insert(id.to_string(), record);

        if let Err(err) = self.persist() {
            // Keep memory consistent with what is on disk.
            match previous {
                Some(previous) => self.records.insert(id.to_string(), previous),
                None => self.records.remove(id),
            };
            return Err(err);
        }

        self.load(id)
    }

    pub fn load(&self, id: &str) -> Result<&StoredProfile, StoreError> {
        self.records
            .get(id.trim())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Every stored profile, ordered by id.
    pub fn list(&self) -> impl Iterator<Item = &StoredProfile> {
        self.records.values()
    }

    pub fn remove(&mut self, id: &str) -> Result<StoredProfile, StoreError> {
        let id = id.trim();
        let removed = self
            .records
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Err(err) = self.persist() {
            self.records.insert(id.to_string(), removed);
            return Err(err);
        }
        Ok(removed)
    }

    /// Atomically replace the store file with the in-memory records.
    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }

        let document = StoreDocument {
            version: DOCUMENT_VERSION,
            profiles: self.records.values().cloned().collect(),
        };
        let rendered = serde_json::to_string_pretty(&document)?;

        let tmp_path = {
            let filename = self
                .path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "profiles.json".to_string());
            self.path.with_file_name(format!("{filename}.tmp"))
        };

        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(rendered.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()
        })();
        if let Err(err) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&tmp_path, err));
        }

        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&self.path, err));
        }

        debug!(path = %self.path.display(), profiles = self.records.len(), "persisted profile store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tone_analyzer::{ProfileGenerator, generate_profile};

    use super::*;

    fn corpus(messages: &[&str]) -> MessageCorpus {
        MessageCorpus::new(messages.iter().copied()).unwrap()
    }

    fn profile_for(corpus: &MessageCorpus) -> ToneProfile {
        ProfileGenerator::default().generate(corpus)
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::open(dir.path().join("profiles.json")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.list().count(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn save_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/profiles.json");
        let messages = corpus(&["Thanks so much!", "I think that works."]);

        let mut store = ProfileStore::open(&path).unwrap();
        let saved = store.save("alice", &messages, profile_for(&messages)).unwrap().clone();
        assert_eq!(saved.message_count, 2);
        assert!(path.exists());
        assert!(!path.with_file_name("profiles.json.tmp").exists());

        let reopened = ProfileStore::open(&path).unwrap();
        let loaded = reopened.load("alice").unwrap();
        assert_eq!(loaded, &saved);
        assert!(loaded.is_current(&messages));
    }

    #[test]
    fn save_replaces_existing_id() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(dir.path().join("p.json")).unwrap();
        let first = corpus(&["hello there"]);
        let second = corpus(&["lol idk", "brb"]);

        store.save("bob", &first, profile_for(&first)).unwrap();
        store.save("bob", &second, profile_for(&second)).unwrap();

        assert_eq!(store.len(), 1);
        let record = store.load("bob").unwrap();
        assert_eq!(record.message_count, 2);
        assert!(record.is_current(&second));
        assert!(!record.is_current(&first));
    }

    #[test]
    fn list_is_ordered_by_id() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(dir.path().join("p.json")).unwrap();
        let messages = corpus(&["ok"]);
        for id in ["carol", "alice", "bob"] {
            store.save(id, &messages, profile_for(&messages)).unwrap();
        }
        let ids: Vec<&str> = store.list().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn remove_deletes_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        let messages = corpus(&["ok"]);

        let mut store = ProfileStore::open(&path).unwrap();
        store.save("alice", &messages, profile_for(&messages)).unwrap();
        let removed = store.remove("alice").unwrap();
        assert_eq!(removed.id, "alice");
        assert!(matches!(store.remove("alice"), Err(StoreError::NotFound(_))));

        let reopened = ProfileStore::open(&path).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn empty_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(dir.path().join("p.json")).unwrap();
        let messages = corpus(&["ok"]);
        let err = store.save("  ", &messages, profile_for(&messages)).unwrap_err();
        assert!(matches!(err, StoreError::EmptyId));
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::open(dir.path().join("p.json")).unwrap();
        let err = store.load("nobody").unwrap_err();
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ProfileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("p.json"));
    }

    #[test]
    fn invalid_label_in_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        let mut profile = serde_json::to_value(ToneProfile::default()).unwrap();
        profile["politeness"] = serde_json::json!("unknown");
        let document = serde_json::json!({
            "version": 1,
            "profiles": [{
                "id": "x",
                "corpusDigest": "00",
                "messageCount": 1,
                "lastUpdated": "2026-01-01T00:00:00Z",
                "profile": profile,
            }]
        });
        fs::write(&path, document.to_string()).unwrap();
        assert!(matches!(ProfileStore::open(&path), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let a = corpus(&["one", "two"]);
        let b = corpus(&["one", "two"]);
        let c = corpus(&["one two"]);
        assert_eq!(corpus_digest(&a), corpus_digest(&b));
        assert_ne!(corpus_digest(&a), corpus_digest(&c));
        assert_eq!(corpus_digest(&a).len(), 64);
    }

    #[test]
    fn split_messages_are_not_current_for_joined_message() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(dir.path().join("p.json")).unwrap();
        let joined = corpus(&["lol ok\nlol sure"]);
        let split = corpus(&["lol ok", "lol sure"]);
        assert_ne!(corpus_digest(&joined), corpus_digest(&split));

        store.save("a", &joined, profile_for(&joined)).unwrap();
        let record = store.load("a").unwrap();
        assert_eq!(record.message_count, 1);
        assert!(record.is_current(&joined));
        assert!(!record.is_current(&split));
    }

    #[test]
    fn stored_profile_round_trips_generated_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        let generated = generate_profile(["Could you check the API docs? Thanks!"]).unwrap();
        let messages = corpus(&["Could you check the API docs? Thanks!"]);

        let mut store = ProfileStore::open(&path).unwrap();
        store.save("dev", &messages, generated.clone()).unwrap();
        let reopened = ProfileStore::open(&path).unwrap();
        assert_eq!(reopened.load("dev").unwrap().profile, generated);
    }
}
