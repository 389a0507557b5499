use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::resolution::source::{ResultSource, SourceError, SourceFuture, TrustTier};
use crate::types::identifiers::KeyDigest;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Opaque string key/value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under `root`, named by the key's SHA-256.
///
/// Each write goes to its own temp file in `root`, which is synced and then
/// renamed over the target, so readers never observe a half-written blob and
/// concurrent writers to one key leave exactly one of their values.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root`, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.json", KeyDigest::from_key(key).as_str()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Key point: one temp file per call; dropped (and removed) on any error.
        let mut temp = NamedTempFile::new_in(&self.root)?;
        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;

        temp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Persist a record as an opaque JSON blob.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(value)?;
    store.set(key, &text)
}

pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// A result payload kept under one storage key.
pub struct StoreSource<S> {
    name: String,
    tier: TrustTier,
    key: String,
    store: Arc<S>,
}

impl<S: KeyValueStore> StoreSource<S> {
    pub fn new(store: Arc<S>, key: impl Into<String>, tier: TrustTier) -> Self {
        let key = key.into();
        Self {
            name: format!("{}:{}", tier.as_str(), key),
            tier,
            key,
            store,
        }
    }
}

impl<S: KeyValueStore> ResultSource for StoreSource<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> TrustTier {
        self.tier
    }

    fn fetch(&self) -> SourceFuture<'_> {
        Box::pin(async move {
            let text = self
                .store
                .get(&self.key)?
                .ok_or_else(|| SourceError::Missing(self.key.clone()))?;
            Ok(serde_json::from_str(&text)?)
        })
    }
}
