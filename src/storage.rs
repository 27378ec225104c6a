use std::{
    collections::HashMap,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{constants::SNAPSHOT_KEY, domain::CatalogSnapshot};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: PathBuf) -> Self {
        FileKvStore { dir }
    }

    pub fn open_default() -> Self {
        FileKvStore::new(get_data_dir())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                eprintln!("Warning: Could not read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        atomic_write(&self.key_path(key), value)
    }
}

impl KvStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct SnapshotGateway<S: KvStore> {
    store: S,
    key: String,
}

impl<S: KvStore> SnapshotGateway<S> {
    pub fn new(store: S) -> Self {
        SnapshotGateway::with_key(store, SNAPSHOT_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        SnapshotGateway {
            store,
            key: key.to_string(),
        }
    }

    pub fn load(&mut self) -> CatalogSnapshot {
        let Some(raw) = self.store.get(&self.key) else {
            let snapshot = CatalogSnapshot::seeded();
            self.save(&snapshot);
            return snapshot;
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!(
                    "Warning: Could not parse saved packages, using defaults: {}",
                    e
                );
                CatalogSnapshot::seeded()
            }
        }
    }

    pub fn save(&mut self, snapshot: &CatalogSnapshot) {
        let json = match serde_json::to_string_pretty(snapshot) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Warning: Could not serialize packages: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &json) {
            eprintln!("Warning: Could not save packages: {}", e);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub fn get_data_dir() -> PathBuf {
    let local_snapshot = Path::new("./packages_v1.json");
    if local_snapshot.exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "darkroom", "darkroom") {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "darkroom", "darkroom") {
        if let Some(state_dir) = proj_dirs.state_dir() {
            let dir = state_dir.to_path_buf();
            fs::create_dir_all(&dir).ok();
            return dir;
        }
    }
    PathBuf::from(".")
}

pub fn get_auth_session_path() -> PathBuf {
    get_state_dir().join("auth_session.json")
}

pub fn file_exists(path: &Path) -> bool {
    path.exists()
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, &json)
}

pub fn delete_file_if_exists(path: &Path) -> Result<(), StorageError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| StorageError::io(path, e))?;
    }
    Ok(())
}

pub fn write_text_file(path: &Path, content: &str) -> Result<(), StorageError> {
    atomic_write(path, content)
}

pub fn create_backup(path: &Path) -> Result<(), StorageError> {
    if !path.exists() {
        return Ok(());
    }

    let backup_dir = path.parent().unwrap_or(Path::new(".")).join("backups");
    fs::create_dir_all(&backup_dir).map_err(|e| StorageError::io(&backup_dir, e))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        timestamp
    );
    let backup_path = backup_dir.join(&filename);
    fs::copy(path, &backup_path).map_err(|e| StorageError::io(&backup_path, e))?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    if let Ok(entries) = fs::read_dir(&backup_dir) {
        let mut backups: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&*stem))
            .collect();
        backups.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));

        while backups.len() > 10 {
            if let Some(oldest) = backups.first() {
                let _ = fs::remove_file(oldest.path());
                backups.remove(0);
            }
        }
    }

    Ok(())
}

pub fn atomic_write(path: &Path, content: &str) -> Result<(), StorageError> {
    if path.exists() {
        create_backup(path)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use serde::Deserialize;

    use super::*;
    use crate::domain::ItemId;

    fn unique_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}", prefix, now))
    }

    struct FailingStore;

    impl KvStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::io(
                Path::new(key),
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only store"),
            ))
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = unique_dir("darkroom_file_store");
        let mut store = FileKvStore::new(dir.clone());

        assert!(store.get("packages_v1").is_none());
        store.set("packages_v1", "{\"active\":[]}").unwrap();
        assert_eq!(store.get("packages_v1").unwrap(), "{\"active\":[]}");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_gateway_seeds_and_persists_when_absent() {
        let mut gateway = SnapshotGateway::new(HashMap::new());
        let snapshot = gateway.load();

        assert_eq!(snapshot, CatalogSnapshot::seeded());
        let raw = gateway.store().get(SNAPSHOT_KEY).expect("seed persisted");
        let reparsed: CatalogSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(reparsed, snapshot);
    }

    #[test]
    fn test_gateway_falls_back_on_malformed_without_persisting() {
        let mut store = HashMap::new();
        store
            .insert(SNAPSHOT_KEY.to_string(), "{not json".to_string());
        let mut gateway = SnapshotGateway::new(store);

        let snapshot = gateway.load();
        assert_eq!(snapshot, CatalogSnapshot::seeded());
        assert_eq!(gateway.store().get(SNAPSHOT_KEY).unwrap(), "{not json");
    }

    #[test]
    fn test_gateway_save_load_round_trip() {
        let mut gateway = SnapshotGateway::new(HashMap::new());
        let mut snapshot = gateway.load();

        snapshot.active[0].name = "Senior Packages".to_string();
        let moved = snapshot.active.remove(2);
        snapshot.archived.push(moved);
        gateway.save(&snapshot);

        assert_eq!(gateway.load(), snapshot);
    }

    #[test]
    fn test_gateway_absorbs_save_failure() {
        let mut gateway = SnapshotGateway::new(FailingStore);
        let snapshot = gateway.load();

        assert_eq!(snapshot, CatalogSnapshot::seeded());
        gateway.save(&snapshot);
    }

    #[test]
    fn test_gateway_ignores_unknown_snapshot_fields() {
        let mut store = HashMap::new();
        store.insert(
            SNAPSHOT_KEY.to_string(),
            r#"{"active":[{"id":"foo","name":"Foo","img":"images/foo.png"}],"legacy":true}"#
                .to_string(),
        );
        let mut gateway = SnapshotGateway::new(store);

        let snapshot = gateway.load();
        assert_eq!(snapshot.active.len(), 1);
        assert_eq!(snapshot.active[0].id, ItemId::new("foo"));
        assert!(snapshot.archived.is_empty());
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestJsonValue {
        name: String,
        count: usize,
    }

    #[test]
    fn test_json_helper_round_trip() {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = PathBuf::from(format!("/tmp/darkroom_json_roundtrip_{}.json", now));
        let value = TestJsonValue {
            name: "sample".to_string(),
            count: 3,
        };

        write_json_atomic(&path, &value).unwrap();
        let loaded: TestJsonValue = read_json(&path).unwrap();
        assert_eq!(loaded, value);

        delete_file_if_exists(&path).unwrap();
        assert!(!path.exists());
    }
}
