use crate::codec::{decode_or_default, encode};
use crate::errors::TrackerResult;
use crate::models::WeeklyState;
use crate::store::Persist;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};

/// Key the week is stored under.
pub const STORAGE_KEY: &str = "controlHorario";

/// String key-value items in a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.read_items().await.remove(key)
    }

    pub async fn set_item(&self, key: &str, value: String) -> TrackerResult<()> {
        let mut items = self.read_items().await;
        items.insert(key.to_string(), value);
        self.write_items(&items).await
    }

    pub async fn remove_item(&self, key: &str) -> TrackerResult<()> {
        let mut items = self.read_items().await;
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.write_items(&items).await
    }

    async fn read_items(&self) -> BTreeMap<String, String> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(items) => items,
                Err(err) => {
                    error!("failed to parse storage file {}: {err}", self.path.display());
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read storage file {}: {err}", self.path.display());
                BTreeMap::new()
            }
        }
    }

    async fn write_items(&self, items: &BTreeMap<String, String>) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let payload = serde_json::to_vec_pretty(items)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

pub async fn load_week(storage: &LocalStorage) -> WeeklyState {
    match storage.get_item(STORAGE_KEY).await {
        Some(text) => decode_or_default(&text),
        None => WeeklyState::default(),
    }
}

pub async fn sync(storage: &LocalStorage, persist: Persist, state: &WeeklyState) -> TrackerResult<()> {
    match persist {
        Persist::Nothing => {}
        Persist::Write => {
            storage.set_item(STORAGE_KEY, encode(state)?).await?;
            debug!("week saved to {}", storage.path().display());
        }
        Persist::Erase => {
            storage.remove_item(STORAGE_KEY).await?;
            debug!("week erased from {}", storage.path().display());
        }
    }
    Ok(())
}
