//! Хранилище браузера (localStorage) как [`RecordStore`].

use contracts::shared::config::{self, DashboardConfig, StoreKeys};
use contracts::shared::error::StoreError;
use contracts::shared::record_store::RecordStore;
use contracts::shared::snapshot::StoreSnapshot;

/// Ключ localStorage с TOML-переопределением конфигурации
pub const CONFIG_STORAGE_KEY: &str = "dashboard-config";

pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// `None`, если localStorage недоступен (приватный режим, нет window)
    pub fn open() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .map(|storage| Self { storage })
    }
}

impl RecordStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.storage
            .set_item(key, &value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            log::warn!("Failed to remove `{}` from localStorage: {:?}", key, e);
        }
    }
}

/// Конфигурация по умолчанию, поверх которой наложено переопределение из localStorage
pub fn load_dashboard_config() -> DashboardConfig {
    let override_toml = LocalStorageStore::open().and_then(|s| s.get(CONFIG_STORAGE_KEY));
    match config::load_config(override_toml.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid `{}`, using defaults: {:#}", CONFIG_STORAGE_KEY, e);
            DashboardConfig::default()
        }
    }
}

pub fn load_snapshot(keys: &StoreKeys) -> StoreSnapshot {
    match LocalStorageStore::open() {
        Some(store) => StoreSnapshot::load(&store, keys),
        None => {
            log::warn!("localStorage is not available, showing empty lists");
            StoreSnapshot::default()
        }
    }
}

/// Хранилище для записи; без localStorage возвращает ошибку записи
pub fn open_for_write() -> Result<LocalStorageStore, StoreError> {
    LocalStorageStore::open().ok_or_else(|| StoreError::Write {
        key: "localStorage".to_string(),
        reason: "storage is not available".to_string(),
    })
}
