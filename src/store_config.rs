//! Configuration for opening a [`ComplaintStore`](crate::complaint_store::ComplaintStore).

use std::path::PathBuf;

/// Key of the single storage slot holding the serialized complaint list.
pub const DEFAULT_STORAGE_KEY: &str = "complaints";

/// Named LMDB database inside the environment.
pub const DATABASE_NAME: &str = "complaint_store";

/// 64 MiB. Photos are stored inline as data URLs, so the map needs headroom.
pub const DEFAULT_MAP_SIZE: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base path of the environment; the directory `<name>.lmdb` is created.
    pub name: String,
    pub storage_key: String,
    pub map_size: usize,
}

impl StoreConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            map_size: DEFAULT_MAP_SIZE,
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn env_dir(&self) -> PathBuf {
        PathBuf::from(format!("{}.lmdb", self.name))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("complaints")
    }
}
