mod core;
mod file_store;
mod memory_store;

pub use self::core::{assign_id, generate_id, RecordStore, StoreError, ID_LENGTH};
pub use file_store::{FileStore, FileStoreConfig};
pub use memory_store::MemoryStore;

use serde::Deserialize;
use std::sync::Arc;

/// 存储配置，形如 `{ type: "FileStore", options: { dir: "..." } }` 或 `{ type: "MemoryStore" }`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", content = "options")]
pub enum StoreConfig {
    MemoryStore,
    FileStore(FileStoreConfig),
}

impl StoreConfig {
    /// 按配置创建存储
    pub fn build(&self) -> Result<Arc<dyn RecordStore>, StoreError> {
        let store: Arc<dyn RecordStore> = match self {
            StoreConfig::MemoryStore => Arc::new(MemoryStore::new()),
            StoreConfig::FileStore(config) => Arc::new(FileStore::new(config.clone())?),
        };
        Ok(store)
    }
}
