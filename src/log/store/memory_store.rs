use crate::log::record::{ErrorRecord, LogRecord, Record, RecordKind, RequestRecord};
use crate::log::store::core::{assign_id, RecordStore, StoreError};
use indexmap::IndexMap;
use std::sync::RwLock;

/// 基于内存的记录存储
///
/// 每种记录一张表，按 id 索引并保持写入顺序。再次保存同一 id 会覆盖旧值。
#[derive(Default)]
pub struct MemoryStore {
    requests: RwLock<IndexMap<String, RequestRecord>>,
    errors: RwLock<IndexMap<String, ErrorRecord>>,
    logs: RwLock<IndexMap<String, LogRecord>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Lock(e.to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有请求记录，按写入顺序
    pub fn requests(&self) -> Result<Vec<RequestRecord>, StoreError> {
        Ok(self.requests.read().map_err(poisoned)?.values().cloned().collect())
    }

    /// 所有错误记录，按写入顺序
    pub fn errors(&self) -> Result<Vec<ErrorRecord>, StoreError> {
        Ok(self.errors.read().map_err(poisoned)?.values().cloned().collect())
    }

    /// 所有日志记录，按写入顺序
    pub fn logs(&self) -> Result<Vec<LogRecord>, StoreError> {
        Ok(self.logs.read().map_err(poisoned)?.values().cloned().collect())
    }

    /// 按 id 查找请求记录
    pub fn find_request(&self, id: &str) -> Result<Option<RequestRecord>, StoreError> {
        Ok(self.requests.read().map_err(poisoned)?.get(id).cloned())
    }

    /// 指定类型的记录条数
    pub fn count(&self, kind: RecordKind) -> Result<usize, StoreError> {
        let n = match kind {
            RecordKind::Request => self.requests.read().map_err(poisoned)?.len(),
            RecordKind::Error => self.errors.read().map_err(poisoned)?.len(),
            RecordKind::Log => self.logs.read().map_err(poisoned)?.len(),
        };
        Ok(n)
    }
}

impl RecordStore for MemoryStore {
    fn save(&self, record: &mut Record) -> Result<(), StoreError> {
        assign_id(record);
        let id = record.id().to_string();

        match record {
            Record::Request(r) => {
                self.requests.write().map_err(poisoned)?.insert(id, r.clone());
            }
            Record::Error(r) => {
                self.errors.write().map_err(poisoned)?.insert(id, r.clone());
            }
            Record::Log(r) => {
                self.logs.write().map_err(poisoned)?.insert(id, r.clone());
            }
        }
        Ok(())
    }
}
