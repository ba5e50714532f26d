use crate::log::record::{Record, RecordKind};
use crate::log::store::core::{assign_id, RecordStore, StoreError};
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// FileStore 配置
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FileStoreConfig {
    /// 存放各表文件的目录
    pub dir: String,
}

/// 基于 JSON Lines 文件的记录存储
///
/// 每张表一个文件（`_requests.jsonl` 等），每次保存追加一行
pub struct FileStore {
    dir: PathBuf,
    requests: Mutex<File>,
    errors: Mutex<File>,
    logs: Mutex<File>,
}

fn open_table(dir: &Path, kind: RecordKind) -> Result<File, StoreError> {
    let path = dir.join(format!("{}.jsonl", kind.table_name()));
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

impl FileStore {
    pub fn new(config: FileStoreConfig) -> Result<Self, StoreError> {
        let dir = PathBuf::from(&config.dir);
        std::fs::create_dir_all(&dir)?;

        Ok(Self {
            requests: Mutex::new(open_table(&dir, RecordKind::Request)?),
            errors: Mutex::new(open_table(&dir, RecordKind::Error)?),
            logs: Mutex::new(open_table(&dir, RecordKind::Log)?),
            dir,
        })
    }

    /// 指定表对应的文件路径
    pub fn table_path(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{}.jsonl", kind.table_name()))
    }

    fn table(&self, kind: RecordKind) -> &Mutex<File> {
        match kind {
            RecordKind::Request => &self.requests,
            RecordKind::Error => &self.errors,
            RecordKind::Log => &self.logs,
        }
    }
}

impl RecordStore for FileStore {
    fn save(&self, record: &mut Record) -> Result<(), StoreError> {
        assign_id(record);

        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut file = self
            .table(record.kind())
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        file.write_all(&line)?;
        file.flush()?;
        Ok(())
    }
}
