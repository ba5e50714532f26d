use crate::log::record::Record;
use rand::Rng;
use thiserror::Error;

/// 记录存储相关错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("lock poisoned: {0}")]
    Lock(String),

    #[error("store error: {0}")]
    Other(String),
}

/// 持久化协作者
///
/// 接受三种记录中的任意一种，首次保存时分配 id
pub trait RecordStore: Send + Sync {
    fn save(&self, record: &mut Record) -> Result<(), StoreError>;
}

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 记录 id 的长度
pub const ID_LENGTH: usize = 15;

/// 生成随机的记录 id（小写字母与数字）
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// 为新记录分配 id，已有 id 时保持不变
pub fn assign_id(record: &mut Record) {
    let base = record.base_mut();
    if base.is_new() {
        base.id = generate_id();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::level::LogLevel;
    use crate::log::record::LogRecord;

    #[test]
    fn test_generate_id() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_assign_id_keeps_existing() {
        let mut record = Record::from(LogRecord::new(LogLevel::Info));
        assign_id(&mut record);
        let first = record.id().to_string();
        assert_eq!(first.len(), ID_LENGTH);

        assign_id(&mut record);
        assert_eq!(record.id(), first);
    }
}
