//! 持久化管理
//!
//! 两个独立的键值槽：`bmi_last`（JSON 记录）与 `theme`（纯字符串）

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::models::{ResultRecord, Theme};

pub const RESULT_KEY: &str = "bmi_last";
pub const THEME_KEY: &str = "theme";

/// 字符串键值存储
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// 目录存储：每个键一个文件
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // 先写临时文件再改名，避免写一半
        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// 内存存储，数据目录不可用时的退路，也用于测试
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有写操作都失败（模拟配额耗尽）
    #[cfg(test)]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[cfg(test)]
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable("store is read-only".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable("store is read-only".to_string()));
        }
        self.items.remove(key);
        Ok(())
    }
}

/// 打开数据目录存储；没有数据目录或无法创建时返回错误
pub fn open_store(dir: Option<&Path>) -> Result<FileStore, StorageError> {
    let dir = dir.ok_or_else(|| StorageError::Unavailable("no user data directory".to_string()))?;
    FileStore::new(dir)
}

/// 文件存储不可用时退回内存存储，结果仍可显示，只是不会保存
pub fn store_or_memory(opened: Result<FileStore, StorageError>) -> Box<dyn KeyValueStore> {
    match opened {
        Ok(store) => {
            tracing::info!(dir = %store.dir().display(), "using file store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "storage unavailable, results will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// 由终端的 `COLORFGBG`（如 "15;0"）推断系统配色
pub fn system_theme(colorfgbg: Option<&str>) -> Option<Theme> {
    let bg = colorfgbg?.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    match bg {
        0..=6 | 8 => Some(Theme::Dark),
        _ => Some(Theme::Light),
    }
}

/// 持久化管理器
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
    system_theme: Option<Theme>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>, system_theme: Option<Theme>) -> Self {
        Self {
            store,
            system_theme,
        }
    }

    /// 保存记录；失败返回给调用方记录警告
    pub fn save_result(&mut self, record: &ResultRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)?;
        self.store.set(RESULT_KEY, &json)
    }

    /// 读取记录；缺失或损坏均视为没有
    pub fn load_result(&self) -> Option<ResultRecord> {
        let raw = match self.store.get(RESULT_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                tracing::error!(error = %e, "failed to read saved result");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!(error = %e, "failed to parse saved data");
                None
            }
        }
    }

    pub fn clear_result(&mut self) -> Result<(), StorageError> {
        self.store.remove(RESULT_KEY)
    }

    /// 尽力保存，失败忽略
    pub fn save_theme(&mut self, theme: Theme) {
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            tracing::debug!(error = %e, "theme not saved");
        }
    }

    /// 已保存的合法值 > 系统偏好 > 亮色
    pub fn load_theme(&self) -> Theme {
        if let Ok(Some(value)) = self.store.get(THEME_KEY) {
            if let Some(theme) = Theme::parse(value.trim()) {
                return theme;
            }
        }
        self.system_theme.unwrap_or(Theme::Light)
    }
}
