use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_DIR: &str = "bmicalc";

/// 配置文件结构 (~/.config/bmicalc/config.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 覆盖数据目录
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// 文件不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 数据目录路径 (~/.local/share/bmicalc/)，只计算路径，由存储负责创建
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_parse_overrides() {
        let config = Config::from_toml("data_dir = \"/tmp/bmi\"\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/bmi")));
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_data_dir_override_is_not_created() {
        let dir = std::env::temp_dir().join("bmicalc-config-never-created");
        let config = Config {
            data_dir: Some(dir.clone()),
            ..Config::default()
        };
        assert_eq!(config.data_dir(), Some(dir.clone()));
        assert!(!dir.exists());
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = Config::from_toml("log_level = \"loud\"").unwrap();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_malformed_file() {
        assert!(Config::from_toml("log_level = ").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("bmicalc-no-such-config.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
