//src/config.rs
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use error::PlannerError;
use items::{CatalogFiles, Catalogs};
use save::BuildStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 未指定 `--config` 时读取的环境变量
pub const CONFIG_ENV: &str = "PLANNER_CONFIG";

/// 配装器配置（TOML）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 物品目录 JSON 所在文件夹
    pub catalog_dir: PathBuf,
    pub catalog_files: CatalogFiles,
    /// 已保存配装列表
    pub store_path: PathBuf,
    /// 未设置 RUST_LOG 时使用的日志过滤
    pub log_filter: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("data"),
            catalog_files: CatalogFiles::default(),
            store_path: PathBuf::from("saved_builds.json"),
            log_filter: "elden_planner=info,save=info,items=info".to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// 按 `path`、环境变量的顺序查找配置文件，文件不存在时使用默认值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match env::var_os(CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn store(&self) -> BuildStore {
        BuildStore::new(&self.store_path)
    }

    pub fn catalogs(&self) -> Result<Catalogs, PlannerError> {
        Catalogs::load_dir(&self.catalog_dir, &self.catalog_files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PlannerConfig::from_toml(
            r#"
            store_path = "builds/mine.json"

            [catalog_files.weapons]
            base = "weapons_v2.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.store_path, PathBuf::from("builds/mine.json"));
        assert_eq!(config.catalog_dir, PathBuf::from("data"));
        assert_eq!(config.catalog_files.weapons.base, "weapons_v2.json");
        assert_eq!(config.catalog_files.weapons.dlc, None);
        assert_eq!(config.catalog_files.armors, CatalogFiles::default().armors);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempdir().unwrap();
        let config = PlannerConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        fs::write(&path, "store_path = [").unwrap();
        assert!(PlannerConfig::load(Some(&path)).is_err());
    }
}
