// src/save/src/store.rs
use anyhow::{Context, Result};
use error::PlannerError;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::record::BuildRecord;

/// 已保存配装列表（单个 JSON 数组文件）
pub struct BuildStore {
    path: PathBuf,
}

impl BuildStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取全部配装，文件不存在时为空列表
    pub fn list(&self) -> Result<Vec<BuildRecord>, PlannerError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "build store not found, starting empty");
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub fn get(&self, index: usize) -> Result<BuildRecord, PlannerError> {
        self.list()?
            .into_iter()
            .nth(index)
            .ok_or(PlannerError::InvalidBuildIndex(index))
    }

    /// 追加配装，返回其索引
    pub fn add(&self, record: BuildRecord) -> Result<usize, PlannerError> {
        let mut builds = self.list()?;
        builds.push(record);
        self.write(&builds)?;
        info!(index = builds.len() - 1, "build added");
        Ok(builds.len() - 1)
    }

    /// 替换指定索引的配装
    pub fn edit(&self, index: usize, record: BuildRecord) -> Result<(), PlannerError> {
        let mut builds = self.list()?;
        let slot = builds
            .get_mut(index)
            .ok_or(PlannerError::InvalidBuildIndex(index))?;
        *slot = record;
        self.write(&builds)?;
        info!(index, "build updated");
        Ok(())
    }

    /// 删除指定索引的配装，之后的索引前移
    pub fn remove(&self, index: usize) -> Result<BuildRecord, PlannerError> {
        let mut builds = self.list()?;
        if index >= builds.len() {
            return Err(PlannerError::InvalidBuildIndex(index));
        }
        let removed = builds.remove(index);
        self.write(&builds)?;
        info!(index, build = %removed.build_name, "build removed");
        Ok(removed)
    }

    fn write(&self, builds: &[BuildRecord]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context("Failed to create build store directory")?;
        }

        // 先写临时文件，再原子性重命名
        let temp_path = self.path.with_extension("tmp");
        let mut file =
            fs::File::create(&temp_path).context("Failed to create temporary build file")?;
        let json = serde_json::to_vec_pretty(builds).context("Failed to serialize builds")?;
        file.write_all(&json).context("Failed to write builds")?;
        file.flush().context("Failed to flush builds")?;

        fs::rename(&temp_path, &self.path).context("Failed to commit build store")?;
        Ok(())
    }
}
