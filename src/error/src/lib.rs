//! 配装器错误处理模块
//!
//! 处理外部输入和存储过程中可能出现的错误，包括目录加载、JSON解析、IO等。
//! 配装本身的合法性问题（属性不足、槽位重叠等）不在这里，由 `build` crate 以结构化结果返回。

use std::path::PathBuf;

use thiserror::Error;

/// 配装器运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum PlannerError {
    /// 存储系统错误
    #[error("Build store error: {0}")]
    Store(#[from] anyhow::Error),

    /// IO操作错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析或序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 物品目录文件无法加载
    #[error("Failed to load catalog {file:?}: {reason}")]
    CatalogLoad { file: PathBuf, reason: String },

    /// 无效的配装索引
    #[error("Invalid build index: {0}")]
    InvalidBuildIndex(usize),

    /// 保存时缺少配装名称
    #[error("Build name is required")]
    MissingBuildName,

    /// 收藏武器不在当前武器栏中
    #[error("Favorite weapon is not equipped: {0}")]
    InvalidFavoriteWeapon(String),
}

impl PlannerError {
    pub fn catalog(file: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PlannerError::CatalogLoad {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

/// 处理错误并转换为用户友好的消息
pub fn handle_error(error: &PlannerError) -> String {
    match error {
        PlannerError::MissingBuildName => "Please enter a build name".to_string(),
        PlannerError::InvalidBuildIndex(i) => format!("Build #{} does not exist", i),
        PlannerError::InvalidFavoriteWeapon(name) => {
            format!("Favorite weapon '{}' is not equipped", name)
        }
        PlannerError::CatalogLoad { file, .. } => {
            format!("Cannot read item catalog: {}", file.display())
        }
        PlannerError::Json(e) if e.is_syntax() || e.is_eof() => "Saved build data is corrupted".to_string(),
        PlannerError::Io(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "Build file not found".to_string(),
            std::io::ErrorKind::PermissionDenied => "No permission to access the build file".to_string(),
            _ => format!("IO error: {}", e),
        },
        _ => error.to_string(),
    }
}
