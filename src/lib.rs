//src/lib.rs
//! Elden Ring 配装规划器
//!
//! 各子 crate 负责领域逻辑，这里只提供配置加载和结果展示。

pub mod config;
pub mod report;

pub use build;
pub use error;
pub use items;
pub use save;
pub use stats;

pub use crate::config::{CONFIG_ENV, PlannerConfig};
pub use crate::report::{BuildSummary, summarize, unresolved_names};
