// src/save/src/lib.rs
//! 配装记录的序列化与存储

mod convert;
mod metadata;
mod record;
mod store;

use build::{BuildSession, ValidationReport};
use error::PlannerError;
use thiserror::Error;
use tracing::info;

pub use crate::convert::{RestoredBuild, from_record, to_record, to_record_at};
pub use crate::metadata::BuildMetadata;
pub use crate::record::{
    BuildRecord, BuildType, EquipmentRecord, RECORD_SPELL_SLOTS, RECORD_TALISMAN_SLOTS,
    RECORD_WEAPON_SLOTS, SlotMap, StatsRecord, WeaponRecord,
};
pub use crate::store::BuildStore;

/// 保存失败的原因
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("Build has {} blocking issue(s)", .0.issues.len())]
    Invalid(ValidationReport),
}

/// 校验会话并生成记录，会话进入 Saved 状态
pub fn save_session(
    session: &BuildSession,
    metadata: &BuildMetadata,
) -> Result<(BuildSession, BuildRecord), SaveError> {
    metadata.validate(session.selections())?;
    let validated = session.validated().map_err(SaveError::Invalid)?;
    let record = to_record(validated.selections(), metadata);
    info!(build = %record.build_name, level = record.level(), "build saved");
    Ok((validated.mark_saved(), record))
}
