// src/stats/src/lib.rs
//! 角色属性与派生数值
//!
//! 属性等级（1-99）经查表得到生命、专注、耐力和最大负重，
//! 再结合当前装备重量得到负重等级。全部为纯函数，不保存派生状态。

mod attribute;
mod derived;
mod tables;

pub use crate::attribute::{Attribute, AttributeSet, LEVEL_OFFSET, MAX_LEVEL, MIN_LEVEL};
pub use crate::derived::{
    DerivedStats, FrameWindow, LoadStatus, LoadTier, fp, hp, load_tier, max_equip_load, stamina,
};
