//src/build/src/lib.rs
//! 配装会话
//!
//! 装备、护符、武器、法术和属性组成一个配装。所有修改都是纯函数：
//! 输入旧会话，返回新会话或结构化错误，旧会话保持不变。

mod loadout;
mod report;
mod requirements;
mod session;
mod slots;

use items::{ArmorSlot, Infusion};
use stats::Attribute;
use thiserror::Error;

pub use self::{
    loadout::{
        BASE_MEMORY_SLOTS, EXTENDED_MEMORY_SLOTS, EquipmentLoadout, EquippedWeapon, Selections,
        SlotRef, SpellLoadout, TALISMAN_SLOTS, TalismanLoadout, WEAPON_SLOTS, WeaponLoadout,
    },
    report::{SlotWarning, ValidationIssue, ValidationReport},
    requirements::{
        RequirementCheck, RequirementStatus, can_equip, check_requirements, requirement_warnings,
        unmet_requirements,
    },
    session::{BuildSession, SessionPhase},
    slots::{Run, SlotAllocator, SlotEntry, SlotError},
};

/// 配装修改被拒绝的原因
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Slot {index} is out of range ({len} slots)")]
    SlotOutOfRange { index: usize, len: usize },
    #[error("'{item}' cannot be worn in the {slot} slot")]
    WrongArmorSlot { item: String, slot: ArmorSlot },
    #[error("Talisman '{0}' is already equipped")]
    DuplicateTalisman(String),
    #[error("'{weapon}' cannot take the {infusion} infusion")]
    InfusionNotAllowed { weapon: String, infusion: Infusion },
    #[error("Requirements not met for '{item}' ({slot})")]
    RequirementNotMet {
        item: String,
        slot: SlotRef,
        unmet: Vec<(Attribute, u32)>,
    },
    #[error(transparent)]
    Slot(#[from] SlotError),
}
