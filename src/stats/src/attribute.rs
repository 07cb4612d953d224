// src/stats/src/attribute.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 99;

/// 八项属性在 1 级时合计为 80，角色等级 = 属性总和 - 79
pub const LEVEL_OFFSET: i32 = 79;

/// 角色属性（顺序与配装记录中的 stats 字段一致）
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Attribute {
    #[strum(to_string = "VIG", serialize = "Vigor")]
    Vigor,
    #[strum(to_string = "MIND")]
    Mind,
    #[strum(to_string = "END", serialize = "Endurance")]
    Endurance,
    #[strum(to_string = "STR", serialize = "Strength")]
    Strength,
    #[strum(to_string = "DEX", serialize = "Dexterity")]
    Dexterity,
    #[strum(to_string = "INT", serialize = "Intelligence")]
    Intelligence,
    #[strum(to_string = "FAI", serialize = "Faith")]
    Faith,
    #[strum(to_string = "ARC", serialize = "Arcane")]
    Arcane,
}

impl Attribute {
    fn index(self) -> usize {
        self as usize
    }

    /// 完整名称（用于界面显示）
    pub fn full_name(self) -> &'static str {
        match self {
            Attribute::Vigor => "Vigor",
            Attribute::Mind => "Mind",
            Attribute::Endurance => "Endurance",
            Attribute::Strength => "Strength",
            Attribute::Dexterity => "Dexterity",
            Attribute::Intelligence => "Intelligence",
            Attribute::Faith => "Faith",
            Attribute::Arcane => "Arcane",
        }
    }
}

/// 属性组（每项等级限制在 1-99）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeSet {
    levels: [u32; 8],
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeSet {
    /// 默认属性：全部 10 级（角色等级 1）
    pub fn new() -> Self {
        Self { levels: [10; 8] }
    }

    /// 所有属性为同一等级
    pub fn uniform(level: i32) -> Self {
        Self {
            levels: [clamp_level(level); 8],
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        self.levels[attribute.index()]
    }

    /// 设置属性等级（超出范围时截断到边界）
    pub fn set(&mut self, attribute: Attribute, level: i32) {
        self.levels[attribute.index()] = clamp_level(level);
    }

    /// 增减属性等级
    pub fn adjust(&mut self, attribute: Attribute, delta: i32) {
        let current = self.get(attribute) as i32;
        self.set(attribute, current.saturating_add(delta));
    }

    /// 链式设置，便于构造固定属性组
    pub fn with(mut self, attribute: Attribute, level: i32) -> Self {
        self.set(attribute, level);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u32)> + '_ {
        Attribute::iter().map(|a| (a, self.get(a)))
    }

    pub fn total(&self) -> u32 {
        self.levels.iter().sum()
    }

    /// 角色等级
    pub fn character_level(&self) -> i32 {
        self.total() as i32 - LEVEL_OFFSET
    }
}

fn clamp_level(level: i32) -> u32 {
    level.clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) as u32
}
