// src/stats/src/derived.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

use crate::attribute::{Attribute, AttributeSet, MAX_LEVEL, MIN_LEVEL};
use crate::tables::{EQUIP_LOAD_TABLE, FP_TABLE, HP_TABLE, STAMINA_TABLE};

// 浮点误差容忍，29.9% 这类边界值必须落在较轻的一档
const RATIO_EPSILON: f64 = 1e-9;

fn table_index(level: i32) -> usize {
    (level.clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) - 1) as usize
}

/// 生命值（生命力）
pub fn hp(vigor: i32) -> u32 {
    HP_TABLE[table_index(vigor)]
}

/// 专注值（精神力）
pub fn fp(mind: i32) -> u32 {
    FP_TABLE[table_index(mind)]
}

/// 耐力（耐力属性）
pub fn stamina(endurance: i32) -> u32 {
    STAMINA_TABLE[table_index(endurance)]
}

/// 最大装备重量（耐力属性）
pub fn max_equip_load(endurance: i32) -> f64 {
    EQUIP_LOAD_TABLE[table_index(endurance)]
}

/// 负重状态
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    #[strum(to_string = "Light Load")]
    Light,
    #[strum(to_string = "Med. Load")]
    Medium,
    #[strum(to_string = "Heavy Load")]
    Heavy,
    #[strum(to_string = "Overloaded")]
    Overloaded,
}

/// 动作帧数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameWindow {
    pub frames: u32,
    pub millis: u32,
}

impl FrameWindow {
    const fn new(frames: u32, millis: u32) -> Self {
        Self { frames, millis }
    }
}

impl fmt::Display for FrameWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} frames ({}ms)", self.frames, self.millis)
    }
}

/// 负重等级及对应的翻滚/硬直特性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadTier {
    pub status: LoadStatus,
    /// 翻滚无敌帧，超重时无法翻滚
    pub roll: Option<FrameWindow>,
    /// 翻滚后硬直
    pub recovery: Option<FrameWindow>,
    pub notes: &'static str,
}

impl LoadTier {
    const LIGHT: LoadTier = LoadTier {
        status: LoadStatus::Light,
        roll: Some(FrameWindow::new(13, 433)),
        recovery: Some(FrameWindow::new(8, 233)),
        notes: "Further roll distance and quicker backstep recovery than Medium Load.",
    };

    const MEDIUM: LoadTier = LoadTier {
        status: LoadStatus::Medium,
        roll: Some(FrameWindow::new(13, 433)),
        recovery: Some(FrameWindow::new(8, 233)),
        notes: "Same iframes and recoveries as Light Load.",
    };

    const HEAVY: LoadTier = LoadTier {
        status: LoadStatus::Heavy,
        roll: Some(FrameWindow::new(12, 400)),
        recovery: Some(FrameWindow::new(16, 533)),
        notes: "Shorter roll distance, longer recovery, -20% stamina regen.",
    };

    const OVERLOADED: LoadTier = LoadTier {
        status: LoadStatus::Overloaded,
        roll: None,
        recovery: None,
        notes: "Unable to roll or backstep. Movement is slow.",
    };

    pub fn can_roll(&self) -> bool {
        self.roll.is_some()
    }
}

/// 根据当前重量与最大负重的百分比划分负重等级
///
/// 分界为 29.9 / 69.9 / 99.9（含），恰好 30.0% 属于中等负重，恰好 100% 属于超重。
pub fn load_tier(current_weight: f64, max_load: f64) -> LoadTier {
    if max_load <= 0.0 {
        return if current_weight <= 0.0 {
            LoadTier::LIGHT
        } else {
            LoadTier::OVERLOADED
        };
    }

    let ratio = current_weight / max_load * 100.0;
    if ratio <= 29.9 + RATIO_EPSILON {
        LoadTier::LIGHT
    } else if ratio <= 69.9 + RATIO_EPSILON {
        LoadTier::MEDIUM
    } else if ratio <= 99.9 + RATIO_EPSILON {
        LoadTier::HEAVY
    } else {
        LoadTier::OVERLOADED
    }
}

/// 界面展示的全部派生数值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStats {
    pub level: i32,
    pub hp: u32,
    pub fp: u32,
    pub stamina: u32,
    /// 最大负重取整后的值，负重比例按此计算
    pub max_load: f64,
    pub current_load: f64,
    pub load: LoadTier,
}

impl DerivedStats {
    pub fn compute(attributes: &AttributeSet, equipment_weight: f64) -> Self {
        let level_of = |a: Attribute| attributes.get(a) as i32;
        let max_load = max_equip_load(level_of(Attribute::Endurance)).floor();

        Self {
            level: attributes.character_level(),
            hp: hp(level_of(Attribute::Vigor)),
            fp: fp(level_of(Attribute::Mind)),
            stamina: stamina(level_of(Attribute::Endurance)),
            max_load,
            current_load: equipment_weight,
            load: load_tier(equipment_weight, max_load),
        }
    }
}
