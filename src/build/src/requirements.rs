//src/build/src/requirements.rs
use std::fmt;

use items::ItemTrait;
use serde::Serialize;
use stats::{Attribute, AttributeSet};

/// 单项属性需求的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequirementStatus {
    Met,
    /// 单手不足，双持可用（仅力量）
    TwoHanded,
    Unmet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementCheck {
    pub attribute: Attribute,
    pub required: u32,
    pub actual: u32,
    pub status: RequirementStatus,
}

impl fmt::Display for RequirementCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            RequirementStatus::Met => write!(f, "{} {} met", self.attribute, self.required),
            RequirementStatus::TwoHanded => write!(f, "You must two-hand this weapon"),
            RequirementStatus::Unmet => write!(f, "Need {} {}", self.attribute, self.required),
        }
    }
}

fn status_of(attribute: Attribute, required: u32, actual: u32) -> RequirementStatus {
    if actual >= required {
        RequirementStatus::Met
    } else if attribute == Attribute::Strength && actual * 2 >= required {
        // 双持时力量需求减半
        RequirementStatus::TwoHanded
    } else {
        RequirementStatus::Unmet
    }
}

/// 逐项判定物品的属性需求，无法识别的属性名跳过
pub fn check_requirements<I>(item: &I, attributes: &AttributeSet) -> Vec<RequirementCheck>
where
    I: ItemTrait + ?Sized,
{
    item.requirements()
        .iter()
        .filter_map(|req| {
            let attribute = req.attribute()?;
            let actual = attributes.get(attribute);
            Some(RequirementCheck {
                attribute,
                required: req.amount,
                actual,
                status: status_of(attribute, req.amount, actual),
            })
        })
        .collect()
}

/// 是否可以装备（力量允许双持门槛）
pub fn can_equip<I>(item: &I, attributes: &AttributeSet) -> bool
where
    I: ItemTrait + ?Sized,
{
    check_requirements(item, attributes)
        .iter()
        .all(|c| c.status != RequirementStatus::Unmet)
}

/// 连双持门槛都达不到的需求
pub fn unmet_requirements<I>(item: &I, attributes: &AttributeSet) -> Vec<(Attribute, u32)>
where
    I: ItemTrait + ?Sized,
{
    check_requirements(item, attributes)
        .into_iter()
        .filter(|c| c.status == RequirementStatus::Unmet)
        .map(|c| (c.attribute, c.required))
        .collect()
}

/// 界面提示：需要双持或属性不足的条目
pub fn requirement_warnings<I>(item: &I, attributes: &AttributeSet) -> Vec<RequirementCheck>
where
    I: ItemTrait + ?Sized,
{
    check_requirements(item, attributes)
        .into_iter()
        .filter(|c| c.status != RequirementStatus::Met)
        .collect()
}
