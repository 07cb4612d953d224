//src/items/src/armor.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter};

use crate::requirement::{self, Requirement};

/// 护甲部位（目录中的 category 字段）
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum ArmorSlot {
    #[serde(rename = "Helm", alias = "HEAD", alias = "Head")]
    #[strum(serialize = "HEAD")]
    Head,
    #[serde(rename = "Chest Armor", alias = "CHEST", alias = "Chest")]
    #[strum(serialize = "CHEST")]
    Chest,
    #[serde(rename = "Gauntlets", alias = "HANDS", alias = "Hands")]
    #[strum(serialize = "HANDS")]
    Hands,
    #[serde(rename = "Leg Armor", alias = "LEGS", alias = "Legs")]
    #[strum(serialize = "LEGS")]
    Legs,
}

impl ArmorSlot {
    /// 配装记录中 equipment 的键名
    pub fn record_key(self) -> &'static str {
        match self {
            ArmorSlot::Head => "head",
            ArmorSlot::Chest => "chest",
            ArmorSlot::Hands => "hands",
            ArmorSlot::Legs => "legs",
        }
    }

    /// 目录中的分类名
    pub fn category_name(self) -> &'static str {
        match self {
            ArmorSlot::Head => "Helm",
            ArmorSlot::Chest => "Chest Armor",
            ArmorSlot::Hands => "Gauntlets",
            ArmorSlot::Legs => "Leg Armor",
        }
    }
}

/// 护甲数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub category: ArmorSlot,
    #[serde(default)]
    pub weight: f64,
    #[serde(default, deserialize_with = "requirement::lenient")]
    pub requires: Vec<Requirement>,
}

impl Armor {
    pub fn new(id: &str, name: &str, slot: ArmorSlot, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: slot,
            weight,
            requires: Vec::new(),
        }
    }

    pub fn slot(&self) -> ArmorSlot {
        self.category
    }
}

impl fmt::Display for Armor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1})", self.name, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_categories() {
        let armor: Armor = serde_json::from_str(
            r#"{"id":"a1","name":"Champion's Helm","category":"Helm","weight":4.2,"dmgNegation":[]}"#,
        )
        .unwrap();
        assert_eq!(armor.slot(), ArmorSlot::Head);
        assert_eq!(armor.weight, 4.2);
        assert!(armor.requires.is_empty());

        let legs: Armor =
            serde_json::from_str(r#"{"name":"Greaves","category":"Leg Armor"}"#).unwrap();
        assert_eq!(legs.slot(), ArmorSlot::Legs);
        assert_eq!(legs.weight, 0.0);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = serde_json::from_str::<Armor>(r#"{"name":"Cape","category":"Cloak"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn slot_names() {
        assert_eq!(ArmorSlot::Hands.to_string(), "HANDS");
        assert_eq!(ArmorSlot::Hands.record_key(), "hands");
        assert_eq!(ArmorSlot::Chest.category_name(), "Chest Armor");
    }
}
