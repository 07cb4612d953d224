//src/items/src/weapon.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

use crate::requirement::{self, Requirement};

/// 武器质变（Standard 表示未质变）
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Infusion {
    #[default]
    Standard,
    Heavy,
    Keen,
    Quality,
    Fire,
    #[strum(to_string = "Flame Art", serialize = "FlameArt")]
    #[serde(rename = "Flame Art")]
    FlameArt,
    Lightning,
    Sacred,
    Magic,
    Cold,
    Poison,
    Blood,
    Occult,
}

impl Infusion {
    pub fn is_standard(self) -> bool {
        self == Infusion::Standard
    }

    /// 解析记录中的质变名称：空值或 "Standard" 为未质变，无法识别时返回 None
    pub fn from_record(value: Option<&str>) -> Option<Infusion> {
        match value.map(str::trim) {
            None | Some("") => Some(Infusion::Standard),
            Some(name) => name.parse().ok(),
        }
    }

    /// 写入记录时的表示，未质变写 null
    pub fn to_record(self) -> Option<String> {
        if self.is_standard() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

fn default_infusible() -> bool {
    true
}

/// 武器数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(
        rename = "requiredAttributes",
        default,
        deserialize_with = "requirement::lenient"
    )]
    pub required_attributes: Vec<Requirement>,
    /// 目录未标注时视为可质变
    #[serde(default = "default_infusible")]
    pub infusible: bool,
}

impl Weapon {
    pub fn new(id: &str, name: &str, weight: f64, required_attributes: Vec<Requirement>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: String::new(),
            weight,
            required_attributes,
            infusible: true,
        }
    }

    /// 不可质变的武器（例如特殊武器）
    pub fn unique(mut self) -> Self {
        self.infusible = false;
        self
    }

    pub fn accepts(&self, infusion: Infusion) -> bool {
        infusion.is_standard() || self.infusible
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn thirteen_infusions_including_standard() {
        assert_eq!(Infusion::iter().count(), 13);
        assert_eq!(Infusion::default(), Infusion::Standard);
    }

    #[test]
    fn record_names_round_trip() {
        assert_eq!(Infusion::from_record(None), Some(Infusion::Standard));
        assert_eq!(Infusion::from_record(Some("")), Some(Infusion::Standard));
        assert_eq!(Infusion::from_record(Some("Standard")), Some(Infusion::Standard));
        assert_eq!(Infusion::from_record(Some("Keen")), Some(Infusion::Keen));
        assert_eq!(Infusion::from_record(Some("Flame Art")), Some(Infusion::FlameArt));
        assert_eq!(Infusion::from_record(Some("Frost")), None);

        assert_eq!(Infusion::Standard.to_record(), None);
        assert_eq!(Infusion::FlameArt.to_record().as_deref(), Some("Flame Art"));
    }

    #[test]
    fn parses_catalog_weapon() {
        let weapon: Weapon = serde_json::from_str(
            r#"{"id":"w1","name":"Moonveil","category":"Katana","weight":6.5,
                "requiredAttributes":[{"name":"Str","amount":12},{"name":"Dex","amount":18},{"name":"Int","amount":23}]}"#,
        )
        .unwrap();
        assert_eq!(weapon.required_attributes.len(), 3);
        assert!(weapon.infusible);
        assert!(weapon.accepts(Infusion::Keen));
    }

    #[test]
    fn unique_weapons_only_take_standard() {
        let weapon = Weapon::new("w2", "Sword of Night and Flame", 4.5, vec![]).unique();
        assert!(weapon.accepts(Infusion::Standard));
        assert!(!weapon.accepts(Infusion::Heavy));
    }
}
