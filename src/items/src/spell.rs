//src/items/src/spell.rs
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::requirement::{self, Requirement};

/// 法术派系
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpellSchool {
    #[default]
    Sorcery,
    Incantation,
}

fn default_slots() -> u32 {
    1
}

/// 法术数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// 由所属目录决定，不读取原始数据中的 type 字段
    #[serde(rename = "type", skip_deserializing, default)]
    pub school: SpellSchool,
    /// 消耗专注值
    #[serde(default)]
    pub cost: u32,
    /// 占用记忆栏格数
    #[serde(default = "default_slots")]
    pub slots: u32,
    #[serde(default, deserialize_with = "requirement::lenient")]
    pub requires: Vec<Requirement>,
}

impl Spell {
    pub fn new(id: &str, name: &str, school: SpellSchool, slots: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            school,
            cost: 0,
            slots,
            requires: Vec::new(),
        }
    }

    pub fn with_requirements(mut self, requires: Vec<Requirement>) -> Self {
        self.requires = requires;
        self
    }

    /// 实际占用的格数，至少为 1
    pub fn memory_slots(&self) -> usize {
        self.slots.max(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_slot_spells_still_take_one_cell() {
        let spell = Spell::new("s0", "Odd Entry", SpellSchool::Sorcery, 0);
        assert_eq!(spell.memory_slots(), 1);
    }

    #[test]
    fn school_comes_from_catalog_not_data() {
        let spell: Spell = serde_json::from_str(
            r#"{"id":"s1","name":"Rock Sling","type":"Gravity","cost":18,"slots":2,
                "requires":[{"name":"Intelligence","amount":18},{"name":"Faith","amount":0}]}"#,
        )
        .unwrap();
        assert_eq!(spell.school, SpellSchool::Sorcery);
        assert_eq!(spell.memory_slots(), 2);
        assert_eq!(spell.requires.len(), 2);
    }
}
