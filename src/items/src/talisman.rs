//src/items/src/talisman.rs
use serde::{Deserialize, Serialize};

/// 装备后法术记忆栏从 10 格增加到 12 格的护符
pub const MOON_OF_NOKSTELLA: &str = "Moon of Nokstella";

/// 护符数据（不计重量，无属性需求）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talisman {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub effect: String,
}

impl Talisman {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            effect: String::new(),
        }
    }

    /// 是否扩展法术记忆栏
    pub fn extends_memory(&self) -> bool {
        self.name == MOON_OF_NOKSTELLA
    }

    /// 同一护符判断：有 id 时按 id，否则按名称
    pub fn same_as(&self, other: &Talisman) -> bool {
        if !self.id.is_empty() && !other.id.is_empty() {
            self.id == other.id
        } else {
            self.name == other.name
        }
    }
}
