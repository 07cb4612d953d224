//src/items/src/lib.rs
//! 物品数据：护甲、武器、护符、法术，以及按名称查找物品的目录

use serde::{Deserialize, Serialize};

pub use crate::armor::{Armor, ArmorSlot};
pub use crate::catalog::{Catalog, CatalogFile, CatalogFiles, Catalogs, resolve};
pub use crate::requirement::Requirement;
pub use crate::spell::{Spell, SpellSchool};
pub use crate::talisman::{MOON_OF_NOKSTELLA, Talisman};
pub use crate::weapon::{Infusion, Weapon};

pub mod armor;
pub mod catalog;
pub mod requirement;
pub mod spell;
pub mod talisman;
pub mod weapon;

/// 物品特性约束
pub trait ItemTrait {
    /// 目录中的唯一标识
    fn id(&self) -> &str;

    /// 显示名称，同时也是配装记录中的外键
    fn name(&self) -> &str;

    /// 重量（只有护甲和武器计入负重）
    fn weight(&self) -> f64 {
        0.0
    }

    /// 属性需求列表
    fn requirements(&self) -> &[Requirement] {
        &[]
    }

    /// 物品分类
    fn category(&self) -> ItemCategory;
}

/// 物品分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum ItemCategory {
    Armor,
    Weapon,
    Talisman,
    Sorcery,
    Incantation,
}

impl ItemTrait for Armor {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn weight(&self) -> f64 {
        self.weight
    }
    fn requirements(&self) -> &[Requirement] {
        &self.requires
    }
    fn category(&self) -> ItemCategory {
        ItemCategory::Armor
    }
}

impl ItemTrait for Weapon {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn weight(&self) -> f64 {
        self.weight
    }
    fn requirements(&self) -> &[Requirement] {
        &self.required_attributes
    }
    fn category(&self) -> ItemCategory {
        ItemCategory::Weapon
    }
}

impl ItemTrait for Talisman {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn category(&self) -> ItemCategory {
        ItemCategory::Talisman
    }
}

impl ItemTrait for Spell {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn requirements(&self) -> &[Requirement] {
        &self.requires
    }
    fn category(&self) -> ItemCategory {
        match self.school {
            SpellSchool::Sorcery => ItemCategory::Sorcery,
            SpellSchool::Incantation => ItemCategory::Incantation,
        }
    }
}

/// 任意物品（目录浏览和统一展示时使用）
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Armor(Armor),
    Weapon(Weapon),
    Talisman(Talisman),
    Spell(Spell),
}

impl Item {
    fn inner(&self) -> &dyn ItemTrait {
        match self {
            Item::Armor(armor) => armor,
            Item::Weapon(weapon) => weapon,
            Item::Talisman(talisman) => talisman,
            Item::Spell(spell) => spell,
        }
    }
}

impl ItemTrait for Item {
    fn id(&self) -> &str {
        self.inner().id()
    }
    fn name(&self) -> &str {
        self.inner().name()
    }
    fn weight(&self) -> f64 {
        self.inner().weight()
    }
    fn requirements(&self) -> &[Requirement] {
        self.inner().requirements()
    }
    fn category(&self) -> ItemCategory {
        self.inner().category()
    }
}

impl From<Armor> for Item {
    fn from(armor: Armor) -> Self {
        Item::Armor(armor)
    }
}

impl From<Weapon> for Item {
    fn from(weapon: Weapon) -> Self {
        Item::Weapon(weapon)
    }
}

impl From<Talisman> for Item {
    fn from(talisman: Talisman) -> Self {
        Item::Talisman(talisman)
    }
}

impl From<Spell> for Item {
    fn from(spell: Spell) -> Self {
        Item::Spell(spell)
    }
}
