// src/build/src/loadout.rs
use std::fmt;

use items::{Armor, ArmorSlot, Infusion, ItemTrait, Spell, Talisman, Weapon};
use stats::AttributeSet;
use strum::IntoEnumIterator;

use crate::{BuildError, slots::SlotAllocator};

pub const TALISMAN_SLOTS: usize = 4;
pub const WEAPON_SLOTS: usize = 6;
pub const BASE_MEMORY_SLOTS: usize = 10;
/// 装备 Moon of Nokstella 后的记忆栏格数
pub const EXTENDED_MEMORY_SLOTS: usize = 12;

/// 法术记忆栏
pub type SpellLoadout = SlotAllocator<Spell>;

/// 配装中的一个位置（显示时从 1 开始计数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRef {
    Armor(ArmorSlot),
    Talisman(usize),
    Weapon(usize),
    Spell(usize),
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRef::Armor(slot) => write!(f, "{slot}"),
            SlotRef::Talisman(i) => write!(f, "talisman slot {}", i.saturating_add(1)),
            SlotRef::Weapon(i) => write!(f, "weapon slot {}", i.saturating_add(1)),
            SlotRef::Spell(i) => write!(f, "spell slot {}", i.saturating_add(1)),
        }
    }
}

fn check_index(index: usize, len: usize) -> Result<(), BuildError> {
    if index < len {
        Ok(())
    } else {
        Err(BuildError::SlotOutOfRange { index, len })
    }
}

/// 四个护甲部位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentLoadout {
    head: Option<Armor>,
    chest: Option<Armor>,
    hands: Option<Armor>,
    legs: Option<Armor>,
}

impl EquipmentLoadout {
    pub fn get(&self, slot: ArmorSlot) -> Option<&Armor> {
        match slot {
            ArmorSlot::Head => self.head.as_ref(),
            ArmorSlot::Chest => self.chest.as_ref(),
            ArmorSlot::Hands => self.hands.as_ref(),
            ArmorSlot::Legs => self.legs.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: ArmorSlot) -> &mut Option<Armor> {
        match slot {
            ArmorSlot::Head => &mut self.head,
            ArmorSlot::Chest => &mut self.chest,
            ArmorSlot::Hands => &mut self.hands,
            ArmorSlot::Legs => &mut self.legs,
        }
    }

    /// 装备到指定部位，部位与护甲分类必须一致；返回替换下来的护甲
    pub fn set(&mut self, slot: ArmorSlot, armor: Option<Armor>) -> Result<Option<Armor>, BuildError> {
        if let Some(armor) = &armor {
            if armor.slot() != slot {
                return Err(BuildError::WrongArmorSlot {
                    item: armor.name.clone(),
                    slot,
                });
            }
        }
        Ok(std::mem::replace(self.slot_mut(slot), armor))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArmorSlot, Option<&Armor>)> + '_ {
        ArmorSlot::iter().map(|slot| (slot, self.get(slot)))
    }

    pub fn weight(&self) -> f64 {
        self.iter().filter_map(|(_, a)| a).map(|a| a.weight).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, a)| a.is_none())
    }
}

/// 四个护符栏，同一护符不能重复装备
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TalismanLoadout {
    slots: [Option<Talisman>; TALISMAN_SLOTS],
}

impl TalismanLoadout {
    /// 不检查重复，直接载入
    pub fn from_slots(slots: [Option<Talisman>; TALISMAN_SLOTS]) -> Self {
        Self { slots }
    }

    pub fn get(&self, index: usize) -> Option<&Talisman> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn set(
        &mut self,
        index: usize,
        talisman: Option<Talisman>,
    ) -> Result<Option<Talisman>, BuildError> {
        check_index(index, TALISMAN_SLOTS)?;
        if let Some(new) = &talisman {
            let duplicate = self
                .slots
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .filter_map(|(_, t)| t.as_ref())
                .any(|t| t.same_as(new));
            if duplicate {
                return Err(BuildError::DuplicateTalisman(new.name.clone()));
            }
        }
        Ok(std::mem::replace(&mut self.slots[index], talisman))
    }

    pub fn slots(&self) -> &[Option<Talisman>; TALISMAN_SLOTS] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Talisman)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_ref().map(|t| (i, t)))
    }

    /// 重复装备的护符名称（每个只报告一次）
    pub fn duplicates(&self) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for (i, first) in self.iter() {
            let repeated = self.iter().any(|(j, t)| j > i && t.same_as(first));
            if repeated && !found.contains(&first.name) {
                found.push(first.name.clone());
            }
        }
        found
    }

    pub fn extends_memory(&self) -> bool {
        self.iter().any(|(_, t)| t.extends_memory())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// 已装备的武器及其质变
#[derive(Debug, Clone, PartialEq)]
pub struct EquippedWeapon {
    pub weapon: Weapon,
    pub infusion: Infusion,
}

impl EquippedWeapon {
    pub fn new(weapon: Weapon, infusion: Infusion) -> Self {
        Self { weapon, infusion }
    }

    pub fn standard(weapon: Weapon) -> Self {
        Self::new(weapon, Infusion::Standard)
    }

    pub fn is_valid(&self) -> bool {
        self.weapon.accepts(self.infusion)
    }
}

impl fmt::Display for EquippedWeapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.infusion.is_standard() {
            write!(f, "{}", self.weapon.name)
        } else {
            write!(f, "{} ({})", self.weapon.name, self.infusion)
        }
    }
}

/// 六个武器栏（左右手各三）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponLoadout {
    slots: [Option<EquippedWeapon>; WEAPON_SLOTS],
}

impl WeaponLoadout {
    pub fn from_slots(slots: [Option<EquippedWeapon>; WEAPON_SLOTS]) -> Self {
        Self { slots }
    }

    pub fn get(&self, index: usize) -> Option<&EquippedWeapon> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn set(
        &mut self,
        index: usize,
        weapon: Option<EquippedWeapon>,
    ) -> Result<Option<EquippedWeapon>, BuildError> {
        check_index(index, WEAPON_SLOTS)?;
        if let Some(equipped) = &weapon {
            if !equipped.is_valid() {
                return Err(BuildError::InfusionNotAllowed {
                    weapon: equipped.weapon.name.clone(),
                    infusion: equipped.infusion,
                });
            }
        }
        Ok(std::mem::replace(&mut self.slots[index], weapon))
    }

    pub fn slots(&self) -> &[Option<EquippedWeapon>; WEAPON_SLOTS] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &EquippedWeapon)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.as_ref().map(|w| (i, w)))
    }

    pub fn weight(&self) -> f64 {
        self.iter().map(|(_, w)| w.weapon.weight).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// 配装的全部选择
#[derive(Debug, Clone, PartialEq)]
pub struct Selections {
    pub attributes: AttributeSet,
    pub equipment: EquipmentLoadout,
    pub talismans: TalismanLoadout,
    pub weapons: WeaponLoadout,
    pub spells: SpellLoadout,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            attributes: AttributeSet::new(),
            equipment: EquipmentLoadout::default(),
            talismans: TalismanLoadout::default(),
            weapons: WeaponLoadout::default(),
            spells: SpellLoadout::new(BASE_MEMORY_SLOTS),
        }
    }
}

impl Selections {
    /// 护甲与武器的总重量（护符和法术不计重）
    pub fn total_weight(&self) -> f64 {
        self.equipment.weight() + self.weapons.weight()
    }

    /// 当前护符决定的记忆栏容量
    pub fn spell_capacity(&self) -> usize {
        if self.talismans.extends_memory() {
            EXTENDED_MEMORY_SLOTS
        } else {
            BASE_MEMORY_SLOTS
        }
    }

    pub(crate) fn sync_spell_capacity(&mut self) {
        let capacity = self.spell_capacity();
        self.spells.set_capacity(capacity);
    }

    /// 所有已装备物品及其位置，法术按锚点列出
    pub fn equipped(&self) -> Vec<(SlotRef, &dyn ItemTrait)> {
        let mut items: Vec<(SlotRef, &dyn ItemTrait)> = Vec::new();
        for (slot, armor) in self.equipment.iter() {
            if let Some(armor) = armor {
                items.push((SlotRef::Armor(slot), armor as &dyn ItemTrait));
            }
        }
        for (i, talisman) in self.talismans.iter() {
            items.push((SlotRef::Talisman(i), talisman as &dyn ItemTrait));
        }
        for (i, weapon) in self.weapons.iter() {
            items.push((SlotRef::Weapon(i), &weapon.weapon as &dyn ItemTrait));
        }
        for run in self.spells.runs() {
            items.push((SlotRef::Spell(run.anchor), &run.entry as &dyn ItemTrait));
        }
        items
    }

    pub fn is_empty(&self) -> bool {
        self.attributes == AttributeSet::new()
            && self.equipment.is_empty()
            && self.talismans.is_empty()
            && self.weapons.is_empty()
            && self.spells.is_empty()
    }
}
