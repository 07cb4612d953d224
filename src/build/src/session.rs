// src/build/src/session.rs
//! 配装会话状态机
//!
//! Empty -> Editing -> Validated -> Saved，任何修改都会回到 Editing。
//! 派生数值不缓存，每次按当前选择重新计算。

use items::{Armor, ArmorSlot, ItemTrait, Spell, Talisman};
use stats::{Attribute, AttributeSet, DerivedStats};
use strum::Display;
use tracing::debug;

use crate::{
    BuildError,
    loadout::{EquippedWeapon, Selections, SlotRef, SpellLoadout, TalismanLoadout, WeaponLoadout},
    report::{SlotWarning, ValidationIssue, ValidationReport},
    requirements::{can_equip, requirement_warnings, unmet_requirements},
    slots::SlotError,
};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Empty,
    Editing,
    Validated,
    Saved,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildSession {
    phase: SessionPhase,
    selections: Selections,
}

impl BuildSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有选择恢复（读取存档后进入编辑状态）
    pub fn from_selections(mut selections: Selections) -> Self {
        selections.sync_spell_capacity();
        Self {
            phase: SessionPhase::Editing,
            selections,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.selections.attributes
    }

    fn edit<F>(&self, change: F) -> Result<Self, BuildError>
    where
        F: FnOnce(&mut Selections) -> Result<(), BuildError>,
    {
        let mut next = self.clone();
        change(&mut next.selections)?;
        next.selections.sync_spell_capacity();
        next.phase = SessionPhase::Editing;
        Ok(next)
    }

    fn ensure_equippable<I>(&self, item: &I, slot: SlotRef) -> Result<(), BuildError>
    where
        I: ItemTrait + ?Sized,
    {
        let unmet = unmet_requirements(item, self.attributes());
        if unmet.is_empty() {
            Ok(())
        } else {
            Err(BuildError::RequirementNotMet {
                item: item.name().to_string(),
                slot,
                unmet,
            })
        }
    }

    pub fn with_attribute(&self, attribute: Attribute, level: i32) -> Self {
        let mut next = self.clone();
        next.selections.attributes.set(attribute, level);
        next.phase = SessionPhase::Editing;
        next
    }

    pub fn adjust_attribute(&self, attribute: Attribute, delta: i32) -> Self {
        let level = self.attributes().get(attribute) as i32;
        self.with_attribute(attribute, level.saturating_add(delta))
    }

    pub fn with_attributes(&self, attributes: AttributeSet) -> Self {
        let mut next = self.clone();
        next.selections.attributes = attributes;
        next.phase = SessionPhase::Editing;
        next
    }

    pub fn equip_armor(&self, slot: ArmorSlot, armor: Option<Armor>) -> Result<Self, BuildError> {
        if let Some(armor) = &armor {
            self.ensure_equippable(armor, SlotRef::Armor(slot))?;
        }
        debug!(%slot, armor = ?armor.as_ref().map(|a| &a.name), "equip armor");
        self.edit(|s| s.equipment.set(slot, armor).map(|_| ()))
    }

    pub fn equip_talisman(
        &self,
        index: usize,
        talisman: Option<Talisman>,
    ) -> Result<Self, BuildError> {
        debug!(index, talisman = ?talisman.as_ref().map(|t| &t.name), "equip talisman");
        self.edit(|s| s.talismans.set(index, talisman).map(|_| ()))
    }

    pub fn equip_weapon(
        &self,
        index: usize,
        weapon: Option<EquippedWeapon>,
    ) -> Result<Self, BuildError> {
        if let Some(equipped) = &weapon {
            self.ensure_equippable(&equipped.weapon, SlotRef::Weapon(index))?;
        }
        debug!(index, weapon = ?weapon.as_ref().map(ToString::to_string), "equip weapon");
        self.edit(|s| s.weapons.set(index, weapon).map(|_| ()))
    }

    /// 在记忆栏放置法术，驱逐被覆盖的法术
    pub fn place_spell(&self, anchor: usize, spell: Spell) -> Result<Self, BuildError> {
        self.ensure_equippable(&spell, SlotRef::Spell(anchor))?;
        self.edit(|s| {
            let evicted = s.spells.place(anchor, spell)?;
            if !evicted.is_empty() {
                debug!(
                    anchor,
                    evicted = ?evicted.iter().map(|e| &e.name).collect::<Vec<_>>(),
                    "spells evicted"
                );
            }
            Ok(())
        })
    }

    pub fn remove_spell(&self, slot: usize) -> Self {
        let mut next = self.clone();
        if let Some(spell) = next.selections.spells.remove(slot) {
            debug!(slot, spell = %spell.name, "remove spell");
        }
        next.phase = SessionPhase::Editing;
        next
    }

    /// 提交整个记忆栏草稿：容量、重叠、属性需求全部通过才替换
    pub fn commit_spells(&self, mut draft: SpellLoadout) -> Result<Self, BuildError> {
        draft.set_capacity(self.selections.spell_capacity());
        let attributes = *self.attributes();
        let committed = draft
            .commit(|spell| can_equip(spell, &attributes))
            .map_err(|err| match err {
                SlotError::Rejected { entry, anchor } => {
                    let unmet = draft
                        .run_at(anchor)
                        .map(|run| unmet_requirements(&run.entry, &attributes))
                        .unwrap_or_default();
                    BuildError::RequirementNotMet {
                        item: entry,
                        slot: SlotRef::Spell(anchor),
                        unmet,
                    }
                }
                other => BuildError::Slot(other),
            })?;
        self.edit(|s| {
            s.spells = committed;
            Ok(())
        })
    }

    /// 提交武器栏草稿，第一个不合格的栏位阻止提交
    pub fn commit_weapons(&self, draft: WeaponLoadout) -> Result<Self, BuildError> {
        for (index, equipped) in draft.iter() {
            if !equipped.is_valid() {
                return Err(BuildError::InfusionNotAllowed {
                    weapon: equipped.weapon.name.clone(),
                    infusion: equipped.infusion,
                });
            }
            self.ensure_equippable(&equipped.weapon, SlotRef::Weapon(index))?;
        }
        self.edit(|s| {
            s.weapons = draft;
            Ok(())
        })
    }

    pub fn commit_talismans(&self, draft: TalismanLoadout) -> Result<Self, BuildError> {
        if let Some(name) = draft.duplicates().into_iter().next() {
            return Err(BuildError::DuplicateTalisman(name));
        }
        self.edit(|s| {
            s.talismans = draft;
            Ok(())
        })
    }

    /// 全量校验：属性需求、护甲部位、护符重复、质变、记忆栏
    pub fn validate(&self) -> ValidationReport {
        let selections = &self.selections;
        let attributes = &selections.attributes;
        let mut report = ValidationReport::default();

        for (slot, item) in selections.equipped() {
            let unmet = unmet_requirements(item, attributes);
            if !unmet.is_empty() {
                report.issues.push(ValidationIssue::Requirement {
                    slot,
                    item: item.name().to_string(),
                    unmet,
                });
            }
            for check in requirement_warnings(item, attributes) {
                report.warnings.push(SlotWarning {
                    slot,
                    item: item.name().to_string(),
                    check,
                });
            }
        }

        for (slot, armor) in selections.equipment.iter() {
            if let Some(armor) = armor {
                if armor.slot() != slot {
                    report.issues.push(ValidationIssue::WrongArmorSlot {
                        item: armor.name.clone(),
                        slot,
                    });
                }
            }
        }

        for name in selections.talismans.duplicates() {
            report.issues.push(ValidationIssue::DuplicateTalisman(name));
        }

        for (index, equipped) in selections.weapons.iter() {
            if !equipped.is_valid() {
                report.issues.push(ValidationIssue::InfusionNotAllowed {
                    slot: SlotRef::Weapon(index),
                    weapon: equipped.weapon.name.clone(),
                    infusion: equipped.infusion,
                });
            }
        }

        let capacity = selections.spell_capacity();
        for run in selections.spells.runs() {
            if run.end() > capacity {
                report.issues.push(ValidationIssue::SpellCapacity {
                    spell: run.entry.name.clone(),
                    anchor: run.anchor,
                    capacity,
                });
            }
        }
        for (first, second) in selections.spells.overlaps() {
            report.issues.push(ValidationIssue::SpellOverlap {
                first: first.entry.name.clone(),
                second: second.entry.name.clone(),
            });
        }

        report
    }

    /// 校验通过后进入 Validated
    pub fn validated(&self) -> Result<Self, ValidationReport> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(report);
        }
        let mut next = self.clone();
        next.phase = SessionPhase::Validated;
        Ok(next)
    }

    pub fn mark_saved(&self) -> Self {
        let mut next = self.clone();
        next.phase = SessionPhase::Saved;
        next
    }

    pub fn total_weight(&self) -> f64 {
        self.selections.total_weight()
    }

    pub fn spell_capacity(&self) -> usize {
        self.selections.spell_capacity()
    }

    pub fn derived(&self) -> DerivedStats {
        DerivedStats::compute(self.attributes(), self.total_weight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BASE_MEMORY_SLOTS, EXTENDED_MEMORY_SLOTS};
    use items::{Infusion, MOON_OF_NOKSTELLA, Requirement, SpellSchool, Weapon};
    use pretty_assertions::assert_eq;
    use stats::LoadStatus;

    fn moonveil() -> Weapon {
        Weapon::new(
            "w1",
            "Moonveil",
            6.5,
            vec![
                Requirement::new(Attribute::Strength, 12),
                Requirement::new(Attribute::Dexterity, 18),
                Requirement::new(Attribute::Intelligence, 23),
            ],
        )
        .unique()
    }

    fn comet_azur() -> Spell {
        Spell::new("s1", "Comet Azur", SpellSchool::Sorcery, 3)
            .with_requirements(vec![Requirement::new(Attribute::Intelligence, 60)])
    }

    fn nokstella() -> Talisman {
        Talisman::new("t1", MOON_OF_NOKSTELLA)
    }

    fn caster() -> BuildSession {
        BuildSession::new()
            .with_attribute(Attribute::Dexterity, 18)
            .with_attribute(Attribute::Intelligence, 60)
    }

    #[test]
    fn new_session_is_empty() {
        let session = BuildSession::new();
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert!(session.selections().is_empty());
        assert_eq!(session.derived().level, 1);
        assert_eq!(session.spell_capacity(), BASE_MEMORY_SLOTS);
    }

    #[test]
    fn edits_leave_original_untouched() {
        let session = BuildSession::new();
        let edited = session.with_attribute(Attribute::Vigor, 20);
        assert_eq!(session.attributes().get(Attribute::Vigor), 10);
        assert_eq!(edited.attributes().get(Attribute::Vigor), 20);
        assert_eq!(edited.phase(), SessionPhase::Editing);
        assert_eq!(edited.derived().level, 11);
    }

    #[test]
    fn attributes_clamp_at_bounds() {
        let session = BuildSession::new()
            .adjust_attribute(Attribute::Mind, -50)
            .adjust_attribute(Attribute::Arcane, 500);
        assert_eq!(session.attributes().get(Attribute::Mind), 1);
        assert_eq!(session.attributes().get(Attribute::Arcane), 99);
    }

    #[test]
    fn weapon_needs_attributes_but_allows_two_handing() {
        let session = BuildSession::new();
        let err = session
            .equip_weapon(0, Some(EquippedWeapon::standard(moonveil())))
            .unwrap_err();
        match err {
            BuildError::RequirementNotMet { slot, unmet, .. } => {
                assert_eq!(slot, SlotRef::Weapon(0));
                assert_eq!(
                    unmet,
                    vec![(Attribute::Dexterity, 18), (Attribute::Intelligence, 23)]
                );
            }
            other => panic!("unexpected error {other:?}"),
        }

        // 力量 10 只达到双持门槛 12/2
        let session = session
            .with_attribute(Attribute::Dexterity, 18)
            .with_attribute(Attribute::Intelligence, 23)
            .equip_weapon(0, Some(EquippedWeapon::standard(moonveil())))
            .unwrap();
        let report = session.validate();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].slot, SlotRef::Weapon(0));
    }

    #[test]
    fn unique_weapon_cannot_be_infused() {
        let session = caster().with_attribute(Attribute::Strength, 12);
        let err = session
            .equip_weapon(1, Some(EquippedWeapon::new(moonveil(), Infusion::Keen)))
            .unwrap_err();
        assert!(matches!(err, BuildError::InfusionNotAllowed { .. }));
    }

    #[test]
    fn armor_weight_drives_load_tier() {
        let heavy = Armor::new("a1", "Bull-Goat Armor", ArmorSlot::Chest, 30.3);
        let session = BuildSession::new()
            .equip_armor(ArmorSlot::Chest, Some(heavy))
            .unwrap();
        let derived = session.derived();
        assert_eq!(derived.max_load, 48.0);
        assert_eq!(derived.load.status, LoadStatus::Medium);
    }

    #[test]
    fn huge_spell_anchor_is_rejected_without_change() {
        let session = caster();
        let err = session
            .place_spell(usize::MAX, Spell::new("s2", "Rock Sling", SpellSchool::Sorcery, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Slot(SlotError::CapacityExceeded { anchor: usize::MAX, .. })
        ));
        assert!(session.selections().spells.is_empty());
        assert_eq!(SlotRef::Spell(usize::MAX).to_string(), format!("spell slot {}", usize::MAX));
    }

    #[test]
    fn nokstella_unlocks_last_two_slots() {
        let session = caster();
        assert!(matches!(
            session.place_spell(10, Spell::new("s2", "Rock Sling", SpellSchool::Sorcery, 1)),
            Err(BuildError::Slot(SlotError::CapacityExceeded { .. }))
        ));

        let session = session
            .equip_talisman(0, Some(nokstella()))
            .unwrap()
            .place_spell(9, comet_azur())
            .unwrap();
        assert_eq!(session.spell_capacity(), EXTENDED_MEMORY_SLOTS);
        assert!(session.validate().is_valid());

        // 卸下护符后法术保留，但校验报告超出容量
        let session = session.equip_talisman(0, None).unwrap();
        assert_eq!(session.selections().spells.runs().len(), 1);
        let report = session.validate();
        assert_eq!(
            report.issues,
            vec![ValidationIssue::SpellCapacity {
                spell: "Comet Azur".into(),
                anchor: 9,
                capacity: BASE_MEMORY_SLOTS
            }]
        );
        assert!(session.validated().is_err());
    }

    #[test]
    fn spell_requirements_checked_on_place() {
        let session = BuildSession::new();
        assert!(matches!(
            session.place_spell(0, comet_azur()),
            Err(BuildError::RequirementNotMet { .. })
        ));
    }

    #[test]
    fn commit_spell_draft() {
        let session = caster();
        let draft = session
            .selections()
            .spells
            .placed(0, comet_azur())
            .unwrap()
            .placed(4, Spell::new("s2", "Rock Sling", SpellSchool::Sorcery, 1))
            .unwrap();
        let session = session.commit_spells(draft).unwrap();
        assert_eq!(session.selections().spells.runs().len(), 2);

        // 属性降低后再提交，指出具体法术
        let weaker = session.with_attribute(Attribute::Intelligence, 30);
        let err = weaker
            .commit_spells(weaker.selections().spells.clone())
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::RequirementNotMet {
                item: "Comet Azur".into(),
                slot: SlotRef::Spell(0),
                unmet: vec![(Attribute::Intelligence, 60)],
            }
        );
    }

    #[test]
    fn commit_talisman_draft_rejects_duplicates() {
        let favor = Talisman::new("t2", "Erdtree's Favor");
        let draft = TalismanLoadout::from_slots([Some(favor.clone()), None, None, Some(favor)]);
        assert_eq!(
            BuildSession::new().commit_talismans(draft),
            Err(BuildError::DuplicateTalisman("Erdtree's Favor".into()))
        );
    }

    #[test]
    fn commit_weapon_draft_blocks_on_first_bad_slot() {
        let mut draft = WeaponLoadout::default();
        draft
            .set(2, Some(EquippedWeapon::standard(moonveil())))
            .unwrap();
        let err = BuildSession::new().commit_weapons(draft.clone()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::RequirementNotMet { slot: SlotRef::Weapon(2), .. }
        ));
        assert!(caster().commit_weapons(draft).is_ok());
    }

    #[test]
    fn lowering_attributes_invalidates_equipped_items() {
        let session = caster()
            .equip_weapon(0, Some(EquippedWeapon::standard(moonveil())))
            .unwrap()
            .with_attribute(Attribute::Dexterity, 10);
        let report = session.validate();
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].to_string().contains("Moonveil"));
    }

    #[test]
    fn phases_advance_to_saved() {
        let session = BuildSession::new().with_attribute(Attribute::Vigor, 40);
        let validated = session.validated().unwrap();
        assert_eq!(validated.phase(), SessionPhase::Validated);
        let saved = validated.mark_saved();
        assert_eq!(saved.phase(), SessionPhase::Saved);
        assert_eq!(
            saved.with_attribute(Attribute::Vigor, 41).phase(),
            SessionPhase::Editing
        );
    }
}
