// src/save/src/convert.rs
//! 选择 <-> 配装记录
//!
//! 记录里只存物品名，读取时按名称在目录中重新查找；找不到的物品变成空栏位。

use build::{
    BASE_MEMORY_SLOTS, BuildSession, EquipmentLoadout, EquippedWeapon, Run, Selections,
    SpellLoadout, TalismanLoadout, WeaponLoadout,
};
use chrono::{DateTime, Utc};
use items::{ArmorSlot, Catalogs, Infusion, Spell};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::{
    metadata::BuildMetadata,
    record::{
        BuildRecord, EquipmentRecord, RECORD_SPELL_SLOTS, RECORD_TALISMAN_SLOTS,
        RECORD_WEAPON_SLOTS, SlotMap, StatsRecord, WeaponRecord,
    },
};

/// 从记录恢复出的配装
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredBuild {
    pub metadata: BuildMetadata,
    pub selections: Selections,
    pub timestamp: Option<DateTime<Utc>>,
}

impl RestoredBuild {
    /// 进入编辑状态
    pub fn into_session(self) -> BuildSession {
        BuildSession::from_selections(self.selections)
    }
}

/// 重量保留两位小数，避免浮点累加误差写进存档
fn round_weight(weight: f64) -> f64 {
    (weight * 100.0).round() / 100.0
}

fn equipment_record(equipment: &EquipmentLoadout) -> EquipmentRecord {
    let name = |slot| equipment.get(slot).map(|a| a.name.clone());
    EquipmentRecord {
        head: name(ArmorSlot::Head),
        chest: name(ArmorSlot::Chest),
        hands: name(ArmorSlot::Hands),
        legs: name(ArmorSlot::Legs),
    }
}

fn weapon_record(weapon: Option<&EquippedWeapon>) -> WeaponRecord {
    match weapon {
        Some(equipped) => WeaponRecord {
            name: Some(equipped.weapon.name.clone()),
            infusion: equipped.infusion.to_record(),
        },
        None => WeaponRecord::default(),
    }
}

/// 生成配装记录（时间戳为当前时间）
pub fn to_record(selections: &Selections, metadata: &BuildMetadata) -> BuildRecord {
    to_record_at(selections, metadata, Utc::now())
}

pub fn to_record_at(
    selections: &Selections,
    metadata: &BuildMetadata,
    timestamp: DateTime<Utc>,
) -> BuildRecord {
    let metadata = metadata.normalized();
    let talismans: [Option<String>; RECORD_TALISMAN_SLOTS] =
        std::array::from_fn(|i| selections.talismans.get(i).map(|t| t.name.clone()));
    let weapons: [WeaponRecord; RECORD_WEAPON_SLOTS] =
        std::array::from_fn(|i| weapon_record(selections.weapons.get(i)));
    let cells = selections.spells.cells(RECORD_SPELL_SLOTS);
    let spells: [Option<String>; RECORD_SPELL_SLOTS] =
        std::array::from_fn(|i| cells[i].map(|s| s.name.clone()));

    BuildRecord {
        build_name: metadata.build_name,
        build_type: metadata.build_type,
        description: metadata.description,
        favorite_weapon: metadata.favorite_weapon,
        equipment: equipment_record(&selections.equipment),
        talismans: SlotMap(talismans),
        stats: StatsRecord(selections.attributes),
        weapons: SlotMap(weapons),
        spells: SlotMap(spells),
        total_weight: round_weight(selections.total_weight()),
        timestamp: Some(timestamp),
    }
}

fn restore_equipment(record: &EquipmentRecord, catalogs: &Catalogs) -> EquipmentLoadout {
    let mut equipment = EquipmentLoadout::default();
    for slot in ArmorSlot::iter() {
        let name = match slot {
            ArmorSlot::Head => &record.head,
            ArmorSlot::Chest => &record.chest,
            ArmorSlot::Hands => &record.hands,
            ArmorSlot::Legs => &record.legs,
        };
        let Some(name) = name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        match catalogs.armor(name) {
            Some(armor) => {
                if equipment.set(slot, Some(armor.clone())).is_err() {
                    warn!(%slot, armor = name, "armor stored in the wrong slot, dropped");
                }
            }
            None => warn!(%slot, armor = name, "unknown armor, slot left empty"),
        }
    }
    equipment
}

fn restore_weapon(index: usize, record: &WeaponRecord, catalogs: &Catalogs) -> Option<EquippedWeapon> {
    let name = record.name.as_deref().filter(|n| !n.is_empty())?;
    let Some(weapon) = catalogs.weapon(name) else {
        warn!(slot = index + 1, weapon = name, "unknown weapon, slot left empty");
        return None;
    };

    let infusion = match Infusion::from_record(record.infusion.as_deref()) {
        Some(infusion) if weapon.accepts(infusion) => infusion,
        Some(infusion) => {
            warn!(weapon = name, %infusion, "weapon cannot be infused, using Standard");
            Infusion::Standard
        }
        None => {
            warn!(weapon = name, infusion = ?record.infusion, "unknown infusion, using Standard");
            Infusion::Standard
        }
    };
    Some(EquippedWeapon::new(weapon.clone(), infusion))
}

/// 把逐格的法术名重新分组成 run：与上一格同名且仍在其宽度内时延续，否则新起一个 run
fn restore_spells(cells: &[Option<String>], catalogs: &Catalogs, capacity: usize) -> SpellLoadout {
    let mut runs: Vec<Run<Spell>> = Vec::new();
    let mut previous: Option<String> = None;

    for (slot, cell) in cells.iter().enumerate() {
        let name = cell.as_deref().filter(|n| !n.is_empty());
        let continues = match (name, previous.as_deref(), runs.last()) {
            (Some(name), Some(prev), Some(run)) => name == prev && slot < run.end(),
            _ => false,
        };
        previous = name.map(str::to_string);
        if continues {
            continue;
        }

        let Some(name) = name else {
            continue;
        };
        match catalogs.spell(name) {
            Some(spell) => runs.push(Run::new(slot, spell.clone())),
            None => {
                warn!(slot = slot + 1, spell = name, "unknown spell, slot left empty");
                previous = None;
            }
        }
    }

    SpellLoadout::restore(capacity, runs)
}

/// 按名称在目录中恢复配装
pub fn from_record(record: &BuildRecord, catalogs: &Catalogs) -> RestoredBuild {
    let talismans = TalismanLoadout::from_slots(std::array::from_fn(|i| {
        let name = record.talismans.get(i)?.as_deref().filter(|n| !n.is_empty())?;
        let talisman = catalogs.talisman(name);
        if talisman.is_none() {
            warn!(slot = i + 1, talisman = name, "unknown talisman, slot left empty");
        }
        talisman.cloned()
    }));

    let weapons = WeaponLoadout::from_slots(std::array::from_fn(|i| {
        record
            .weapons
            .get(i)
            .and_then(|w| restore_weapon(i, w, catalogs))
    }));

    let mut selections = Selections {
        attributes: record.stats.0,
        equipment: restore_equipment(&record.equipment, catalogs),
        talismans,
        weapons,
        spells: SpellLoadout::new(BASE_MEMORY_SLOTS),
    };
    let capacity = selections.spell_capacity();
    selections.spells = restore_spells(&record.spells.0, catalogs, capacity);

    debug!(build = %record.build_name, "restored build record");

    RestoredBuild {
        metadata: BuildMetadata {
            build_name: record.build_name.clone(),
            build_type: record.build_type.clone(),
            description: record.description.clone(),
            favorite_weapon: record.favorite_weapon.clone(),
        },
        selections,
        timestamp: record.timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use build::SlotRef;
    use chrono::TimeZone;
    use items::{Armor, Catalog, Requirement, SpellSchool, Talisman, Weapon, MOON_OF_NOKSTELLA};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use stats::Attribute;

    fn catalogs() -> Catalogs {
        Catalogs::new(
            Catalog::with_dlc(
                vec![Armor::new("a1", "Champion Headband", ArmorSlot::Head, 2.1)],
                vec![Armor::new("a2", "Messmer's Helm", ArmorSlot::Head, 7.8)],
            ),
            Catalog::new(vec![
                Weapon::new("w1", "Uchigatana", 5.5, vec![Requirement::new(Attribute::Strength, 11)]),
                Weapon::new("w2", "Moonveil", 6.5, vec![]).unique(),
            ]),
            Catalog::new(vec![
                Talisman::new("t1", MOON_OF_NOKSTELLA),
                Talisman::new("t2", "Green Turtle Talisman"),
            ]),
            Catalog::new(vec![
                Spell::new("s1", "Comet Azur", SpellSchool::Sorcery, 2),
                Spell::new("s2", "Rock Sling", SpellSchool::Sorcery, 1),
            ]),
            Catalog::new(vec![Spell::new("s3", "Flame Sling", SpellSchool::Incantation, 1)]),
        )
    }

    fn record(value: serde_json::Value) -> BuildRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn writes_names_and_weight() {
        let cat = catalogs();
        let mut selections = Selections::default();
        selections
            .equipment
            .set(ArmorSlot::Head, cat.armor("Champion Headband").cloned())
            .unwrap();
        selections
            .weapons
            .set(0, Some(EquippedWeapon::new(cat.weapon("Uchigatana").unwrap().clone(), Infusion::Keen)))
            .unwrap();
        selections
            .spells
            .place(3, cat.spell("Comet Azur").unwrap().clone())
            .unwrap();

        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let rec = to_record_at(&selections, &BuildMetadata::new(" Samurai "), at);
        assert_eq!(rec.build_name, "Samurai");
        assert_eq!(rec.total_weight, 7.6);
        assert_eq!(rec.equipment.head.as_deref(), Some("Champion Headband"));
        assert_eq!(rec.weapons.get(0).unwrap().infusion.as_deref(), Some("Keen"));
        assert_eq!(rec.spells.get(3).unwrap().as_deref(), Some("Comet Azur"));
        assert_eq!(rec.spells.get(4).unwrap().as_deref(), Some("Comet Azur"));
        assert_eq!(rec.spells.get(5), Some(&None));

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["timestamp"], json!("2025-03-01T12:00:00Z"));
    }

    #[test]
    fn unknown_names_become_empty_slots() {
        let rec = record(json!({
            "buildName": "Stale",
            "equipment": { "head": "Removed Helm" },
            "talismans": { "slot2": "Removed Talisman" },
            "weapons": { "slot1": { "name": "Removed Sword", "infusion": null } },
            "spells": { "slot1": "Removed Spell" }
        }));
        let restored = from_record(&rec, &catalogs());
        assert!(restored.selections.is_empty());
    }

    #[test]
    fn dlc_armor_resolves() {
        let rec = record(json!({ "equipment": { "head": "Messmer's Helm" } }));
        let restored = from_record(&rec, &catalogs());
        assert_eq!(
            restored.selections.equipment.get(ArmorSlot::Head).unwrap().id,
            "a2"
        );
    }

    #[test]
    fn armor_in_wrong_slot_is_dropped() {
        let rec = record(json!({ "equipment": { "legs": "Champion Headband" } }));
        let restored = from_record(&rec, &catalogs());
        assert!(restored.selections.equipment.is_empty());
    }

    #[test]
    fn infusion_decays_to_standard() {
        let rec = record(json!({
            "weapons": {
                "slot1": { "name": "Moonveil", "infusion": "Keen" },
                "slot2": { "name": "Uchigatana", "infusion": "Frost" },
                "slot3": { "name": "Uchigatana", "infusion": "Flame Art" }
            }
        }));
        let weapons = from_record(&rec, &catalogs()).selections.weapons;
        assert_eq!(weapons.get(0).unwrap().infusion, Infusion::Standard);
        assert_eq!(weapons.get(1).unwrap().infusion, Infusion::Standard);
        assert_eq!(weapons.get(2).unwrap().infusion, Infusion::FlameArt);
    }

    #[test]
    fn spell_cells_regroup_into_runs() {
        let rec = record(json!({
            "spells": {
                "slot1": "Comet Azur", "slot2": "Comet Azur",
                "slot3": "Comet Azur", "slot4": "Comet Azur",
                "slot5": "Rock Sling", "slot6": "Rock Sling",
                "slot7": "Flame Sling"
            }
        }));
        let spells = from_record(&rec, &catalogs()).selections.spells;
        let runs: Vec<_> = spells
            .runs()
            .iter()
            .map(|r| (r.anchor, r.entry.name.as_str()))
            .collect();
        assert_eq!(
            runs,
            vec![
                (0, "Comet Azur"),
                (2, "Comet Azur"),
                (4, "Rock Sling"),
                (5, "Rock Sling"),
                (6, "Flame Sling"),
            ]
        );
        assert_eq!(spells.runs()[4].entry.school, SpellSchool::Incantation);
    }

    #[test]
    fn nokstella_restores_twelve_slots() {
        let rec = record(json!({
            "talismans": { "slot3": MOON_OF_NOKSTELLA },
            "spells": { "slot11": "Comet Azur", "slot12": "Comet Azur" }
        }));
        let session = from_record(&rec, &catalogs()).into_session();
        assert_eq!(session.spell_capacity(), 12);
        assert_eq!(session.selections().spells.capacity(), 12);
        assert!(session.validate().is_valid());
        assert_eq!(
            session.selections().equipped().last().map(|(slot, _)| *slot),
            Some(SlotRef::Spell(10))
        );
    }

    #[test]
    fn metadata_survives_round_trip() {
        let rec = record(json!({
            "buildName": "Moon Knight",
            "buildType": "PvE",
            "description": "Int/Dex",
            "favoriteWeapon": "Moonveil"
        }));
        let restored = from_record(&rec, &catalogs());
        assert_eq!(restored.metadata.build_name, "Moon Knight");
        assert_eq!(restored.metadata.build_type, crate::BuildType::PvE);
        assert_eq!(restored.metadata.favorite_weapon, "Moonveil");
    }
}
