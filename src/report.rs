//src/report.rs
//! 配装摘要：派生数值 + 校验结果，供命令行输出

use std::fmt;

use build::{BuildSession, ValidationReport};
use items::Catalogs;
use save::{BuildRecord, from_record};
use serde::Serialize;
use stats::{Attribute, DerivedStats};

#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub name: String,
    pub build_type: String,
    pub attributes: Vec<(Attribute, u32)>,
    pub derived: DerivedStats,
    pub spell_capacity: usize,
    pub equipment: Vec<String>,
    #[serde(skip)]
    pub report: ValidationReport,
    /// 记录中存在但目录里找不到的物品名
    pub unresolved: Vec<String>,
}

impl BuildSummary {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

/// 记录中所有无法在目录中找到的物品名
pub fn unresolved_names(record: &BuildRecord, catalogs: &Catalogs) -> Vec<String> {
    let mut missing = Vec::new();
    let mut check = |name: Option<&str>, found: &dyn Fn(&str) -> bool| {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            if !found(name) && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
        }
    };

    let equipment = &record.equipment;
    for name in [&equipment.head, &equipment.chest, &equipment.hands, &equipment.legs] {
        check(name.as_deref(), &|n| catalogs.armor(n).is_some());
    }
    for name in record.talismans.iter() {
        check(name.as_deref(), &|n| catalogs.talisman(n).is_some());
    }
    for weapon in record.weapons.iter() {
        check(weapon.name.as_deref(), &|n| catalogs.weapon(n).is_some());
    }
    for name in record.spells.iter() {
        check(name.as_deref(), &|n| catalogs.spell(n).is_some());
    }
    missing
}

pub fn summarize(record: &BuildRecord, catalogs: &Catalogs) -> BuildSummary {
    let session: BuildSession = from_record(record, catalogs).into_session();
    let selections = session.selections();

    let mut equipment = Vec::new();
    for (slot, armor) in selections.equipment.iter() {
        if let Some(armor) = armor {
            equipment.push(format!("{slot}: {}", armor.name));
        }
    }
    for (i, talisman) in selections.talismans.iter() {
        equipment.push(format!("Talisman {}: {}", i + 1, talisman.name));
    }
    for (i, weapon) in selections.weapons.iter() {
        equipment.push(format!("Weapon {}: {weapon}", i + 1));
    }
    for run in selections.spells.runs() {
        equipment.push(format!(
            "Spell {}: {} ({})",
            run.anchor + 1,
            run.entry.name,
            run.entry.school
        ));
    }

    BuildSummary {
        name: record.build_name.clone(),
        build_type: record.build_type.to_string(),
        attributes: session.attributes().iter().collect(),
        derived: session.derived(),
        spell_capacity: session.spell_capacity(),
        equipment,
        report: session.validate(),
        unresolved: unresolved_names(record, catalogs),
    }
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let derived = &self.derived;
        if self.build_type.is_empty() {
            writeln!(f, "{}", self.name)?;
        } else {
            writeln!(f, "{} [{}]", self.name, self.build_type)?;
        }
        writeln!(f, "Level {}", derived.level)?;

        let attributes: Vec<String> = self
            .attributes
            .iter()
            .map(|(attr, level)| format!("{attr} {level}"))
            .collect();
        writeln!(f, "{}", attributes.join("  "))?;
        writeln!(
            f,
            "HP {}  FP {}  Stamina {}",
            derived.hp, derived.fp, derived.stamina
        )?;
        writeln!(
            f,
            "Equip Load {:.1} / {:.1} ({})",
            derived.current_load, derived.max_load, derived.load.status
        )?;
        match (derived.load.roll, derived.load.recovery) {
            (Some(roll), Some(recovery)) => {
                writeln!(f, "Roll iframes {roll}, recovery {recovery}")?
            }
            _ => writeln!(f, "Cannot roll")?,
        }
        writeln!(f, "Memory slots {}", self.spell_capacity)?;

        for line in &self.equipment {
            writeln!(f, "  {line}")?;
        }
        for name in &self.unresolved {
            writeln!(f, "missing from catalog: {name}")?;
        }
        write!(f, "{}", self.report)
    }
}
