// src/build/src/report.rs
use std::fmt;

use items::{ArmorSlot, Infusion};
use stats::Attribute;

use crate::{loadout::SlotRef, requirements::RequirementCheck};

/// 阻止保存的问题
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    Requirement {
        slot: SlotRef,
        item: String,
        unmet: Vec<(Attribute, u32)>,
    },
    WrongArmorSlot {
        item: String,
        slot: ArmorSlot,
    },
    DuplicateTalisman(String),
    InfusionNotAllowed {
        slot: SlotRef,
        weapon: String,
        infusion: Infusion,
    },
    SpellOverlap {
        first: String,
        second: String,
    },
    SpellCapacity {
        spell: String,
        anchor: usize,
        capacity: usize,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Requirement { slot, item, unmet } => {
                let needs: Vec<String> = unmet
                    .iter()
                    .map(|(attr, amount)| format!("{attr} {amount}"))
                    .collect();
                write!(
                    f,
                    "You don't meet the requirements for {item} in {slot} (need {})",
                    needs.join(", ")
                )
            }
            ValidationIssue::WrongArmorSlot { item, slot } => {
                write!(f, "{item} cannot be worn in the {slot} slot")
            }
            ValidationIssue::DuplicateTalisman(name) => {
                write!(f, "{name} is equipped more than once")
            }
            ValidationIssue::InfusionNotAllowed {
                slot,
                weapon,
                infusion,
            } => write!(f, "{weapon} in {slot} cannot take the {infusion} infusion"),
            ValidationIssue::SpellOverlap { first, second } => {
                write!(f, "{first} and {second} occupy the same memory slots")
            }
            ValidationIssue::SpellCapacity {
                spell,
                anchor,
                capacity,
            } => write!(
                f,
                "{spell} in spell slot {} does not fit in {capacity} memory slots",
                anchor + 1
            ),
        }
    }
}

/// 不阻止保存的提示（例如需要双持）
#[derive(Debug, Clone, PartialEq)]
pub struct SlotWarning {
    pub slot: SlotRef,
    pub item: String,
    pub check: RequirementCheck,
}

impl fmt::Display for SlotWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.item, self.slot, self.check)
    }
}

/// 整体校验结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<SlotWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "error: {issue}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {warning}")?;
        }
        Ok(())
    }
}
