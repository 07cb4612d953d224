//! Shared fixtures: a small catalog written in the same JSON layout as the game data.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use elden_planner::items::{CatalogFiles, Catalogs};
use serde_json::{Value, json};
use tempfile::TempDir;

pub fn armors() -> Value {
    json!([
        { "id": "a1", "name": "Champion's Helm", "category": "Helm", "weight": 3.2 },
        { "id": "a2", "name": "Knight Armor", "category": "Chest Armor", "weight": 9.0 },
        { "id": "a3", "name": "Bull-Goat Armor", "category": "Chest Armor", "weight": 30.3 }
    ])
}

pub fn dlc_armors() -> Value {
    json!([
        { "id": "d1", "name": "Messmer's Helm", "category": "Helm", "weight": 7.8 }
    ])
}

pub fn weapons() -> Value {
    json!([
        {
            "id": "w1", "name": "Moonveil", "category": "Katana", "weight": 6.5,
            "requiredAttributes": [
                { "name": "Str", "amount": 12 },
                { "name": "Dex", "amount": 18 },
                { "name": "Int", "amount": 23 }
            ]
        },
        {
            "id": "w2", "name": "Greatsword", "category": "Colossal Sword", "weight": 23.0,
            "requiredAttributes": [{ "name": "Str", "amount": 31 }, { "name": "Dex", "amount": 12 }]
        },
        {
            "id": "w3", "name": "Dark Moon Greatsword", "category": "Greatsword", "weight": 10.0,
            "infusible": false,
            "requiredAttributes": [{ "name": "Str", "amount": 16 }, { "name": "Dex", "amount": 11 }, { "name": "Int", "amount": 38 }]
        },
        { "id": "w4", "name": "Dagger", "weight": 1.5, "requiredAttributes": null }
    ])
}

pub fn dlc_weapons() -> Value {
    json!([
        { "id": "dw1", "name": "Milady", "category": "Light Greatsword", "weight": 6.0,
          "requiredAttributes": [{ "name": "Str", "amount": 10 }, { "name": "Dex", "amount": 16 }] }
    ])
}

pub fn talismans() -> Value {
    json!([
        { "id": "t1", "name": "Moon of Nokstella", "effect": "Increases memory slots by 2" },
        { "id": "t2", "name": "Erdtree's Favor" },
        { "id": "t3", "name": "Graven-Mass Talisman" }
    ])
}

pub fn sorceries() -> Value {
    json!([
        { "id": "s1", "name": "Glintstone Pebble", "type": "Sorcery", "cost": 7, "slots": 1,
          "requires": [{ "name": "Intelligence", "amount": 10 }] },
        { "id": "s2", "name": "Comet Azur", "cost": 40, "slots": 2,
          "requires": [{ "name": "Intelligence", "amount": 60 }] },
        { "id": "s3", "name": "Rennala's Full Moon", "cost": 62, "slots": 3,
          "requires": [{ "name": "Intelligence", "amount": 70 }] }
    ])
}

pub fn incantations() -> Value {
    json!([
        { "id": "i1", "name": "Flame Sling", "cost": 10, "slots": 1,
          "requires": [{ "name": "Faith", "amount": 9 }] },
        { "id": "i2", "name": "Golden Vow", "cost": 30, "slots": 1,
          "requires": [{ "name": "Faith", "amount": 25 }] }
    ])
}

fn write(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

/// Writes every catalog file (including DLC) into a fresh temp directory.
pub fn catalog_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "armors.json", &armors());
    write(dir.path(), "armorsdlc.json", &dlc_armors());
    write(dir.path(), "weapons.json", &weapons());
    write(dir.path(), "weaponsDLC.json", &dlc_weapons());
    write(dir.path(), "talismans.json", &talismans());
    write(dir.path(), "sorceries.json", &sorceries());
    write(dir.path(), "incantations.json", &incantations());
    dir
}

pub fn catalogs() -> Catalogs {
    let dir = catalog_dir();
    Catalogs::load_dir(dir.path(), &CatalogFiles::default()).unwrap()
}
