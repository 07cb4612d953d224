//src/items/src/catalog.rs
//! 物品目录
//!
//! 每类物品由本体目录和可选的 DLC 目录组成，查找前总是先拼接本体再拼接 DLC。
//! 配装记录以名称作为外键，所有按名称的查找都经过 [`resolve`]。

use std::fs;
use std::path::Path;

use error::PlannerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Armor, ItemTrait, Spell, SpellSchool, Talisman, Weapon};

/// 按名称查找物品：精确匹配、区分大小写、返回第一个匹配项
pub fn resolve<'a, T, I>(entries: I, name: &str) -> Option<&'a T>
where
    T: ItemTrait + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if name.is_empty() {
        return None;
    }
    entries.into_iter().find(|item| item.name() == name)
}

/// 单类物品目录（本体 + DLC）
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    base: Vec<T>,
    dlc: Vec<T>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            base: Vec::new(),
            dlc: Vec::new(),
        }
    }
}

impl<T: ItemTrait> Catalog<T> {
    pub fn new(base: Vec<T>) -> Self {
        Self {
            base,
            dlc: Vec::new(),
        }
    }

    pub fn with_dlc(base: Vec<T>, dlc: Vec<T>) -> Self {
        Self { base, dlc }
    }

    /// 本体在前、DLC 在后的完整列表
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.base.iter().chain(self.dlc.iter())
    }

    pub fn find(&self, name: &str) -> Option<&T> {
        resolve(self.iter(), name)
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.dlc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn items_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.base.iter_mut().chain(self.dlc.iter_mut())
    }
}

/// 单个目录的文件名配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub base: String,
    #[serde(default)]
    pub dlc: Option<String>,
}

impl CatalogFile {
    fn new(base: &str, dlc: Option<&str>) -> Self {
        Self {
            base: base.to_string(),
            dlc: dlc.map(str::to_string),
        }
    }
}

/// 全部目录的文件名配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFiles {
    pub armors: CatalogFile,
    pub weapons: CatalogFile,
    pub talismans: CatalogFile,
    pub sorceries: CatalogFile,
    pub incantations: CatalogFile,
}

impl Default for CatalogFiles {
    fn default() -> Self {
        Self {
            armors: CatalogFile::new("armors.json", Some("armorsdlc.json")),
            weapons: CatalogFile::new("weapons.json", Some("weaponsDLC.json")),
            talismans: CatalogFile::new("talismans.json", None),
            sorceries: CatalogFile::new("sorceries.json", None),
            incantations: CatalogFile::new("incantations.json", None),
        }
    }
}

/// 配装使用的全部物品目录（只读，由调用方注入）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    pub armors: Catalog<Armor>,
    pub weapons: Catalog<Weapon>,
    pub talismans: Catalog<Talisman>,
    pub sorceries: Catalog<Spell>,
    pub incantations: Catalog<Spell>,
}

impl Catalogs {
    pub fn new(
        armors: Catalog<Armor>,
        weapons: Catalog<Weapon>,
        talismans: Catalog<Talisman>,
        sorceries: Catalog<Spell>,
        incantations: Catalog<Spell>,
    ) -> Self {
        let mut catalogs = Self {
            armors,
            weapons,
            talismans,
            sorceries,
            incantations,
        };
        catalogs.stamp_schools();
        catalogs
    }

    /// 从目录文件夹加载 JSON 数据，DLC 文件不存在时视为空
    pub fn load_dir(dir: &Path, files: &CatalogFiles) -> Result<Self, PlannerError> {
        let catalogs = Self::new(
            load_catalog(dir, &files.armors)?,
            load_catalog(dir, &files.weapons)?,
            load_catalog(dir, &files.talismans)?,
            load_catalog(dir, &files.sorceries)?,
            load_catalog(dir, &files.incantations)?,
        );
        tracing::info!(
            armors = catalogs.armors.len(),
            weapons = catalogs.weapons.len(),
            talismans = catalogs.talismans.len(),
            spells = catalogs.sorceries.len() + catalogs.incantations.len(),
            "loaded catalogs from {}",
            dir.display()
        );
        Ok(catalogs)
    }

    pub fn armor(&self, name: &str) -> Option<&Armor> {
        self.armors.find(name)
    }

    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.find(name)
    }

    pub fn talisman(&self, name: &str) -> Option<&Talisman> {
        self.talismans.find(name)
    }

    /// 法术在巫术和祷告两个目录中查找，巫术在前
    pub fn spell(&self, name: &str) -> Option<&Spell> {
        resolve(self.sorceries.iter().chain(self.incantations.iter()), name)
    }

    fn stamp_schools(&mut self) {
        for spell in self.sorceries.items_mut() {
            spell.school = SpellSchool::Sorcery;
        }
        for spell in self.incantations.items_mut() {
            spell.school = SpellSchool::Incantation;
        }
    }
}

fn load_catalog<T>(dir: &Path, file: &CatalogFile) -> Result<Catalog<T>, PlannerError>
where
    T: ItemTrait + DeserializeOwned,
{
    let base = load_json(&dir.join(&file.base))?;
    let dlc = match &file.dlc {
        Some(name) => {
            let path = dir.join(name);
            if path.exists() {
                load_json(&path)?
            } else {
                tracing::debug!("optional catalog {} not found", path.display());
                Vec::new()
            }
        }
        None => Vec::new(),
    };
    Ok(Catalog::with_dlc(base, dlc))
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PlannerError> {
    let content = fs::read_to_string(path).map_err(|e| PlannerError::catalog(path, e))?;
    serde_json::from_str(&content).map_err(|e| PlannerError::catalog(path, e))
}
