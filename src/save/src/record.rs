// src/save/src/record.rs
//! 配装记录的 JSON 布局
//!
//! 字段名和嵌套结构与已有存档保持一致：
//! `buildName, buildType, description, favoriteWeapon, equipment, talismans,
//! stats, weapons, spells, totalWeight, timestamp`。

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use stats::{Attribute, AttributeSet};

pub const RECORD_TALISMAN_SLOTS: usize = 4;
pub const RECORD_WEAPON_SLOTS: usize = 6;
pub const RECORD_SPELL_SLOTS: usize = 12;

/// 配装类型（未知取值原样保留）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildType {
    #[default]
    Unspecified,
    PvP,
    PvE,
    Both,
    Other(String),
}

impl From<String> for BuildType {
    fn from(value: String) -> Self {
        match value.trim() {
            "" => BuildType::Unspecified,
            "PvP" => BuildType::PvP,
            "PvE" => BuildType::PvE,
            "Both" => BuildType::Both,
            _ => BuildType::Other(value),
        }
    }
}

impl From<BuildType> for String {
    fn from(value: BuildType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Unspecified => Ok(()),
            BuildType::PvP => write!(f, "PvP"),
            BuildType::PvE => write!(f, "PvE"),
            BuildType::Both => write!(f, "Both"),
            BuildType::Other(other) => write!(f, "{other}"),
        }
    }
}

/// 护甲四个部位的物品名
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentRecord {
    pub head: Option<String>,
    pub chest: Option<String>,
    pub hands: Option<String>,
    pub legs: Option<String>,
}

/// 武器栏：`{ "name": ..., "infusion": ... }`，空栏两项都为 null
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponRecord {
    pub name: Option<String>,
    pub infusion: Option<String>,
}

impl WeaponRecord {
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty)
    }
}

/// `slot1..slotN` 形式的定长槽位表
#[derive(Debug, Clone, PartialEq)]
pub struct SlotMap<T, const N: usize>(pub [T; N]);

impl<T: Default, const N: usize> Default for SlotMap<T, N> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| T::default()))
    }
}

impl<T, const N: usize> SlotMap<T, N> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }
}

fn slot_index(key: &str, len: usize) -> Option<usize> {
    let n: usize = key.strip_prefix("slot")?.parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

impl<T: Serialize, const N: usize> Serialize for SlotMap<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(N))?;
        for (i, value) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("slot{}", i + 1), value)?;
        }
        map.end()
    }
}

struct SlotMapVisitor<T, const N: usize>(PhantomData<T>);

impl<'de, T, const N: usize> Visitor<'de> for SlotMapVisitor<T, N>
where
    T: Default + DeserializeOwned,
{
    type Value = SlotMap<T, N>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map with keys slot1..slot{N}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut slots = SlotMap::<T, N>::default();
        while let Some(key) = access.next_key::<String>()? {
            match slot_index(&key, N) {
                Some(i) => {
                    // null 与缺失等价
                    let value: Option<T> = access.next_value()?;
                    slots.0[i] = value.unwrap_or_default();
                }
                None => {
                    access.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(slots)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SlotMap::default())
    }
}

impl<'de, T, const N: usize> Deserialize<'de> for SlotMap<T, N>
where
    T: Default + DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SlotMapVisitor(PhantomData))
    }
}

/// 属性表，键为 `VIG`、`MIND` 等
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsRecord(pub AttributeSet);

impl Serialize for StatsRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        for (attribute, level) in self.0.iter() {
            map.serialize_entry(&attribute.to_string(), &level)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatsRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Map<String, Value>>::deserialize(deserializer)?;
        let mut attributes = AttributeSet::new();
        for (key, value) in raw.into_iter().flatten() {
            let Ok(attribute) = key.parse::<Attribute>() else {
                continue;
            };
            // 表单输入可能以字符串保存
            let level = match &value {
                Value::Number(n) => n.as_f64().map(|f| f as i32),
                Value::String(s) => s.trim().parse::<i32>().ok(),
                _ => None,
            };
            if let Some(level) = level {
                attributes.set(attribute, level);
            }
        }
        Ok(StatsRecord(attributes))
    }
}

/// 持久化的配装快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    #[serde(default)]
    pub build_name: String,
    #[serde(default)]
    pub build_type: BuildType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub favorite_weapon: String,
    #[serde(default)]
    pub equipment: EquipmentRecord,
    #[serde(default)]
    pub talismans: SlotMap<Option<String>, RECORD_TALISMAN_SLOTS>,
    #[serde(default)]
    pub stats: StatsRecord,
    #[serde(default)]
    pub weapons: SlotMap<WeaponRecord, RECORD_WEAPON_SLOTS>,
    #[serde(default)]
    pub spells: SlotMap<Option<String>, RECORD_SPELL_SLOTS>,
    #[serde(default)]
    pub total_weight: f64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// 宽松解析保存时间：RFC 3339 字符串或毫秒时间戳，其余一律视为未知
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

impl BuildRecord {
    /// 角色等级
    pub fn level(&self) -> i32 {
        self.stats.0.character_level()
    }
}
