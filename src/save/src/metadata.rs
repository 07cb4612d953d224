// src/save/src/metadata.rs
use build::Selections;
use error::PlannerError;

use crate::record::BuildType;

/// 保存时填写的配装信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildMetadata {
    pub build_name: String,
    pub build_type: BuildType,
    pub description: String,
    /// 空字符串表示未选择
    pub favorite_weapon: String,
}

impl BuildMetadata {
    pub fn new(build_name: &str) -> Self {
        Self {
            build_name: build_name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_favorite_weapon(mut self, weapon: &str) -> Self {
        self.favorite_weapon = weapon.to_string();
        self
    }

    /// 名称和描述去掉首尾空白
    pub fn normalized(&self) -> Self {
        Self {
            build_name: self.build_name.trim().to_string(),
            build_type: self.build_type.clone(),
            description: self.description.trim().to_string(),
            favorite_weapon: self.favorite_weapon.clone(),
        }
    }

    /// 名称不能为空；收藏武器必须是武器栏中的某把武器
    pub fn validate(&self, selections: &Selections) -> Result<(), PlannerError> {
        if self.build_name.trim().is_empty() {
            return Err(PlannerError::MissingBuildName);
        }
        if !self.favorite_weapon.is_empty() {
            let equipped = selections
                .weapons
                .iter()
                .any(|(_, w)| w.weapon.name == self.favorite_weapon);
            if !equipped {
                return Err(PlannerError::InvalidFavoriteWeapon(
                    self.favorite_weapon.clone(),
                ));
            }
        }
        Ok(())
    }
}
