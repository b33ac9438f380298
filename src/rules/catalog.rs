//! RuleCatalog - read-only store of every rule the project engines consult
//!
//! Loaded once from TOML (or JSON) and never mutated by the engines. All
//! cross references are checked at load time, so an engine that finds a rule
//! can trust the items, soldier types and bonuses it names.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{CatalogError, ProjectError};
use crate::rules::item::ItemInfo;
use crate::rules::operation::OperationRule;
use crate::rules::soldier_type::{SoldierBonus, SoldierType};
use crate::rules::transformation::TransformationRule;
use crate::stats::StatBlock;

/// Catalog of operation and transformation rules plus the metadata they reference
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    operations: AHashMap<String, OperationRule>,
    transformations: AHashMap<String, TransformationRule>,
    items: AHashMap<String, ItemInfo>,
    armors: AHashSet<String>,
    soldier_types: AHashMap<String, SoldierType>,
    soldier_bonuses: AHashMap<String, SoldierBonus>,
    /// Research topic gating psionic offence; none means always unlocked
    psi_requirements: Option<String>,
    mana_feature_enabled: bool,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_operation(&mut self, rule: OperationRule) {
        self.operations.insert(rule.id.clone(), rule);
    }

    pub fn add_transformation(&mut self, rule: TransformationRule) {
        self.transformations.insert(rule.id.clone(), rule);
    }

    pub fn add_item(&mut self, item: ItemInfo) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn add_armor(&mut self, armor: impl Into<String>) {
        self.armors.insert(armor.into());
    }

    pub fn add_soldier_type(&mut self, soldier_type: SoldierType) {
        self.soldier_types.insert(soldier_type.id.clone(), soldier_type);
    }

    pub fn add_soldier_bonus(&mut self, bonus: SoldierBonus) {
        self.soldier_bonuses.insert(bonus.id.clone(), bonus);
    }

    pub fn set_psi_requirements(&mut self, topic: Option<String>) {
        self.psi_requirements = topic;
    }

    pub fn set_mana_feature_enabled(&mut self, enabled: bool) {
        self.mana_feature_enabled = enabled;
    }

    pub fn operation_rule(&self, id: &str) -> Result<&OperationRule, ProjectError> {
        self.operations
            .get(id)
            .ok_or_else(|| ProjectError::UnknownRule(id.to_string()))
    }

    pub fn transformation_rule(&self, id: &str) -> Result<&TransformationRule, ProjectError> {
        self.transformations
            .get(id)
            .ok_or_else(|| ProjectError::UnknownRule(id.to_string()))
    }

    pub fn item_info(&self, kind: &str) -> Option<&ItemInfo> {
        self.items.get(kind)
    }

    pub fn soldier_type(&self, id: &str) -> Option<&SoldierType> {
        self.soldier_types.get(id)
    }

    pub fn soldier_bonus(&self, id: &str) -> Option<&SoldierBonus> {
        self.soldier_bonuses.get(id)
    }

    pub fn has_armor(&self, armor: &str) -> bool {
        self.armors.contains(armor)
    }

    pub fn psi_requirements(&self) -> Option<&str> {
        self.psi_requirements.as_deref()
    }

    pub fn is_mana_feature_enabled(&self) -> bool {
        self.mana_feature_enabled
    }

    /// Sum of the named soldier bonuses; unknown names contribute nothing
    pub fn bonus_stats<'a>(&self, bonuses: impl IntoIterator<Item = &'a String>) -> StatBlock {
        bonuses
            .into_iter()
            .filter_map(|id| self.soldier_bonus(id))
            .fold(StatBlock::default(), |acc, bonus| acc + bonus.stats)
    }

    /// Operation rule ids, sorted
    pub fn operation_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Transformation rule ids, sorted
    pub fn transformation_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.transformations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    /// Parse a catalog from a JSON string
    pub fn parse_json(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.psi_requirements = file.psi_requirements;
        catalog.mana_feature_enabled = file.mana_feature_enabled;

        for armor in file.armors {
            catalog.add_armor(armor);
        }
        for item in file.items {
            if catalog.items.contains_key(&item.id) {
                return Err(CatalogError::DuplicateRule(item.id));
            }
            catalog.add_item(item);
        }
        for soldier_type in file.soldier_types {
            if catalog.soldier_types.contains_key(&soldier_type.id) {
                return Err(CatalogError::DuplicateRule(soldier_type.id));
            }
            catalog.add_soldier_type(soldier_type);
        }
        for bonus in file.soldier_bonuses {
            catalog.add_soldier_bonus(bonus);
        }
        for rule in file.operations {
            if catalog.operations.contains_key(&rule.id) {
                return Err(CatalogError::DuplicateRule(rule.id));
            }
            catalog.add_operation(rule);
        }
        for rule in file.transformations {
            if catalog.transformations.contains_key(&rule.id) {
                return Err(CatalogError::DuplicateRule(rule.id));
            }
            catalog.add_transformation(rule);
        }

        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every reference a rule makes resolves inside the catalog
    pub fn validate(&self) -> Result<(), CatalogError> {
        let dangling = |rule: &str, kind: &'static str, name: &str| CatalogError::DanglingReference {
            rule: rule.to_string(),
            kind,
            name: name.to_string(),
        };

        for soldier_type in self.soldier_types.values() {
            if !soldier_type.default_armor.is_empty() && !self.has_armor(&soldier_type.default_armor) {
                return Err(dangling(&soldier_type.id, "armor", &soldier_type.default_armor));
            }
        }

        for rule in self.operations.values() {
            for item in rule.required_items.keys().chain(rule.bonus_items.keys()) {
                if !self.items.contains_key(item) {
                    return Err(dangling(&rule.id, "item", item));
                }
            }
            for armor in &rule.allowed_armor {
                if !self.has_armor(armor) {
                    return Err(dangling(&rule.id, "armor", armor));
                }
            }
            for soldier_type in rule.soldier_type_effectiveness.keys() {
                if !self.soldier_types.contains_key(soldier_type) {
                    return Err(dangling(&rule.id, "soldier type", soldier_type));
                }
            }
        }

        for rule in self.transformations.values() {
            for item in rule.required_items.keys().chain(rule.produced_item.iter()) {
                if !self.items.contains_key(item) {
                    return Err(dangling(&rule.id, "item", item));
                }
            }
            for soldier_type in rule.allowed_soldier_types.iter().chain(rule.produced_soldier_type.iter()) {
                if !self.soldier_types.contains_key(soldier_type) {
                    return Err(dangling(&rule.id, "soldier type", soldier_type));
                }
            }
            if let Some(bonus) = &rule.soldier_bonus_type {
                if !self.soldier_bonuses.contains_key(bonus) {
                    return Err(dangling(&rule.id, "soldier bonus", bonus));
                }
            }
            for previous in &rule.required_previous_transformations {
                if !self.transformations.contains_key(previous) {
                    return Err(dangling(&rule.id, "transformation", previous));
                }
            }
        }

        Ok(())
    }
}

/// On-disk layout of a catalog file
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct CatalogFile {
    psi_requirements: Option<String>,
    mana_feature_enabled: bool,
    armors: Vec<String>,
    items: Vec<ItemInfo>,
    soldier_types: Vec<SoldierType>,
    soldier_bonuses: Vec<SoldierBonus>,
    operations: Vec<OperationRule>,
    transformations: Vec<TransformationRule>,
}
