//! Covert operation rules

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable definition of a covert operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationRule {
    pub id: String,
    /// Starting odds before any modifier (percent)
    pub base_chances: i32,
    /// Soldiers that must be assigned before the operation may start
    pub soldier_slots: usize,
    /// Extra slots beyond the required ones
    pub optional_soldier_slots: usize,
    /// Odds lost per empty optional slot
    pub optional_soldier_effect: i32,
    /// Items that must be staged before the operation may start
    pub required_items: BTreeMap<String, u32>,
    /// Items that raise the odds; each missing unit costs `bonus_items_effect`
    pub bonus_items: BTreeMap<String, u32>,
    pub bonus_items_effect: i32,
    /// Armor kinds suited to the operation; empty means unrestricted
    pub allowed_armor: Vec<String>,
    /// Odds lost per soldier wearing unsuited armor
    pub allowed_armor_effect: i32,
    /// Per soldier-type effectiveness in percent (default 100)
    pub soldier_type_effectiveness: BTreeMap<String, i32>,
    /// Base duration in hours
    pub costs: i32,
    /// Odds lost when not all equipment is concealable, and per heavy weapon
    pub concealed_items_bonus: i32,
    /// Skip the equipment category penalty entirely
    pub allow_all_equipment: bool,
    /// May be started again after it was performed once
    pub repeatable: bool,
}

impl OperationRule {
    pub fn new(id: impl Into<String>, base_chances: i32) -> Self {
        Self { id: id.into(), base_chances, ..Default::default() }
    }

    pub fn effectiveness_of(&self, soldier_type: &str) -> Option<i32> {
        self.soldier_type_effectiveness.get(soldier_type).copied()
    }

    pub fn allows_armor(&self, armor: &str) -> bool {
        self.allowed_armor.iter().any(|a| a == armor)
    }
}
