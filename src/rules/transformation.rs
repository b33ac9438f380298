//! Soldier transformation rules

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::{StatBlock, StatFlags};

/// Immutable definition of a soldier transformation project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationRule {
    pub id: String,
    /// Funds paid up front
    pub cost: i64,
    /// Hours before a produced soldier or item arrives
    pub transfer_time: i32,
    /// Hours before the stat change lands; positive values postpone it
    pub transformation_time: i32,
    /// Days the soldier spends recovering afterwards
    pub recovery_time: i32,
    pub required_items: BTreeMap<String, u32>,

    pub creates_clone: bool,
    pub allows_live_soldiers: bool,
    pub allows_dead_soldiers: bool,
    /// Retire the soldier into this item instead of transforming
    pub produced_item: Option<String>,
    /// Soldier type of the result; defaults to the source's own type
    pub produced_soldier_type: Option<String>,
    pub soldier_bonus_type: Option<String>,

    /// Soldier types that may undergo this; empty means any
    pub allowed_soldier_types: Vec<String>,
    /// Transformations the soldier must already have completed
    pub required_previous_transformations: Vec<String>,

    /// Stats redrawn from the target type's initial range on completion
    pub reroll_stats: StatFlags,
    pub flat_min: StatBlock,
    pub flat_max: StatBlock,
    pub percent_min: StatBlock,
    pub percent_max: StatBlock,
    pub percent_gained_min: StatBlock,
    pub percent_gained_max: StatBlock,
    /// Preview shows min and max as separate rows
    pub show_min_max: bool,
}

impl Default for TransformationRule {
    fn default() -> Self {
        Self {
            id: String::new(),
            cost: 0,
            transfer_time: 0,
            transformation_time: 0,
            recovery_time: 0,
            required_items: BTreeMap::new(),
            creates_clone: false,
            allows_live_soldiers: true,
            allows_dead_soldiers: false,
            produced_item: None,
            produced_soldier_type: None,
            soldier_bonus_type: None,
            allowed_soldier_types: Vec::new(),
            required_previous_transformations: Vec::new(),
            reroll_stats: StatFlags::new(),
            flat_min: StatBlock::default(),
            flat_max: StatBlock::default(),
            percent_min: StatBlock::default(),
            percent_max: StatBlock::default(),
            percent_gained_min: StatBlock::default(),
            percent_gained_max: StatBlock::default(),
            show_min_max: false,
        }
    }
}

impl TransformationRule {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    /// Retire outcome: the soldier becomes an item
    pub fn produces_item(&self) -> bool {
        self.produced_item.is_some()
    }

    /// Stat change waits for `transformation_time` hours
    pub fn is_postponed(&self) -> bool {
        self.transformation_time > 0
    }

    /// Stats whose configured change range is not a single value
    pub fn random_stats(&self) -> StatFlags {
        StatBlock::random_stats(&self.flat_min, &self.flat_max)
            .union(StatBlock::random_stats(&self.percent_min, &self.percent_max))
            .union(StatBlock::random_stats(&self.percent_gained_min, &self.percent_gained_max))
    }
}
