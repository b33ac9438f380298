//! Soldier types and soldier bonuses

use serde::{Deserialize, Serialize};

use crate::stats::StatBlock;

/// A kind of soldier: its initial stat range, caps and default kit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoldierType {
    pub id: String,
    /// Lower bound of freshly recruited stats
    pub min_stats: StatBlock,
    /// Upper bound of freshly recruited stats
    pub max_stats: StatBlock,
    /// Hard ceiling no training or transformation may exceed
    pub stat_caps: StatBlock,
    pub default_armor: String,
}

impl SoldierType {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }
}

/// A flat stat bonus a soldier carries once granted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoldierBonus {
    pub id: String,
    pub stats: StatBlock,
}
