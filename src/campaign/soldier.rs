//! Soldier - the roster entity both projects read and mutate

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{OperationId, SoldierId};
use crate::rules::RuleCatalog;
use crate::stats::StatBlock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Where a soldier currently is in the roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoldierStatus {
    /// Living at the base
    #[default]
    Active,
    /// On the way to the base; arrives when its transfer completes
    InTransit,
    /// Recorded on the memorial
    Deceased,
}

/// Training a soldier resumes once its covert operation is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingMode {
    Martial,
    Psi,
    Both,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Soldier {
    pub id: SoldierId,
    pub name: String,
    pub soldier_type: String,
    pub armor: String,
    pub nationality: Option<String>,
    pub gender: Gender,
    pub look: u8,
    pub look_variant: u8,
    /// Best rank over all of the soldier's roles
    pub rank: i32,
    pub current_stats: StatBlock,
    pub mana_missing: i32,
    /// Soldier bonus ids granted so far
    pub bonuses: Vec<String>,
    pub status: SoldierStatus,

    pub craft: Option<String>,
    pub in_training: bool,
    pub in_psi_training: bool,
    pub return_to_training: Option<TrainingMode>,
    pub covert_operation: Option<OperationId>,

    /// Rule id of a transformation waiting for its delay to elapse
    pub pending_transformation: Option<String>,
    pub recovery_days: i32,
    /// Completed transformations, by rule id
    pub transformation_history: BTreeMap<String, u32>,
}

impl Soldier {
    pub fn new(name: impl Into<String>, soldier_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            soldier_type: soldier_type.into(),
            ..Default::default()
        }
    }

    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.current_stats = stats;
        self
    }

    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_armor(mut self, armor: impl Into<String>) -> Self {
        self.armor = armor.into();
        self
    }

    pub fn with_status(mut self, status: SoldierStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.status == SoldierStatus::Deceased
    }

    /// Current stats plus every granted soldier bonus
    pub fn stats_with_all_bonuses(&self, catalog: &RuleCatalog) -> StatBlock {
        self.current_stats + catalog.bonus_stats(&self.bonuses)
    }

    /// Which training the soldier is in right now
    pub fn training_mode(&self) -> Option<TrainingMode> {
        match (self.in_training, self.in_psi_training) {
            (true, true) => Some(TrainingMode::Both),
            (true, false) => Some(TrainingMode::Martial),
            (false, true) => Some(TrainingMode::Psi),
            (false, false) => None,
        }
    }

    /// Idle at the base: free to join a covert operation
    pub fn is_available(&self) -> bool {
        self.status == SoldierStatus::Active
            && self.covert_operation.is_none()
            && self.pending_transformation.is_none()
    }

    /// Drop craft and training assignments
    pub fn clear_base_duty(&mut self) {
        self.craft = None;
        self.in_training = false;
        self.in_psi_training = false;
    }

    pub fn completed_transformation(&self, rule_id: &str) -> bool {
        self.transformation_history.get(rule_id).copied().unwrap_or(0) > 0
    }
}
