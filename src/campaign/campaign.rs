//! Campaign-wide state: funds, difficulty, research and performed operations

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::ProjectError;
use crate::core::types::Difficulty;
use crate::rules::{OperationRule, RuleCatalog};

/// Answers whether a research topic is unlocked
pub trait UnlockProvider {
    fn is_researched(&self, topic: &str) -> bool;
}

/// Set of completed research topics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Research {
    topics: AHashSet<String>,
}

impl Research {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complete(&mut self, topic: impl Into<String>) {
        self.topics.insert(topic.into());
    }
}

impl UnlockProvider for Research {
    fn is_researched(&self, topic: &str) -> bool {
        self.topics.contains(topic)
    }
}

/// Psionic offence is unlocked (no requirement counts as unlocked)
pub fn psi_unlocked(catalog: &RuleCatalog, unlocks: &dyn UnlockProvider) -> bool {
    catalog
        .psi_requirements()
        .map_or(true, |topic| unlocks.is_researched(topic))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Campaign {
    pub funds: i64,
    pub difficulty: Difficulty,
    pub research: Research,
    performed_operations: AHashSet<String>,
}

impl Campaign {
    pub fn new(funds: i64, difficulty: Difficulty) -> Self {
        Self { funds, difficulty, ..Default::default() }
    }

    pub fn is_performed(&self, rule_id: &str) -> bool {
        self.performed_operations.contains(rule_id)
    }

    pub fn record_performed(&mut self, rule_id: impl Into<String>) {
        self.performed_operations.insert(rule_id.into());
    }

    /// Refuse a non-repeatable operation that already ran
    pub fn check_attempt(&self, rule: &OperationRule) -> Result<(), ProjectError> {
        if !rule.repeatable && self.is_performed(&rule.id) {
            return Err(ProjectError::DuplicateAttempt(rule.id.clone()));
        }
        Ok(())
    }
}
