//! Base - owner of a roster, a storage ledger and the transfers heading there

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::campaign::roster::Roster;
use crate::campaign::soldier::SoldierStatus;
use crate::core::types::{BaseId, SoldierId};
use crate::inventory::ResourceLedger;
use crate::operations::Operation;
use crate::rules::RuleCatalog;
use crate::scheduler::{CompletionPayload, DeferredScheduler};
use crate::transformation::apply_transformation;

/// A postponed transformation that finished this hour
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationFinished {
    pub soldier: SoldierId,
    pub soldier_name: String,
    pub rule_id: String,
}

/// What one hourly advance delivered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourReport {
    pub arrived_soldiers: Vec<SoldierId>,
    pub arrived_items: Vec<(String, u32)>,
    pub transformations_finished: Vec<TransformationFinished>,
}

impl HourReport {
    pub fn is_empty(&self) -> bool {
        self.arrived_soldiers.is_empty()
            && self.arrived_items.is_empty()
            && self.transformations_finished.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base {
    pub id: BaseId,
    pub name: String,
    pub roster: Roster,
    pub storage: ResourceLedger,
    pub operations: Vec<Operation>,
    /// Living-quarters capacity, decided by the facility layer
    pub available_quarters: u32,
    pub transfers: DeferredScheduler<CompletionPayload>,
}

impl Base {
    pub fn new(id: BaseId, name: impl Into<String>, available_quarters: u32) -> Self {
        Self {
            id,
            name: name.into(),
            roster: Roster::new(),
            storage: ResourceLedger::new(),
            operations: Vec::new(),
            available_quarters,
            transfers: DeferredScheduler::new(),
        }
    }

    /// Living soldiers at the base plus those travelling to it
    pub fn used_quarters(&self) -> u32 {
        (self.roster.count(SoldierStatus::Active) + self.roster.count(SoldierStatus::InTransit)) as u32
    }

    pub fn has_free_quarters(&self) -> bool {
        self.available_quarters > self.used_quarters()
    }

    pub fn add_operation(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Advance every transfer by one hour and apply the ones that complete
    pub fn advance_hour(&mut self, catalog: &RuleCatalog, rng: &mut impl Rng) -> HourReport {
        let mut report = HourReport::default();

        for payload in self.transfers.advance() {
            match payload {
                CompletionPayload::MaterializeSoldier(id) => match self.roster.get_mut(id) {
                    Some(soldier) => {
                        soldier.status = SoldierStatus::Active;
                        tracing::debug!("{} arrived at {}", soldier.name, self.name);
                        report.arrived_soldiers.push(id);
                    }
                    None => tracing::warn!("Transfer for missing {} dropped", id),
                },
                CompletionPayload::MaterializeItem { kind, quantity } => {
                    self.storage.add(&kind, quantity);
                    tracing::debug!("{} x{} arrived at {}", kind, quantity, self.name);
                    report.arrived_items.push((kind, quantity));
                }
                CompletionPayload::ResumeTransformation(postponed) => {
                    let Some(soldier) = self.roster.get_mut(postponed.soldier) else {
                        tracing::warn!("Postponed {} for missing {} dropped", postponed.rule.id, postponed.soldier);
                        continue;
                    };
                    match apply_transformation(soldier, &postponed.rule, &postponed.basis_type, catalog, rng) {
                        Ok(_) => {
                            tracing::info!("{} finished {}", soldier.name, postponed.rule.id);
                            report.transformations_finished.push(TransformationFinished {
                                soldier: soldier.id,
                                soldier_name: soldier.name.clone(),
                                rule_id: postponed.rule.id.clone(),
                            });
                        }
                        Err(e) => tracing::warn!("Postponed {} failed: {}", postponed.rule.id, e),
                    }
                }
            }
        }

        report
    }
}
