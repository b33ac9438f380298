//! OperationDraft - the team and equipment being put together for a covert operation
//!
//! Staging an item moves it out of base storage straight away, so two drafts
//! can never promise the same unit. A draft is either committed, which moves
//! every staged item into the new [`Operation`], or cancelled, which returns
//! them all.

use serde::{Deserialize, Serialize};

use crate::campaign::{psi_unlocked, Base, Campaign, Soldier};
use crate::core::error::{ProjectError, Result, ValidationError};
use crate::core::types::{OperationId, SoldierId};
use crate::inventory::ResourceLedger;
use crate::operations::cost::compute_cost;
use crate::operations::odds::{compute_odds, OddsContext};
use crate::operations::operation::Operation;
use crate::rules::{ItemInfo, OperationRule, RuleCatalog};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDraft {
    pub rule_id: String,
    soldiers: Vec<SoldierId>,
    staged: ResourceLedger,
}

impl OperationDraft {
    pub fn new(rule_id: impl Into<String>) -> Self {
        Self { rule_id: rule_id.into(), ..Default::default() }
    }

    pub fn soldiers(&self) -> &[SoldierId] {
        &self.soldiers
    }

    pub fn staged(&self) -> &ResourceLedger {
        &self.staged
    }

    /// Assign an idle soldier of the base; assigning twice is a no-op
    pub fn add_soldier(&mut self, base: &Base, id: SoldierId) -> Result<()> {
        let soldier = base.roster.get(id).ok_or(ProjectError::UnknownSoldier(id))?;
        if !soldier.is_available() {
            return Err(ValidationError::SoldierUnavailable(id).into());
        }
        if !self.soldiers.contains(&id) {
            self.soldiers.push(id);
            tracing::debug!("{} assigned to {}", soldier.name, self.rule_id);
        }
        Ok(())
    }

    pub fn remove_soldier(&mut self, id: SoldierId) -> bool {
        let before = self.soldiers.len();
        self.soldiers.retain(|&s| s != id);
        self.soldiers.len() != before
    }

    /// Move items from base storage into the draft
    pub fn stage_item(&mut self, base: &mut Base, catalog: &RuleCatalog, kind: &str, quantity: u32) -> Result<()> {
        if catalog.item_info(kind).is_none() {
            return Err(ProjectError::UnknownItem(kind.to_string()));
        }
        let available = base.storage.get(kind);
        if quantity == 0 || available < quantity {
            return Err(ValidationError::NothingToStage {
                item: kind.to_string(),
                requested: quantity,
                available,
            }
            .into());
        }
        base.storage.transfer_to(&mut self.staged, kind, quantity)?;
        tracing::debug!("Staged {} x{} for {}", kind, quantity, self.rule_id);
        Ok(())
    }

    /// Return staged items to base storage
    pub fn unstage_item(&mut self, base: &mut Base, kind: &str, quantity: u32) -> Result<()> {
        self.staged.transfer_to(&mut base.storage, kind, quantity)?;
        tracing::debug!("Unstaged {} x{} from {}", kind, quantity, self.rule_id);
        Ok(())
    }

    /// Abandon the draft, returning every staged item to base storage
    pub fn cancel(&mut self, base: &mut Base) {
        if !self.staged.is_empty() {
            tracing::debug!("Returning {} staged items to {}", self.staged.total_quantity(), base.name);
        }
        self.staged.drain_into(&mut base.storage);
        self.soldiers.clear();
    }

    /// Assigned soldiers still in the roster
    pub fn team<'a>(&self, base: &'a Base) -> Vec<&'a Soldier> {
        self.soldiers.iter().filter_map(|&id| base.roster.get(id)).collect()
    }

    fn context<'a>(catalog: &'a RuleCatalog, campaign: &Campaign) -> OddsContext<'a> {
        OddsContext {
            catalog,
            difficulty: campaign.difficulty,
            psi_unlocked: psi_unlocked(catalog, &campaign.research),
        }
    }

    /// Live odds for the current team and staged items
    pub fn odds(&self, base: &Base, catalog: &RuleCatalog, campaign: &Campaign) -> Result<f64> {
        let rule = catalog.operation_rule(&self.rule_id)?;
        Ok(compute_odds(rule, &self.team(base), &self.staged, &Self::context(catalog, campaign)))
    }

    /// Live duration in hours for the current odds
    pub fn cost(&self, base: &Base, catalog: &RuleCatalog, campaign: &Campaign) -> Result<i32> {
        let rule = catalog.operation_rule(&self.rule_id)?;
        Ok(compute_cost(rule, self.odds(base, catalog, campaign)?))
    }

    /// Check the team is large enough and every required item is staged in full
    pub fn validate(&self, rule: &OperationRule) -> std::result::Result<(), ValidationError> {
        if self.soldiers.len() < rule.soldier_slots {
            return Err(ValidationError::NotEnoughSoldiers {
                required: rule.soldier_slots,
                assigned: self.soldiers.len(),
            });
        }
        for (kind, &required) in &rule.required_items {
            let staged = self.staged.get(kind);
            if staged < required {
                return Err(ValidationError::MissingRequiredItem {
                    item: kind.clone(),
                    required,
                    staged,
                });
            }
        }
        Ok(())
    }

    pub fn can_start(&self, rule: &OperationRule) -> bool {
        self.validate(rule).is_ok()
    }

    /// Equipment screen is reachable once anything is in the draft
    pub fn equipment_selectable(&self) -> bool {
        !self.soldiers.is_empty() || self.staged.total_quantity() > 0
    }

    pub fn armor_selectable(&self) -> bool {
        !self.soldiers.is_empty()
    }

    /// Start the operation at the base
    ///
    /// On success the draft is left empty and the staged items belong to the
    /// new operation. On failure nothing changes.
    pub fn commit(&mut self, base: &mut Base, catalog: &RuleCatalog, campaign: &mut Campaign) -> Result<OperationId> {
        let rule = catalog.operation_rule(&self.rule_id)?;
        campaign.check_attempt(rule)?;
        self.validate(rule)?;
        for &id in &self.soldiers {
            let soldier = base.roster.get(id).ok_or(ProjectError::UnknownSoldier(id))?;
            if !soldier.is_available() {
                return Err(ValidationError::SoldierUnavailable(id).into());
            }
        }

        let ctx = Self::context(catalog, campaign);
        let odds = compute_odds(rule, &self.team(base), &self.staged, &ctx);
        let cost = compute_cost(rule, odds);

        let mut operation = Operation::new(rule.id.clone(), base.id, cost, odds.round() as i32);
        self.staged.drain_into(&mut operation.items);
        let has_psi_items = operation
            .items
            .iter()
            .any(|(kind, _)| catalog.item_info(kind).is_some_and(ItemInfo::is_psionic));

        let mut has_psionics = false;
        for &id in &self.soldiers {
            if let Some(soldier) = base.roster.get_mut(id) {
                soldier.covert_operation = Some(operation.id);
                soldier.craft = None;
                soldier.return_to_training = soldier.training_mode();
                soldier.in_training = false;
                soldier.in_psi_training = false;
                has_psionics |= soldier.current_stats.psi_skill > 0;
            }
        }
        operation.soldiers = std::mem::take(&mut self.soldiers);
        operation.is_psi = has_psionics && has_psi_items && ctx.psi_unlocked;

        campaign.record_performed(rule.id.clone());
        tracing::info!(
            "Operation {} started at {}: {}% odds, {} hours{}",
            rule.id,
            base.name,
            operation.chances,
            operation.cost,
            if operation.is_psi { ", psionic" } else { "" }
        );

        let id = operation.id;
        base.add_operation(operation);
        Ok(id)
    }
}
