//! Who may undergo a transformation, and whether the base can pay for it

use crate::campaign::{Base, Campaign, Soldier, SoldierStatus};
use crate::core::error::ValidationError;
use crate::rules::TransformationRule;

/// Whether the rule accepts this soldier at all
///
/// Covers state and history only; funds, items and quarters are checked by
/// [`check_transformation`].
pub fn check_eligibility(rule: &TransformationRule, soldier: &Soldier) -> Result<(), ValidationError> {
    if soldier.pending_transformation.is_some() {
        return Err(ValidationError::TransformationPending(soldier.id));
    }
    if soldier.is_dead() && !rule.allows_dead_soldiers {
        return Err(ValidationError::NotEligible(format!("{} does not accept dead soldiers", rule.id)));
    }
    if !soldier.is_dead() && !rule.allows_live_soldiers {
        return Err(ValidationError::NotEligible(format!("{} does not accept live soldiers", rule.id)));
    }
    if soldier.status == SoldierStatus::InTransit {
        return Err(ValidationError::NotEligible(format!("{} is in transit", soldier.name)));
    }
    if soldier.covert_operation.is_some() {
        return Err(ValidationError::NotEligible(format!("{} is on a covert operation", soldier.name)));
    }
    if !rule.allowed_soldier_types.is_empty() && !rule.allowed_soldier_types.contains(&soldier.soldier_type) {
        return Err(ValidationError::NotEligible(format!(
            "{} does not accept {}",
            rule.id, soldier.soldier_type
        )));
    }
    if let Some(missing) = rule
        .required_previous_transformations
        .iter()
        .find(|prev| !soldier.completed_transformation(prev))
    {
        return Err(ValidationError::NotEligible(format!("{} requires {} first", rule.id, missing)));
    }
    Ok(())
}

pub fn is_eligible(rule: &TransformationRule, soldier: &Soldier) -> bool {
    check_eligibility(rule, soldier).is_ok()
}

/// Every precondition of committing the rule on this soldier
pub fn check_transformation(
    rule: &TransformationRule,
    soldier: &Soldier,
    base: &Base,
    campaign: &Campaign,
) -> Result<(), ValidationError> {
    check_eligibility(rule, soldier)?;

    if campaign.funds < rule.cost {
        return Err(ValidationError::InsufficientFunds {
            required: rule.cost,
            available: campaign.funds,
        });
    }

    if let Some(shortfall) = base
        .storage
        .first_shortfall(rule.required_items.iter().map(|(kind, &n)| (kind.as_str(), n)))
    {
        return Err(shortfall);
    }

    // Clones and revived soldiers need a bed
    let adds_occupant = rule.creates_clone || (soldier.is_dead() && rule.allows_dead_soldiers);
    if !rule.produces_item() && adds_occupant {
        let used = base.used_quarters();
        if base.available_quarters <= used {
            return Err(ValidationError::InsufficientQuarters {
                used,
                available: base.available_quarters,
            });
        }
    }

    Ok(())
}
