//! Committing a transformation: the clone, in-place and retire transitions
//!
//! Every check runs before the first mutation. Once funds and items are
//! paid the transition cannot fail, so a rejected commit leaves the base,
//! its roster and the campaign exactly as they were.

use rand::Rng;

use crate::campaign::{Base, Campaign, Soldier, SoldierStatus};
use crate::core::config::config;
use crate::core::error::{ProjectError, Result};
use crate::core::types::SoldierId;
use crate::rules::{RuleCatalog, TransformationRule};
use crate::scheduler::{CompletionPayload, PostponedTransformation};
use crate::transformation::complete::apply_transformation;
use crate::transformation::eligibility::check_transformation;

/// Choices the player makes on the transformation screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// New name for the result; keeps the source's name when empty
    pub name: Option<String>,
}

impl PlayerInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()) }
    }

    fn chosen_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// How a committed transformation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// A new soldier was created; the source is untouched
    Cloned { clone: SoldierId, postponed: bool },
    /// The source soldier itself was changed
    Transformed { soldier: SoldierId, postponed: bool },
    /// The source soldier is gone and an item is on its way
    Retired { item: String },
}

/// Run a transformation rule on a soldier of the base
pub fn commit_transformation(
    rule_id: &str,
    soldier_id: SoldierId,
    base: &mut Base,
    campaign: &mut Campaign,
    catalog: &RuleCatalog,
    input: &PlayerInput,
    rng: &mut impl Rng,
) -> Result<TransitionOutcome> {
    let rule = catalog.transformation_rule(rule_id)?;
    let source = base
        .roster
        .get(soldier_id)
        .ok_or(ProjectError::UnknownSoldier(soldier_id))?;
    check_transformation(rule, source, base, campaign)?;

    if !rule.produces_item() {
        for type_id in std::iter::once(&source.soldier_type).chain(rule.produced_soldier_type.iter()) {
            if catalog.soldier_type(type_id).is_none() {
                return Err(ProjectError::UnknownSoldierType(type_id.clone()));
            }
        }
    }
    let basis_type = source.soldier_type.clone();

    base.storage
        .consume_materials(rule.required_items.iter().map(|(kind, &n)| (kind.as_str(), n)))?;
    campaign.funds -= rule.cost;

    if let Some(item) = &rule.produced_item {
        return Ok(retire(rule, item, soldier_id, base));
    }

    let (target, outcome) = if rule.creates_clone {
        let clone = spawn_clone(rule, soldier_id, base, catalog, input);
        (clone, TransitionOutcome::Cloned { clone, postponed: rule.is_postponed() })
    } else {
        transform_in_place(rule, soldier_id, base, input);
        (soldier_id, TransitionOutcome::Transformed { soldier: soldier_id, postponed: rule.is_postponed() })
    };

    if rule.is_postponed() {
        if let Some(soldier) = base.roster.get_mut(target) {
            soldier.pending_transformation = Some(rule.id.clone());
        }
        base.transfers.schedule(
            rule.transformation_time,
            CompletionPayload::ResumeTransformation(PostponedTransformation {
                rule: rule.clone(),
                soldier: target,
                basis_type,
            }),
        );
        tracing::info!("{} postponed {} hours for {}", rule.id, rule.transformation_time, target);
    } else if let Some(soldier) = base.roster.get_mut(target) {
        apply_transformation(soldier, rule, &basis_type, catalog, rng)?;
        tracing::info!("{} applied to {}", rule.id, soldier.name);
    }

    Ok(outcome)
}

fn soldier_transfer_hours(rule: &TransformationRule) -> i32 {
    if rule.transfer_time > 0 {
        rule.transfer_time
    } else {
        config().default_soldier_transfer_hours
    }
}

fn retire(rule: &TransformationRule, item: &str, soldier_id: SoldierId, base: &mut Base) -> TransitionOutcome {
    if let Some(soldier) = base.roster.remove(soldier_id) {
        tracing::info!("{} retired into {} by {}", soldier.name, item, rule.id);
    }
    let delay = if rule.transfer_time > 0 {
        rule.transfer_time
    } else {
        config().default_item_transfer_hours
    };
    base.transfers.schedule(
        delay,
        CompletionPayload::MaterializeItem { kind: item.to_string(), quantity: 1 },
    );
    TransitionOutcome::Retired { item: item.to_string() }
}

fn spawn_clone(
    rule: &TransformationRule,
    source_id: SoldierId,
    base: &mut Base,
    catalog: &RuleCatalog,
    input: &PlayerInput,
) -> SoldierId {
    let Some(source) = base.roster.get(source_id) else {
        return source_id;
    };
    let clone_type = rule.produced_soldier_type.clone().unwrap_or_else(|| source.soldier_type.clone());
    let armor = catalog
        .soldier_type(&clone_type)
        .map(|t| t.default_armor.clone())
        .unwrap_or_default();

    let mut clone = Soldier::new(input.chosen_name().unwrap_or(&source.name), clone_type.clone())
        .with_armor(armor)
        .with_stats(source.current_stats)
        .with_status(SoldierStatus::InTransit);
    clone.gender = source.gender;
    clone.look = source.look;
    clone.look_variant = source.look_variant;
    if clone_type == source.soldier_type {
        clone.nationality = source.nationality.clone();
    }

    let clone_name = clone.name.clone();
    let clone_id = base.roster.spawn(clone);
    base.transfers
        .schedule(soldier_transfer_hours(rule), CompletionPayload::MaterializeSoldier(clone_id));
    tracing::info!("{} cloned from {} by {}", clone_name, source_id, rule.id);
    clone_id
}

fn transform_in_place(rule: &TransformationRule, soldier_id: SoldierId, base: &mut Base, input: &PlayerInput) {
    let Some(soldier) = base.roster.get_mut(soldier_id) else {
        return;
    };
    if let Some(name) = input.chosen_name() {
        soldier.name = name.to_string();
    }
    soldier.clear_base_duty();

    let transfer = if soldier.is_dead() {
        tracing::info!("{} revived by {}", soldier.name, rule.id);
        Some(soldier_transfer_hours(rule))
    } else if rule.transfer_time > 0 {
        Some(rule.transfer_time)
    } else {
        None
    };

    if let Some(hours) = transfer {
        soldier.status = SoldierStatus::InTransit;
        base.transfers.schedule(hours, CompletionPayload::MaterializeSoldier(soldier_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BaseId, Difficulty};
    use crate::rules::{ItemInfo, SoldierType};
    use crate::stats::StatBlock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> RuleCatalog {
        let mut catalog = RuleCatalog::new();
        catalog.add_item(ItemInfo::new("STR_ELERIUM_115"));
        catalog.add_item(ItemInfo::new("STR_CORPSE"));
        catalog.add_soldier_type(SoldierType {
            stat_caps: StatBlock { firing: 120, ..Default::default() },
            default_armor: "STR_NONE_UC".into(),
            ..SoldierType::new("STR_SOLDIER")
        });
        catalog.add_soldier_type(SoldierType {
            stat_caps: StatBlock { firing: 150, ..Default::default() },
            default_armor: "STR_SYNTH_SKIN".into(),
            ..SoldierType::new("STR_SYNTH")
        });
        let boost = || TransformationRule {
            cost: 100,
            flat_min: StatBlock { firing: 10, ..Default::default() },
            flat_max: StatBlock { firing: 10, ..Default::default() },
            ..Default::default()
        };
        catalog.add_transformation(TransformationRule {
            required_items: [("STR_ELERIUM_115".to_string(), 2)].into_iter().collect(),
            ..TransformationRule { id: "STR_SURGERY".into(), ..boost() }
        });
        catalog.add_transformation(TransformationRule {
            creates_clone: true,
            produced_soldier_type: Some("STR_SYNTH".into()),
            ..TransformationRule { id: "STR_CLONE".into(), ..boost() }
        });
        catalog.add_transformation(TransformationRule {
            produced_item: Some("STR_CORPSE".into()),
            allows_dead_soldiers: true,
            ..TransformationRule { id: "STR_RENDER".into(), ..boost() }
        });
        catalog
    }

    fn setup() -> (Base, Campaign, SoldierId) {
        let mut base = Base::new(BaseId(1), "Cheyenne", 5);
        base.storage.add("STR_ELERIUM_115", 2);
        let mut soldier = Soldier::new("Ana Ruiz", "STR_SOLDIER")
            .with_stats(StatBlock { firing: 50, ..Default::default() });
        soldier.nationality = Some("STR_SPAIN".into());
        soldier.craft = Some("SKYRANGER-1".into());
        let id = base.roster.spawn(soldier);
        (base, Campaign::new(1_000, Difficulty::Experienced), id)
    }

    #[test]
    fn test_in_place_immediate() {
        let catalog = catalog();
        let (mut base, mut campaign, id) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = commit_transformation(
            "STR_SURGERY", id, &mut base, &mut campaign, &catalog, &PlayerInput::named("Ghost"), &mut rng,
        )
        .unwrap();

        assert_eq!(outcome, TransitionOutcome::Transformed { soldier: id, postponed: false });
        let soldier = base.roster.get(id).unwrap();
        assert_eq!(soldier.current_stats.firing, 60);
        assert_eq!(soldier.name, "Ghost");
        assert!(soldier.craft.is_none());
        assert_eq!(soldier.status, SoldierStatus::Active);
        assert_eq!(campaign.funds, 900);
        assert_eq!(base.storage.get("STR_ELERIUM_115"), 0);
        assert!(base.transfers.is_empty());
    }

    #[test]
    fn test_clone_leaves_source_untouched() {
        let catalog = catalog();
        let (mut base, mut campaign, id) = setup();
        let before = base.roster.get(id).unwrap().clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = commit_transformation(
            "STR_CLONE", id, &mut base, &mut campaign, &catalog, &PlayerInput::default(), &mut rng,
        )
        .unwrap();

        let TransitionOutcome::Cloned { clone, postponed } = outcome else {
            panic!("expected a clone, got {:?}", outcome);
        };
        assert!(!postponed);
        assert_eq!(base.roster.get(id).unwrap(), &before);

        let clone = base.roster.get(clone).unwrap();
        assert_eq!(clone.name, "Ana Ruiz");
        assert_eq!(clone.soldier_type, "STR_SYNTH");
        assert_eq!(clone.armor, "STR_SYNTH_SKIN");
        assert_eq!(clone.nationality, None);
        assert_eq!(clone.status, SoldierStatus::InTransit);
        assert_eq!(clone.current_stats.firing, 60);
        assert_eq!(base.transfers.len(), 1);
    }

    #[test]
    fn test_retire_removes_dead_soldier() {
        let catalog = catalog();
        let (mut base, mut campaign, _) = setup();
        let dead = base
            .roster
            .spawn(Soldier::new("Lost", "STR_SOLDIER").with_status(SoldierStatus::Deceased));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = commit_transformation(
            "STR_RENDER", dead, &mut base, &mut campaign, &catalog, &PlayerInput::default(), &mut rng,
        )
        .unwrap();
        assert_eq!(outcome, TransitionOutcome::Retired { item: "STR_CORPSE".into() });
        assert!(!base.roster.contains(dead));

        let report = base.advance_hour(&catalog, &mut rng);
        assert_eq!(report.arrived_items, vec![("STR_CORPSE".to_string(), 1)]);
    }

    #[test]
    fn test_rejected_commit_changes_nothing() {
        let catalog = catalog();
        let (mut base, mut campaign, id) = setup();
        campaign.funds = 50;
        let before_storage = base.storage.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = commit_transformation(
            "STR_SURGERY", id, &mut base, &mut campaign, &catalog, &PlayerInput::default(), &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, ProjectError::Validation(_)));
        assert_eq!(campaign.funds, 50);
        assert_eq!(base.storage, before_storage);
        assert_eq!(base.roster.get(id).unwrap().current_stats.firing, 50);
    }

    #[test]
    fn test_blank_name_keeps_source_name() {
        assert_eq!(PlayerInput::named("  ").chosen_name(), None);
        assert_eq!(PlayerInput::named("Ghost").chosen_name(), Some("Ghost"));
    }
}
