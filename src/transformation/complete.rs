//! Applying a transformation's stat change to a soldier

use rand::Rng;

use crate::campaign::Soldier;
use crate::core::error::{ProjectError, Result};
use crate::rules::{RuleCatalog, TransformationRule};
use crate::stats::StatBlock;
use crate::transformation::changes::roll_stat_change;

/// Roll and apply the rule's stat change, then finish the soldier off
///
/// `basis_type` is the soldier type the transformation started from; its
/// caps measure how much is left to gain. Runs at commit for immediate
/// rules and from the scheduler for postponed ones.
pub fn apply_transformation(
    soldier: &mut Soldier,
    rule: &TransformationRule,
    basis_type: &str,
    catalog: &RuleCatalog,
    rng: &mut impl Rng,
) -> Result<StatBlock> {
    let basis = catalog
        .soldier_type(basis_type)
        .ok_or_else(|| ProjectError::UnknownSoldierType(basis_type.to_string()))?;
    let target_id = match (&rule.produced_soldier_type, rule.creates_clone) {
        (Some(produced), false) => produced.as_str(),
        _ => soldier.soldier_type.as_str(),
    };
    let target = catalog
        .soldier_type(target_id)
        .ok_or_else(|| ProjectError::UnknownSoldierType(target_id.to_string()))?;

    let current = soldier.current_stats;
    let change = roll_stat_change(rule, &current, &basis.stat_caps, rng);
    let mut stats = current + change;

    if !rule.reroll_stats.is_empty() {
        let fresh = StatBlock::random_in_range(&target.min_stats, &target.max_stats, rng);
        for stat in rule.reroll_stats.iter() {
            stats.set(stat, fresh.get(stat));
        }
    }

    let stats = stats.floored(0).capped(&target.stat_caps);
    soldier.current_stats = stats;

    if let Some(bonus) = &rule.soldier_bonus_type {
        if !soldier.bonuses.contains(bonus) {
            soldier.bonuses.push(bonus.clone());
        }
    }
    soldier.recovery_days = rule.recovery_time;

    if !rule.creates_clone {
        if let Some(produced) = &rule.produced_soldier_type {
            soldier.soldier_type = produced.clone();
            soldier.armor = target.default_armor.clone();
        }
    }

    soldier.pending_transformation = None;
    *soldier.transformation_history.entry(rule.id.clone()).or_insert(0) += 1;

    Ok(stats - current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SoldierType;
    use crate::stats::{Stat, StatFlags};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> RuleCatalog {
        let mut catalog = RuleCatalog::new();
        catalog.add_soldier_type(SoldierType {
            stat_caps: StatBlock { firing: 100, reactions: 100, ..Default::default() },
            default_armor: "STR_NONE_UC".into(),
            ..SoldierType::new("STR_SOLDIER")
        });
        catalog.add_soldier_type(SoldierType {
            min_stats: StatBlock { reactions: 60, ..Default::default() },
            max_stats: StatBlock { reactions: 70, ..Default::default() },
            stat_caps: StatBlock { firing: 90, reactions: 120, ..Default::default() },
            default_armor: "STR_CYBER_ARMOR".into(),
            ..SoldierType::new("STR_CYBORG")
        });
        catalog
    }

    #[test]
    fn test_flat_change_capped_by_type() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let rule = TransformationRule {
            flat_min: StatBlock { firing: 20, ..Default::default() },
            flat_max: StatBlock { firing: 20, ..Default::default() },
            recovery_time: 5,
            soldier_bonus_type: Some("STR_IMPLANT".into()),
            ..TransformationRule::new("STR_SURGERY")
        };
        let mut soldier = Soldier::new("A", "STR_SOLDIER")
            .with_stats(StatBlock { firing: 90, health: 40, ..Default::default() });
        soldier.pending_transformation = Some("STR_SURGERY".into());

        let applied = apply_transformation(&mut soldier, &rule, "STR_SOLDIER", &catalog, &mut rng).unwrap();
        assert_eq!(soldier.current_stats.firing, 100);
        assert_eq!(applied.firing, 10);
        // uncapped stats are left alone
        assert_eq!(soldier.current_stats.health, 40);
        assert_eq!(soldier.bonuses, vec!["STR_IMPLANT".to_string()]);
        assert_eq!(soldier.recovery_days, 5);
        assert!(soldier.pending_transformation.is_none());
        assert!(soldier.completed_transformation("STR_SURGERY"));
    }

    #[test]
    fn test_negative_result_floored_at_zero() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let rule = TransformationRule {
            flat_min: StatBlock { bravery: -50, ..Default::default() },
            flat_max: StatBlock { bravery: -50, ..Default::default() },
            ..TransformationRule::new("STR_TRAUMA")
        };
        let mut soldier = Soldier::new("A", "STR_SOLDIER").with_stats(StatBlock { bravery: 30, ..Default::default() });
        apply_transformation(&mut soldier, &rule, "STR_SOLDIER", &catalog, &mut rng).unwrap();
        assert_eq!(soldier.current_stats.bravery, 0);
    }

    #[test]
    fn test_in_place_type_change_rerolls_from_new_type() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let rule = TransformationRule {
            produced_soldier_type: Some("STR_CYBORG".into()),
            reroll_stats: [Stat::Reactions].into_iter().collect::<StatFlags>(),
            ..TransformationRule::new("STR_CONVERSION")
        };
        let mut soldier = Soldier::new("A", "STR_SOLDIER")
            .with_armor("STR_NONE_UC")
            .with_stats(StatBlock { reactions: 10, firing: 95, ..Default::default() });

        apply_transformation(&mut soldier, &rule, "STR_SOLDIER", &catalog, &mut rng).unwrap();
        assert_eq!(soldier.soldier_type, "STR_CYBORG");
        assert_eq!(soldier.armor, "STR_CYBER_ARMOR");
        assert!((60..=70).contains(&soldier.current_stats.reactions));
        assert_eq!(soldier.current_stats.firing, 90);
    }

    #[test]
    fn test_unknown_basis_type() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut soldier = Soldier::new("A", "STR_SOLDIER");
        let err = apply_transformation(&mut soldier, &TransformationRule::new("X"), "STR_GHOST", &catalog, &mut rng)
            .unwrap_err();
        assert_eq!(err, ProjectError::UnknownSoldierType("STR_GHOST".into()));
        assert!(soldier.transformation_history.is_empty());
    }
}
