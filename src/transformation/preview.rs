//! What the transformation screen shows before the player commits

use std::fmt;

use crate::campaign::{psi_unlocked, Soldier, UnlockProvider};
use crate::core::config::config;
use crate::core::constants::HOURS_PER_DAY;
use crate::core::error::{ProjectError, Result};
use crate::rules::{RuleCatalog, TransformationRule};
use crate::stats::{Stat, StatBlock, StatVariant};
use crate::transformation::changes::stat_change_bound;

/// One stat's projected change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatPreview {
    /// Decided by a roll at completion; no number is shown
    Hidden,
    Value(i32),
}

impl fmt::Display for StatPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatPreview::Hidden => f.write_str("?"),
            StatPreview::Value(0) => Ok(()),
            StatPreview::Value(v) if *v > 0 => write!(f, "+{}", v),
            StatPreview::Value(v) => write!(f, "{}", v),
        }
    }
}

/// Projected changes for the stats the soldier's sheet shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformationPreview {
    pub rows: Vec<(Stat, StatPreview)>,
}

impl TransformationPreview {
    pub fn get(&self, stat: Stat) -> Option<StatPreview> {
        self.rows.iter().find(|(s, _)| *s == stat).map(|(_, p)| *p)
    }
}

/// Stats a soldier's sheet would list at all
fn stat_visible(stat: Stat, soldier: &Soldier, catalog: &RuleCatalog, psi_unlocked: bool) -> bool {
    match stat {
        Stat::PsiSkill => soldier.current_stats.psi_skill > 0,
        Stat::PsiStrength => {
            soldier.current_stats.psi_skill > 0 || (config().psi_strength_eval && psi_unlocked)
        }
        Stat::Mana => catalog.is_mana_feature_enabled(),
        _ => true,
    }
}

/// Low or high end of the change the rule would make to this soldier
///
/// Rules that retire the soldier into an item have nothing to preview and
/// return `None`. Without `show_min_max` both variants report the same single
/// value, and a stat with a random range is hidden.
pub fn preview_stat_changes(
    rule: &TransformationRule,
    soldier: &Soldier,
    variant: StatVariant,
    catalog: &RuleCatalog,
    unlocks: &dyn UnlockProvider,
) -> Result<Option<TransformationPreview>> {
    if rule.produces_item() {
        return Ok(None);
    }
    let basis = catalog
        .soldier_type(&soldier.soldier_type)
        .ok_or_else(|| ProjectError::UnknownSoldierType(soldier.soldier_type.clone()))?;

    let variant = if rule.show_min_max { variant } else { StatVariant::Min };
    let bound = stat_change_bound(rule, &soldier.current_stats, &basis.stat_caps, variant);
    let random = rule.random_stats();
    let unlocked = psi_unlocked(catalog, unlocks);

    let rows = Stat::ALL
        .into_iter()
        .filter(|&stat| stat_visible(stat, soldier, catalog, unlocked))
        .map(|stat| {
            let hidden = rule.reroll_stats.contains(stat) || (!rule.show_min_max && random.contains(stat));
            let preview = if hidden { StatPreview::Hidden } else { StatPreview::Value(bound.get(stat)) };
            (stat, preview)
        })
        .collect();

    Ok(Some(TransformationPreview { rows }))
}

/// Flat bonus the rule's soldier bonus grants, or nothing
pub fn evaluate_bonus(rule: &TransformationRule, catalog: &RuleCatalog) -> StatBlock {
    rule.soldier_bonus_type
        .as_ref()
        .and_then(|id| catalog.soldier_bonus(id))
        .map(|bonus| bonus.stats)
        .unwrap_or_default()
}

/// Hours until the result of the rule is usable
pub fn projected_delay_hours(rule: &TransformationRule, soldier: &Soldier) -> i32 {
    let cfg = config();
    let transfer = rule.transfer_time;
    let mut delay = if rule.produces_item() {
        transfer.max(cfg.default_item_transfer_hours)
    } else if transfer > 0 || rule.creates_clone || soldier.is_dead() {
        if transfer > 0 { transfer } else { cfg.default_soldier_transfer_hours }
    } else {
        0
    };
    if rule.transformation_time > 0 {
        delay = rule.transformation_time;
    }
    delay
}

/// Projected delay in whole days, rounded up
pub fn projected_delay_days(rule: &TransformationRule, soldier: &Soldier) -> i32 {
    let hours = projected_delay_hours(rule, soldier);
    (hours + HOURS_PER_DAY - 1) / HOURS_PER_DAY
}
