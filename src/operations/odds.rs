//! Operation odds - the multi-factor score a roster earns for a covert operation
//!
//! Odds are a relative score, not a probability: they may exceed 100 and are
//! capped at [`ProjectConfig::max_odds`](crate::core::ProjectConfig). The
//! computation is pure. It reads the roster, the staged ledger and the rule
//! and never touches an RNG or a mutable ledger, so the UI may call it on
//! every refresh.

use crate::campaign::Soldier;
use crate::core::config::config;
use crate::core::constants::*;
use crate::core::types::Difficulty;
use crate::inventory::ResourceLedger;
use crate::rules::{OperationRule, RuleCatalog};

/// Diminishing-returns curve shared by the per-soldier stat scores
///
/// `c * (y / (y + 1)) + d` with `y = e^(stat^b / a) - 1`.
pub fn stat_effect(stat: i32, (a, b, c, d): (f64, f64, f64, f64)) -> f64 {
    let y0 = ((stat as f64).powf(b) / a).exp() - 1.0;
    c * (y0 / (y0 + 1.0)) + d
}

/// Field officer bonus for the best rank on the team
pub fn officer_effect(max_rank: i32) -> f64 {
    let rank = max_rank as f64;
    OFFICER_QUADRATIC * rank.powi(2) + OFFICER_LINEAR * rank + OFFICER_CONSTANT
}

/// Everything the odds formula reads besides the rule itself
#[derive(Debug, Clone, Copy)]
pub struct OddsContext<'a> {
    pub catalog: &'a RuleCatalog,
    pub difficulty: Difficulty,
    /// Psionic offence research is done
    pub psi_unlocked: bool,
}

/// Running per-soldier totals, folded over the team in id order
#[derive(Debug, Clone, Copy, Default)]
struct SquadTally {
    /// The whole running score; each soldier's effectiveness rescales it
    chances: f64,
    max_rank: i32,
    total_rank: i32,
    reactions: f64,
    bravery: f64,
    /// Assigned, not summed: the last soldier's psi score is the team's
    psi: f64,
    time_units: f64,
    stamina: f64,
}

impl SquadTally {
    fn absorb(mut self, soldier: &Soldier, rule: &OperationRule, ctx: &OddsContext<'_>) -> Self {
        let effectiveness = rule
            .effectiveness_of(&soldier.soldier_type)
            .map_or(DEFAULT_EFFECTIVENESS, f64::from)
            / 100.0;
        self.chances *= effectiveness;

        self.max_rank = self.max_rank.max(soldier.rank);
        self.total_rank += soldier.rank;

        let stats = soldier.stats_with_all_bonuses(ctx.catalog);
        self.reactions += stat_effect(stats.reactions, REACTIONS_CURVE) * effectiveness;
        self.bravery += f64::from(stats.bravery / BRAVERY_STEP) * effectiveness - BRAVERY_OFFSET;

        self.psi = if stats.psi_skill > 0 && ctx.psi_unlocked {
            let mana_factor = if ctx.catalog.is_mana_feature_enabled() {
                f64::from(stats.mana - soldier.mana_missing) / f64::from(stats.mana)
            } else {
                1.0
            };
            (stat_effect(stats.psi_skill, PSI_CURVE) + stat_effect(stats.psi_strength, PSI_CURVE)) / 2.0
                * mana_factor
                * effectiveness
        } else {
            stat_effect(stats.psi_strength, PSI_CURVE) / PSI_STRENGTH_ONLY_DIVISOR
        };

        self.time_units += stat_effect(stats.time_units, TIME_UNITS_CURVE) * effectiveness;
        self.stamina += stat_effect(stats.stamina, STAMINA_CURVE) * effectiveness;
        self
    }

    /// Score after the roster terms are added back in
    fn settle(self, team_size: usize) -> f64 {
        let n = team_size as f64;
        self.chances
            + f64::from(self.total_rank) / n
            + self.bravery / n * BRAVERY_SCALE
            + self.reactions / n
            + self.psi
            + self.time_units / n
            + self.stamina / n
            + officer_effect(self.max_rank)
    }
}

/// Odds of a covert operation for the given team and staged items
///
/// The team is scored in soldier-id order, so any permutation of the same
/// soldiers gives the same odds.
pub fn compute_odds(
    rule: &OperationRule,
    soldiers: &[&Soldier],
    staged: &ResourceLedger,
    ctx: &OddsContext<'_>,
) -> f64 {
    let assigned = soldiers.len();
    let mut chances = f64::from(rule.base_chances) * ctx.difficulty.odds_multiplier();

    if rule.optional_soldier_slots > 0 {
        let effect = f64::from(rule.optional_soldier_effect);
        chances -= rule.optional_soldier_slots as f64 * effect;
        chances += (assigned as f64 - rule.soldier_slots as f64) * effect;
    }

    if !rule.bonus_items.is_empty() {
        let shortfall: i64 = rule
            .bonus_items
            .iter()
            .map(|(kind, &required)| i64::from(required) - i64::from(staged.get(kind)))
            .sum();
        chances -= f64::from(rule.bonus_items_effect) * shortfall as f64;
    }

    if !rule.allowed_armor.is_empty() {
        let armorless = soldiers.iter().filter(|s| !rule.allows_armor(&s.armor)).count();
        chances -= armorless as f64 * f64::from(rule.allowed_armor_effect);
    }

    if assigned > 0 {
        let mut team: Vec<&Soldier> = soldiers.to_vec();
        team.sort_by_key(|s| s.id);

        let seed = SquadTally { chances, ..Default::default() };
        chances = team
            .into_iter()
            .fold(seed, |tally, soldier| tally.absorb(soldier, rule, ctx))
            .settle(assigned);

        if !rule.allow_all_equipment {
            chances += equipment_penalty(rule, staged, assigned, ctx);
        }
    }

    // NaN passes through uncapped
    let max_odds = config().max_odds;
    if chances > max_odds {
        max_odds
    } else {
        chances
    }
}

/// Difficulty-scaled penalty for equipment that cannot be hidden
fn equipment_penalty(rule: &OperationRule, staged: &ResourceLedger, assigned: usize, ctx: &OddsContext<'_>) -> f64 {
    let coeff = ctx.difficulty.equipment_penalty_coefficient();
    let bonus = f64::from(rule.concealed_items_bonus);

    let mut all_concealed = true;
    let mut heavy = 0u32;
    for (kind, _) in staged.iter() {
        let info = ctx.catalog.item_info(kind);
        let in_category = |category: &str| info.is_some_and(|i| i.belongs_to_category(category));
        if !in_category(CATEGORY_CONCEALABLE) {
            all_concealed = false;
        }
        if in_category(CATEGORY_HEAVY_WEAPONS) && !in_category(CATEGORY_CLIPS) {
            heavy += 1;
        }
    }

    let mut penalty = if all_concealed { 0.0 } else { -bonus * coeff };
    penalty -= coeff * f64::from(heavy) * bonus * HEAVY_ITEM_PENALTY_FACTOR / assigned as f64;
    penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SoldierId;
    use crate::rules::ItemInfo;
    use crate::stats::StatBlock;

    fn ctx(catalog: &RuleCatalog, difficulty: Difficulty) -> OddsContext<'_> {
        OddsContext { catalog, difficulty, psi_unlocked: false }
    }

    fn soldier(id: u32, stats: StatBlock) -> Soldier {
        let mut s = Soldier::new(format!("S{}", id), "STR_SOLDIER").with_stats(stats);
        s.id = SoldierId(id);
        s
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_stat_effect_zero_stat_is_offset() {
        assert!(close(stat_effect(0, REACTIONS_CURVE), -9.0));
        assert!(close(stat_effect(0, PSI_CURVE), 0.0));
    }

    #[test]
    fn test_stat_effect_saturates() {
        // Huge stats approach c + d
        assert!(close(stat_effect(1000, REACTIONS_CURVE), 7.0));
        assert!(stat_effect(60, REACTIONS_CURVE) < stat_effect(80, REACTIONS_CURVE));
    }

    #[test]
    fn test_empty_roster_is_difficulty_scaled_base() {
        let catalog = RuleCatalog::new();
        let rule = OperationRule::new("STR_OP", 50);
        let staged = ResourceLedger::new();
        for difficulty in Difficulty::ALL {
            let odds = compute_odds(&rule, &[], &staged, &ctx(&catalog, difficulty));
            assert!(close(odds, 50.0 * difficulty.odds_multiplier()));
        }
    }

    #[test]
    fn test_optional_slots_precharged_and_refunded() {
        let catalog = RuleCatalog::new();
        let mut rule = OperationRule::new("STR_OP", 50);
        rule.soldier_slots = 0;
        rule.optional_soldier_slots = 2;
        rule.optional_soldier_effect = 5;
        let odds = compute_odds(&rule, &[], &ResourceLedger::new(), &ctx(&catalog, Difficulty::Experienced));
        assert!(close(odds, 40.0));
    }

    #[test]
    fn test_bonus_item_shortfall_and_surplus() {
        let catalog = RuleCatalog::new();
        let mut rule = OperationRule::new("STR_OP", 50);
        rule.bonus_items.insert("STR_MEDIKIT".into(), 2);
        rule.bonus_items_effect = 3;

        let none = ResourceLedger::new();
        let surplus = ResourceLedger::with_items([("STR_MEDIKIT", 3)]);
        let c = ctx(&catalog, Difficulty::Experienced);
        assert!(close(compute_odds(&rule, &[], &none, &c), 44.0));
        assert!(close(compute_odds(&rule, &[], &surplus, &c), 53.0));
    }

    #[test]
    fn test_armor_penalty_counts_unsuited_soldiers() {
        let catalog = RuleCatalog::new();
        let mut rule = OperationRule::new("STR_OP", 50);
        rule.allowed_armor = vec!["STR_CIVILIAN".into()];
        rule.allowed_armor_effect = 10;
        rule.allow_all_equipment = true;

        let suited = soldier(1, StatBlock::default()).with_armor("STR_CIVILIAN");
        let unsuited = soldier(2, StatBlock::default()).with_armor("STR_POWER_SUIT");
        let c = ctx(&catalog, Difficulty::Experienced);
        let staged = ResourceLedger::new();

        let with_suited = compute_odds(&rule, &[&suited], &staged, &c);
        let mut unsuited_alone = unsuited.clone();
        unsuited_alone.id = SoldierId(1);
        let with_unsuited = compute_odds(&rule, &[&unsuited_alone], &staged, &c);
        assert!(close(with_suited - with_unsuited, 10.0));
    }

    #[test]
    fn test_effectiveness_rescales_running_score() {
        let mut catalog = RuleCatalog::new();
        catalog.add_item(ItemInfo::new("STR_PISTOL"));
        let mut rule = OperationRule::new("STR_OP", 100);
        rule.allow_all_equipment = true;
        rule.soldier_type_effectiveness.insert("STR_SOLDIER".into(), 50);

        let zero = soldier(1, StatBlock::default());
        let c = ctx(&catalog, Difficulty::Experienced);
        let odds = compute_odds(&rule, &[&zero], &ResourceLedger::new(), &c);

        // Score halves before the roster terms are added
        let terms = 0.5 * stat_effect(0, REACTIONS_CURVE)
            + (0.0 - BRAVERY_OFFSET) * BRAVERY_SCALE
            + 0.5 * stat_effect(0, TIME_UNITS_CURVE)
            + 0.5 * stat_effect(0, STAMINA_CURVE)
            + stat_effect(0, PSI_CURVE) / PSI_STRENGTH_ONLY_DIVISOR
            + officer_effect(0);
        assert!(close(odds, 50.0 + terms));
    }

    #[test]
    fn test_order_does_not_matter() {
        let catalog = RuleCatalog::new();
        let mut rule = OperationRule::new("STR_OP", 60);
        rule.soldier_type_effectiveness.insert("STR_SOLDIER".into(), 120);
        let a = soldier(1, StatBlock { reactions: 60, psi_strength: 40, ..Default::default() }).with_rank(3);
        let b = soldier(2, StatBlock { reactions: 30, psi_strength: 90, ..Default::default() }).with_rank(1);
        let c = ctx(&catalog, Difficulty::Veteran);
        let staged = ResourceLedger::new();
        assert_eq!(
            compute_odds(&rule, &[&a, &b], &staged, &c),
            compute_odds(&rule, &[&b, &a], &staged, &c)
        );
    }

    #[test]
    fn test_unconcealable_and_heavy_items_penalised() {
        let mut catalog = RuleCatalog::new();
        catalog.add_item(ItemInfo::new("STR_PISTOL").with_category(CATEGORY_CONCEALABLE));
        catalog.add_item(ItemInfo::new("STR_CANNON").with_category(CATEGORY_HEAVY_WEAPONS));
        let mut rule = OperationRule::new("STR_OP", 50);
        rule.concealed_items_bonus = 10;

        let s = soldier(1, StatBlock::default());
        let c = ctx(&catalog, Difficulty::Veteran);
        let hidden = compute_odds(&rule, &[&s], &ResourceLedger::with_items([("STR_PISTOL", 1)]), &c);
        let heavy = compute_odds(
            &rule,
            &[&s],
            &ResourceLedger::with_items([("STR_PISTOL", 1), ("STR_CANNON", 1)]),
            &c,
        );
        // -10 * 1.2 for not concealed, -1.2 * 1 * 10 * 4 / 1 for the cannon
        assert!(close(hidden - heavy, 12.0 + 48.0));
    }

    #[test]
    fn test_unknown_item_is_not_concealable() {
        let catalog = RuleCatalog::new();
        let mut rule = OperationRule::new("STR_OP", 50);
        rule.concealed_items_bonus = 10;
        let s = soldier(1, StatBlock::default());
        let c = ctx(&catalog, Difficulty::Experienced);
        let bare = compute_odds(&rule, &[&s], &ResourceLedger::new(), &c);
        let mystery = compute_odds(&rule, &[&s], &ResourceLedger::with_items([("STR_MYSTERY", 1)]), &c);
        assert!(close(bare - mystery, 10.0));
    }

    #[test]
    fn test_clamped_at_max_odds() {
        let catalog = RuleCatalog::new();
        let rule = OperationRule::new("STR_OP", 500);
        let odds = compute_odds(&rule, &[], &ResourceLedger::new(), &ctx(&catalog, Difficulty::Beginner));
        assert_eq!(odds, 200.0);
    }

    #[test]
    fn test_psi_term_needs_research() {
        let catalog = RuleCatalog::new();
        let mut rule = OperationRule::new("STR_OP", 50);
        rule.allow_all_equipment = true;
        let psyker = soldier(1, StatBlock { psi_skill: 80, psi_strength: 80, ..Default::default() });
        let locked = ctx(&catalog, Difficulty::Experienced);
        let unlocked = OddsContext { psi_unlocked: true, ..locked };
        let staged = ResourceLedger::new();
        let diff = compute_odds(&rule, &[&psyker], &staged, &unlocked) - compute_odds(&rule, &[&psyker], &staged, &locked);
        let expected = (stat_effect(80, PSI_CURVE) + stat_effect(80, PSI_CURVE)) / 2.0 - stat_effect(80, PSI_CURVE) / 3.0;
        assert!(close(diff, expected));
    }

    #[test]
    fn test_psi_term_scaled_by_remaining_mana() {
        let mut catalog = RuleCatalog::new();
        let mut rule = OperationRule::new("STR_OP", 50);
        rule.allow_all_equipment = true;
        rule.soldier_type_effectiveness.insert("STR_SOLDIER".into(), 80);
        let mut psyker = soldier(1, StatBlock { psi_skill: 60, psi_strength: 40, mana: 40, ..Default::default() });
        psyker.mana_missing = 10;
        let staged = ResourceLedger::new();
        let unlocked = OddsContext { psi_unlocked: true, ..ctx(&catalog, Difficulty::Experienced) };
        let full_psi = compute_odds(&rule, &[&psyker], &staged, &unlocked);

        catalog.set_mana_feature_enabled(true);
        let unlocked = OddsContext { psi_unlocked: true, ..ctx(&catalog, Difficulty::Experienced) };
        let drained_psi = compute_odds(&rule, &[&psyker], &staged, &unlocked);

        // Psi term is halved skill + strength, times 0.8 effectiveness, times 30/40 mana when enabled
        let term = (stat_effect(60, PSI_CURVE) + stat_effect(40, PSI_CURVE)) / 2.0 * 0.8;
        assert!(close(full_psi - drained_psi, term - term * 0.75));
    }

    #[test]
    fn test_zero_mana_psyker_is_not_clamped_to_max() {
        let mut catalog = RuleCatalog::new();
        catalog.set_mana_feature_enabled(true);
        let mut rule = OperationRule::new("STR_OP", 30);
        rule.costs = 240;
        let psyker = soldier(1, StatBlock { psi_skill: 10, mana: 0, ..Default::default() });
        let c = OddsContext { psi_unlocked: true, ..ctx(&catalog, Difficulty::Experienced) };

        let odds = compute_odds(&rule, &[&psyker], &ResourceLedger::new(), &c);
        assert!(odds.is_nan());
        assert_eq!(crate::operations::compute_cost(&rule, odds), 240);
    }
}
