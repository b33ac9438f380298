//! Stat-change arithmetic shared by preview and completion
//!
//! A change is the sum of three parts, each configured per stat as a range:
//! a flat delta, a percentage of the current value, and a percentage of the
//! headroom left below the soldier type's caps.

use rand::Rng;

use crate::rules::TransformationRule;
use crate::stats::{StatBlock, StatVariant};

/// Room left below the caps, never negative
pub fn headroom(current: &StatBlock, caps: &StatBlock) -> StatBlock {
    caps.zip_with(current, |cap, value| (cap - value).max(0))
}

/// One end of the configured change range
pub fn stat_change_bound(
    rule: &TransformationRule,
    current: &StatBlock,
    caps: &StatBlock,
    variant: StatVariant,
) -> StatBlock {
    let (flat, percent, gained) = match variant {
        StatVariant::Min => (&rule.flat_min, &rule.percent_min, &rule.percent_gained_min),
        StatVariant::Max => (&rule.flat_max, &rule.percent_max, &rule.percent_gained_max),
    };
    *flat + current.percent(percent) + headroom(current, caps).percent(gained)
}

/// Draw an actual change, each part rolled inside its own range
pub fn roll_stat_change(
    rule: &TransformationRule,
    current: &StatBlock,
    caps: &StatBlock,
    rng: &mut impl Rng,
) -> StatBlock {
    let flat = StatBlock::random_in_range(&rule.flat_min, &rule.flat_max, rng);
    let percent = StatBlock::random_in_range(&rule.percent_min, &rule.percent_max, rng);
    let gained = StatBlock::random_in_range(&rule.percent_gained_min, &rule.percent_gained_max, rng);
    flat + current.percent(&percent) + headroom(current, caps).percent(&gained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rule() -> TransformationRule {
        TransformationRule {
            flat_min: StatBlock { firing: 5, ..Default::default() },
            flat_max: StatBlock { firing: 10, ..Default::default() },
            percent_min: StatBlock { strength: 10, ..Default::default() },
            percent_max: StatBlock { strength: 10, ..Default::default() },
            percent_gained_min: StatBlock { reactions: 50, ..Default::default() },
            percent_gained_max: StatBlock { reactions: 50, ..Default::default() },
            ..TransformationRule::new("STR_IMPLANT")
        }
    }

    fn current() -> StatBlock {
        StatBlock { firing: 50, strength: 40, reactions: 40, ..Default::default() }
    }

    fn caps() -> StatBlock {
        StatBlock { firing: 120, strength: 70, reactions: 100, ..Default::default() }
    }

    #[test]
    fn test_headroom_never_negative() {
        let over = StatBlock { firing: 150, ..Default::default() };
        assert_eq!(headroom(&over, &caps()).firing, 0);
        assert_eq!(headroom(&current(), &caps()).reactions, 60);
    }

    #[test]
    fn test_bounds_combine_all_three_parts() {
        let min = stat_change_bound(&rule(), &current(), &caps(), StatVariant::Min);
        let max = stat_change_bound(&rule(), &current(), &caps(), StatVariant::Max);
        assert_eq!(min.firing, 5);
        assert_eq!(max.firing, 10);
        assert_eq!(min.strength, 4);
        assert_eq!(min.reactions, 30);
        assert_eq!(max.reactions, 30);
    }

    #[test]
    fn test_roll_stays_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let change = roll_stat_change(&rule(), &current(), &caps(), &mut rng);
            assert!((5..=10).contains(&change.firing));
            assert_eq!(change.strength, 4);
            assert_eq!(change.reactions, 30);
        }
    }
}
