//! StatBlock - the twelve named soldier attributes

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

use crate::stats::flags::StatFlags;

/// One named soldier attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    TimeUnits,
    Stamina,
    Health,
    Bravery,
    Reactions,
    Firing,
    Throwing,
    Melee,
    Strength,
    Mana,
    PsiStrength,
    PsiSkill,
}

impl Stat {
    pub const ALL: [Stat; 12] = [
        Stat::TimeUnits,
        Stat::Stamina,
        Stat::Health,
        Stat::Bravery,
        Stat::Reactions,
        Stat::Firing,
        Stat::Throwing,
        Stat::Melee,
        Stat::Strength,
        Stat::Mana,
        Stat::PsiStrength,
        Stat::PsiSkill,
    ];

    /// Position of this stat in [`Stat::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which end of a stat-change range to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatVariant {
    Min,
    Max,
}

/// The full attribute set of a soldier (or a delta, cap or bonus over it)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub time_units: i32,
    pub stamina: i32,
    pub health: i32,
    pub bravery: i32,
    pub reactions: i32,
    pub firing: i32,
    pub throwing: i32,
    pub melee: i32,
    pub strength: i32,
    pub mana: i32,
    pub psi_strength: i32,
    pub psi_skill: i32,
}

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block with every stat set to the same value
    pub fn uniform(value: i32) -> Self {
        Self::from_fn(|_| value)
    }

    /// Build a block by evaluating `f` for every stat
    pub fn from_fn(mut f: impl FnMut(Stat) -> i32) -> Self {
        let mut block = Self::default();
        for stat in Stat::ALL {
            *block.get_mut(stat) = f(stat);
        }
        block
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::TimeUnits => self.time_units,
            Stat::Stamina => self.stamina,
            Stat::Health => self.health,
            Stat::Bravery => self.bravery,
            Stat::Reactions => self.reactions,
            Stat::Firing => self.firing,
            Stat::Throwing => self.throwing,
            Stat::Melee => self.melee,
            Stat::Strength => self.strength,
            Stat::Mana => self.mana,
            Stat::PsiStrength => self.psi_strength,
            Stat::PsiSkill => self.psi_skill,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::TimeUnits => &mut self.time_units,
            Stat::Stamina => &mut self.stamina,
            Stat::Health => &mut self.health,
            Stat::Bravery => &mut self.bravery,
            Stat::Reactions => &mut self.reactions,
            Stat::Firing => &mut self.firing,
            Stat::Throwing => &mut self.throwing,
            Stat::Melee => &mut self.melee,
            Stat::Strength => &mut self.strength,
            Stat::Mana => &mut self.mana,
            Stat::PsiStrength => &mut self.psi_strength,
            Stat::PsiSkill => &mut self.psi_skill,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        *self.get_mut(stat) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }

    /// True if every stat is zero
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, v)| v == 0)
    }

    /// Combine two blocks stat by stat
    pub fn zip_with(&self, other: &StatBlock, mut f: impl FnMut(i32, i32) -> i32) -> StatBlock {
        StatBlock::from_fn(|stat| f(self.get(stat), other.get(stat)))
    }

    /// `self * percent / 100` per stat, truncating toward zero
    pub fn percent(&self, percent: &StatBlock) -> StatBlock {
        self.zip_with(percent, |value, pct| value * pct / 100)
    }

    /// Scale every stat by a whole percentage
    pub fn scaled(&self, percent: i32) -> StatBlock {
        self.percent(&StatBlock::uniform(percent))
    }

    /// Raise every stat to at least `floor`
    pub fn floored(&self, floor: i32) -> StatBlock {
        self.zip_with(&StatBlock::uniform(floor), i32::max)
    }

    /// Upper-bound every stat by `caps`; a cap of zero or less means uncapped
    pub fn capped(&self, caps: &StatBlock) -> StatBlock {
        self.zip_with(caps, |value, cap| if cap > 0 { value.min(cap) } else { value })
    }

    /// Roll each stat uniformly in `[min, max]` (bounds may be given in either order)
    pub fn random_in_range(min: &StatBlock, max: &StatBlock, rng: &mut impl Rng) -> StatBlock {
        StatBlock::from_fn(|stat| {
            let (lo, hi) = ordered(min.get(stat), max.get(stat));
            if lo == hi {
                lo
            } else {
                rng.gen_range(lo..=hi)
            }
        })
    }

    /// Stats whose `[min, max]` range is not a single value
    pub fn random_stats(min: &StatBlock, max: &StatBlock) -> StatFlags {
        Stat::ALL
            .into_iter()
            .filter(|&stat| min.get(stat) != max.get(stat))
            .collect()
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Add for StatBlock {
    type Output = StatBlock;
    fn add(self, rhs: StatBlock) -> StatBlock {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl Sub for StatBlock {
    type Output = StatBlock;
    fn sub(self, rhs: StatBlock) -> StatBlock {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: StatBlock) {
        *self = *self + rhs;
    }
}
