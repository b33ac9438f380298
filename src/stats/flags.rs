//! StatFlags - a set of stats, stored as a bitmask

use serde::{Deserialize, Serialize};

use crate::stats::block::Stat;

/// A set of [`Stat`]s
///
/// Serialized as a list of stat names, e.g. `["reactions", "bravery"]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Stat>", into = "Vec<Stat>")]
pub struct StatFlags(u16);

impl StatFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, stat: Stat) -> bool {
        self.0 & (1 << stat.index()) != 0
    }

    pub fn insert(&mut self, stat: Stat) {
        self.0 |= 1 << stat.index();
    }

    pub fn union(&self, other: StatFlags) -> StatFlags {
        StatFlags(self.0 | other.0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Stat> + '_ {
        Stat::ALL.into_iter().filter(move |&s| self.contains(s))
    }
}

impl FromIterator<Stat> for StatFlags {
    fn from_iter<I: IntoIterator<Item = Stat>>(iter: I) -> Self {
        let mut flags = StatFlags::new();
        for stat in iter {
            flags.insert(stat);
        }
        flags
    }
}

impl From<Vec<Stat>> for StatFlags {
    fn from(stats: Vec<Stat>) -> Self {
        stats.into_iter().collect()
    }
}

impl From<StatFlags> for Vec<Stat> {
    fn from(flags: StatFlags) -> Self {
        flags.iter().collect()
    }
}
