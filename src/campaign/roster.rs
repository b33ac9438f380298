//! Roster - arena of soldiers with stable ids
//!
//! Living, travelling and fallen soldiers share one arena and are told apart
//! by [`SoldierStatus`]. Ids are never reused, and removal rebuilds the
//! collection instead of erasing mid-iteration, so an id held by a scheduled
//! completion stays meaningful for as long as the soldier exists.

use serde::{Deserialize, Serialize};

use crate::campaign::soldier::{Soldier, SoldierStatus};
use crate::core::types::SoldierId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    soldiers: Vec<Soldier>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a soldier, assigning it a fresh id
    pub fn spawn(&mut self, mut soldier: Soldier) -> SoldierId {
        self.next_id += 1;
        let id = SoldierId(self.next_id);
        soldier.id = id;
        self.soldiers.push(soldier);
        id
    }

    pub fn index_of(&self, id: SoldierId) -> Option<usize> {
        self.soldiers.iter().position(|s| s.id == id)
    }

    pub fn get(&self, id: SoldierId) -> Option<&Soldier> {
        self.soldiers.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SoldierId) -> Option<&mut Soldier> {
        self.soldiers.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: SoldierId) -> bool {
        self.index_of(id).is_some()
    }

    /// Remove a soldier from the arena, whatever its status
    pub fn remove(&mut self, id: SoldierId) -> Option<Soldier> {
        let (removed, kept): (Vec<Soldier>, Vec<Soldier>) =
            std::mem::take(&mut self.soldiers).into_iter().partition(|s| s.id == id);
        self.soldiers = kept;
        removed.into_iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Soldier> {
        self.soldiers.iter()
    }

    pub fn with_status(&self, status: SoldierStatus) -> impl Iterator<Item = &Soldier> {
        self.soldiers.iter().filter(move |s| s.status == status)
    }

    pub fn active(&self) -> impl Iterator<Item = &Soldier> {
        self.with_status(SoldierStatus::Active)
    }

    pub fn deceased(&self) -> impl Iterator<Item = &Soldier> {
        self.with_status(SoldierStatus::Deceased)
    }

    pub fn count(&self, status: SoldierStatus) -> usize {
        self.with_status(status).count()
    }

    pub fn len(&self) -> usize {
        self.soldiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.soldiers.is_empty()
    }
}
