//! Campaign layer - soldiers, rosters, bases and campaign-wide state

pub mod base;
pub mod campaign;
pub mod roster;
pub mod soldier;

pub use base::{Base, HourReport, TransformationFinished};
pub use campaign::{psi_unlocked, Campaign, Research, UnlockProvider};
pub use roster::Roster;
pub use soldier::{Gender, Soldier, SoldierStatus, TrainingMode};
