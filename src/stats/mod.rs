//! Soldier attributes - the fixed stat set and its arithmetic

pub mod block;
pub mod flags;

pub use block::{Stat, StatBlock, StatVariant};
pub use flags::StatFlags;
