//! Personnel Projects - covert operations and soldier transformations

pub mod campaign;
pub mod core;
pub mod inventory;
pub mod operations;
pub mod rules;
pub mod scheduler;
pub mod stats;
pub mod transformation;
