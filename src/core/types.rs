//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a soldier inside a roster arena
///
/// Ids are handed out by [`crate::campaign::Roster`] and never reused, so a
/// scheduled completion can hold one across any number of roster changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SoldierId(pub u32);

impl SoldierId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SoldierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "soldier#{}", self.0)
    }
}

/// Unique identifier for bases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseId(pub u32);

impl BaseId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for committed covert operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(pub Uuid);

impl OperationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game difficulty, five fixed tiers from easiest to hardest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    #[default]
    Experienced,
    Veteran,
    Genius,
    Superhuman,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Beginner,
        Difficulty::Experienced,
        Difficulty::Veteran,
        Difficulty::Genius,
        Difficulty::Superhuman,
    ];

    /// Multiplier applied to an operation's base chance
    pub fn odds_multiplier(&self) -> f64 {
        match self {
            Difficulty::Beginner => 1.1,
            Difficulty::Experienced => 1.0,
            Difficulty::Veteran => 0.95,
            Difficulty::Genius => 0.9,
            Difficulty::Superhuman => 0.85,
        }
    }

    /// Coefficient scaling the equipment category penalty.
    ///
    /// Runs the opposite direction of [`Difficulty::odds_multiplier`]: harder
    /// games punish badly chosen equipment more.
    pub fn equipment_penalty_coefficient(&self) -> f64 {
        match self {
            Difficulty::Beginner => 0.95,
            Difficulty::Experienced => 1.0,
            Difficulty::Veteran => 1.2,
            Difficulty::Genius => 1.3,
            Difficulty::Superhuman => 1.5,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "experienced" => Ok(Difficulty::Experienced),
            "veteran" => Ok(Difficulty::Veteran),
            "genius" => Ok(Difficulty::Genius),
            "superhuman" => Ok(Difficulty::Superhuman),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}
