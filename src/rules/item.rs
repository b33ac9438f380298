//! Item metadata consulted by the project engines

use serde::{Deserialize, Serialize};

/// How an item behaves in battle. Only psi-amps matter to the projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleType {
    #[default]
    None,
    Firearm,
    Ammo,
    Melee,
    Grenade,
    Medikit,
    PsiAmp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemInfo {
    pub id: String,
    pub battle_type: BattleType,
    pub categories: Vec<String>,
}

impl ItemInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    pub fn with_battle_type(mut self, battle_type: BattleType) -> Self {
        self.battle_type = battle_type;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn belongs_to_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Can be used for psionic offence
    pub fn is_psionic(&self) -> bool {
        self.battle_type == BattleType::PsiAmp
    }
}
