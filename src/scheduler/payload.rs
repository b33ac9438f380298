//! What happens when a scheduled completion fires

use serde::{Deserialize, Serialize};

use crate::core::types::SoldierId;
use crate::rules::TransformationRule;

/// Action performed when a scheduled completion reaches zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompletionPayload {
    /// A soldier in transit arrives and becomes active
    MaterializeSoldier(SoldierId),
    /// Items arrive in base storage
    MaterializeItem { kind: String, quantity: u32 },
    /// A postponed transformation applies its stat change
    ResumeTransformation(PostponedTransformation),
}

/// Everything a postponed transformation needs, captured at commit time
///
/// Holds its own copy of the rule so the change applied later is the one the
/// player committed to, whatever happens to the catalog in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostponedTransformation {
    pub rule: TransformationRule,
    pub soldier: SoldierId,
    /// Soldier type whose caps measure the room left to gain
    pub basis_type: String,
}
