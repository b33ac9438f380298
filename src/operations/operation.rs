//! Operation - a committed covert operation and the resources it holds

use serde::{Deserialize, Serialize};

use crate::core::types::{BaseId, OperationId, SoldierId};
use crate::inventory::ResourceLedger;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    pub rule_id: String,
    pub base: BaseId,
    /// Items committed at start; never added to afterwards
    pub items: ResourceLedger,
    pub soldiers: Vec<SoldierId>,
    /// Duration in hours
    pub cost: i32,
    /// Rounded odds at commit time
    pub chances: i32,
    /// A psionic soldier went in with a psi amp and psionic offence is researched
    pub is_psi: bool,
}

impl Operation {
    pub fn new(rule_id: impl Into<String>, base: BaseId, cost: i32, chances: i32) -> Self {
        Self {
            id: OperationId::new(),
            rule_id: rule_id.into(),
            base,
            items: ResourceLedger::new(),
            soldiers: Vec::new(),
            cost,
            chances,
            is_psi: false,
        }
    }
}
