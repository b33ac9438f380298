//! ResourceLedger - item kind to quantity, used for base storage and staged items

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::ValidationError;

/// Quantities of item kinds
///
/// Holds no zero entries: removing the last unit of a kind forgets the kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    items: AHashMap<String, u32>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from `(kind, quantity)` pairs
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut ledger = Self::new();
        for (kind, amount) in items {
            ledger.add(kind, amount);
        }
        ledger
    }

    /// Quantity held of a kind
    pub fn get(&self, kind: &str) -> u32 {
        self.items.get(kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: &str, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.items.entry(kind.to_string()).or_insert(0) += amount;
    }

    /// Remove exactly `amount` of a kind
    ///
    /// Rejected without any change if less than `amount` is held.
    pub fn remove(&mut self, kind: &str, amount: u32) -> Result<(), ValidationError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.get(kind);
        if available < amount {
            return Err(ValidationError::InsufficientItems {
                item: kind.to_string(),
                required: amount,
                available,
            });
        }
        if available == amount {
            self.items.remove(kind);
        } else if let Some(held) = self.items.get_mut(kind) {
            *held -= amount;
        }
        Ok(())
    }

    /// Check the ledger holds at least the given quantity of every kind
    pub fn has_materials<'a>(&self, requirements: impl IntoIterator<Item = (&'a str, u32)>) -> bool {
        requirements.into_iter().all(|(kind, amount)| self.get(kind) >= amount)
    }

    /// First requirement the ledger cannot cover
    pub fn first_shortfall<'a>(
        &self,
        requirements: impl IntoIterator<Item = (&'a str, u32)>,
    ) -> Option<ValidationError> {
        requirements.into_iter().find_map(|(kind, amount)| {
            let available = self.get(kind);
            (available < amount).then(|| ValidationError::InsufficientItems {
                item: kind.to_string(),
                required: amount,
                available,
            })
        })
    }

    /// Remove every requirement, or nothing at all
    pub fn consume_materials<'a>(
        &mut self,
        requirements: impl IntoIterator<Item = (&'a str, u32)> + Clone,
    ) -> Result<(), ValidationError> {
        if let Some(shortfall) = self.first_shortfall(requirements.clone()) {
            return Err(shortfall);
        }
        for (kind, amount) in requirements {
            self.remove(kind, amount)?;
        }
        Ok(())
    }

    /// Move `amount` of a kind into another ledger
    pub fn transfer_to(&mut self, other: &mut ResourceLedger, kind: &str, amount: u32) -> Result<(), ValidationError> {
        self.remove(kind, amount)?;
        other.add(kind, amount);
        Ok(())
    }

    /// Move everything into another ledger, leaving this one empty
    pub fn drain_into(&mut self, other: &mut ResourceLedger) {
        for (kind, amount) in self.items.drain() {
            other.add(&kind, amount);
        }
    }

    /// Sum of all quantities
    pub fn total_quantity(&self) -> u32 {
        self.items.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct kinds held
    pub fn kinds(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
