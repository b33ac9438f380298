//! Item storage - base stock and staged project contributions

pub mod ledger;

pub use ledger::ResourceLedger;
