//! Covert operations - odds, duration, staging and commit

pub mod cost;
pub mod draft;
pub mod odds;
pub mod operation;
pub mod rating;

pub use cost::{compute_cost, cost_discount};
pub use draft::OperationDraft;
pub use odds::{compute_odds, officer_effect, stat_effect, OddsContext};
pub use operation::Operation;
pub use rating::{DurationRating, OddsRating};
