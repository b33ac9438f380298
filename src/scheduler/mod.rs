//! Deferred completions - transfers and postponed transformations
//!
//! Anything that lands after a delay goes through a [`DeferredScheduler`]:
//! arriving soldiers, produced items and transformations whose stat change
//! waits for its transformation time.

pub mod payload;
pub mod queue;

pub use payload::{CompletionPayload, PostponedTransformation};
pub use queue::{DeferredScheduler, ScheduledCompletion};
