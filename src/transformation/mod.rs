//! Soldier transformations - preview, eligibility, commit and completion

pub mod changes;
pub mod commit;
pub mod complete;
pub mod eligibility;
pub mod preview;

pub use changes::{headroom, roll_stat_change, stat_change_bound};
pub use commit::{commit_transformation, PlayerInput, TransitionOutcome};
pub use complete::apply_transformation;
pub use eligibility::{check_eligibility, check_transformation, is_eligible};
pub use preview::{
    evaluate_bonus, preview_stat_changes, projected_delay_days, projected_delay_hours, StatPreview,
    TransformationPreview,
};
