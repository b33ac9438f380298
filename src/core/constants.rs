//! Scoring constants - the game-balance numbers behind the project formulas
//!
//! The curve parameters feed [`crate::operations::odds::stat_effect`]:
//! `c * (y / (y + 1)) + d` with `y = e^(stat^b / a) - 1`.

// Reactions curve (a, b, c, d)
pub const REACTIONS_CURVE: (f64, f64, f64, f64) = (2000.0, 2.0, 16.0, -9.0);
// Time units curve
pub const TIME_UNITS_CURVE: (f64, f64, f64, f64) = (1400.0, 1.8, 15.0, -10.0);
// Stamina curve
pub const STAMINA_CURVE: (f64, f64, f64, f64) = (1600.0, 1.8, 10.0, -6.0);
// Psi skill and psi strength share one curve
pub const PSI_CURVE: (f64, f64, f64, f64) = (8000.0, 2.2, 8.0, 0.0);

/// Psi strength alone still gives some defence; it counts a third
pub const PSI_STRENGTH_ONLY_DIVISOR: f64 = 3.0;

// Bravery is read in tens, each soldier pays a flat offset, the mean is scaled
pub const BRAVERY_STEP: i32 = 10;
pub const BRAVERY_OFFSET: f64 = 3.0;
pub const BRAVERY_SCALE: f64 = 5.0;

// Field officer bonus: a*rank^2 + b*rank + c
pub const OFFICER_QUADRATIC: f64 = -0.2321;
pub const OFFICER_LINEAR: f64 = 2.5036;
pub const OFFICER_CONSTANT: f64 = 0.0357;

/// Default soldier-type effectiveness, in percent
pub const DEFAULT_EFFECTIVENESS: f64 = 100.0;

/// Each heavy weapon kind costs this many concealment penalties, split over the team
pub const HEAVY_ITEM_PENALTY_FACTOR: f64 = 4.0;

// Item categories consulted by the equipment penalty
pub const CATEGORY_CONCEALABLE: &str = "STR_CONCEALABLE";
pub const CATEGORY_HEAVY_WEAPONS: &str = "STR_HEAVY_WEAPONS";
pub const CATEGORY_CLIPS: &str = "STR_CLIPS";

// Cost discount: ((odds - PIVOT) / (odds - SHIFT)) * SCALE / 100, only above PIVOT
pub const COST_DISCOUNT_PIVOT: f64 = 100.0;
pub const COST_DISCOUNT_SHIFT: f64 = 82.0;
pub const COST_DISCOUNT_SCALE: f64 = 24.0;

pub const HOURS_PER_DAY: i32 = 24;
