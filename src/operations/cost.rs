//! Operation duration, discounted for odds above 100

use crate::core::constants::{COST_DISCOUNT_PIVOT, COST_DISCOUNT_SCALE, COST_DISCOUNT_SHIFT};
use crate::rules::OperationRule;

/// Fraction of the base cost saved at the given odds
///
/// `((odds - 100) / (odds - 82)) * 24 / 100`, evaluated only above 100.
pub fn cost_discount(odds: f64) -> f64 {
    if odds > COST_DISCOUNT_PIVOT {
        (odds - COST_DISCOUNT_PIVOT) / (odds - COST_DISCOUNT_SHIFT) * COST_DISCOUNT_SCALE / 100.0
    } else {
        0.0
    }
}

/// Hours the operation takes at the given (unrounded) odds
pub fn compute_cost(rule: &OperationRule, odds: f64) -> i32 {
    let costs = rule.costs;
    if odds > COST_DISCOUNT_PIVOT {
        costs - (f64::from(costs) * cost_discount(odds)).round() as i32
    } else {
        costs
    }
}
