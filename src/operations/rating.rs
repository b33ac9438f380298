//! Word ratings the UI shows in place of raw odds and hours

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::config;
use crate::core::constants::HOURS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OddsRating {
    Great,
    Good,
    Average,
    Poor,
    VeryLow,
    None,
}

impl OddsRating {
    /// Rate odds after rounding them to a whole percent
    pub fn from_odds(odds: f64) -> Self {
        let cfg = config();
        let odds = odds.round() as i32;
        if odds > cfg.odds_great {
            OddsRating::Great
        } else if odds > cfg.odds_good {
            OddsRating::Good
        } else if odds > cfg.odds_average {
            OddsRating::Average
        } else if odds > cfg.odds_poor {
            OddsRating::Poor
        } else if odds > 0 {
            OddsRating::VeryLow
        } else {
            OddsRating::None
        }
    }
}

impl fmt::Display for OddsRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OddsRating::Great => "great",
            OddsRating::Good => "good",
            OddsRating::Average => "average",
            OddsRating::Poor => "poor",
            OddsRating::VeryLow => "very low",
            OddsRating::None => "none",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationRating {
    SeveralMonths,
    AMonth,
    SeveralWeeks,
    Week,
    SeveralDays,
}

impl DurationRating {
    pub fn from_hours(hours: i32) -> Self {
        let cfg = config();
        if hours > cfg.duration_several_months_days * HOURS_PER_DAY {
            DurationRating::SeveralMonths
        } else if hours > cfg.duration_month_days * HOURS_PER_DAY {
            DurationRating::AMonth
        } else if hours > cfg.duration_several_weeks_days * HOURS_PER_DAY {
            DurationRating::SeveralWeeks
        } else if hours > cfg.duration_week_days * HOURS_PER_DAY {
            DurationRating::Week
        } else {
            DurationRating::SeveralDays
        }
    }
}

impl fmt::Display for DurationRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DurationRating::SeveralMonths => "several months",
            DurationRating::AMonth => "a month",
            DurationRating::SeveralWeeks => "several weeks",
            DurationRating::Week => "a week",
            DurationRating::SeveralDays => "several days",
        };
        f.write_str(label)
    }
}
