//! Project configuration with documented tunables
//!
//! These are the knobs around the scoring formulas: caps, default delays and
//! the thresholds the UI uses to describe a number in words. The formula
//! constants themselves live in [`crate::core::constants`].

/// Configuration for covert operations and soldier transformations
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    // === OPERATIONS ===
    /// Upper clamp on operation odds (percent)
    ///
    /// Odds are a relative score, not a probability. Anything above 100 is
    /// "better than certain" and buys a time discount, but no roster may push
    /// the score past this cap.
    pub max_odds: f64,

    /// Rounded odds above this are rated "great"
    pub odds_great: i32,
    /// Rounded odds above this are rated "good"
    pub odds_good: i32,
    /// Rounded odds above this are rated "average"
    pub odds_average: i32,
    /// Rounded odds above this are rated "poor"; anything positive below is "very low"
    pub odds_poor: i32,

    /// Operation durations above this many days read as "several months"
    pub duration_several_months_days: i32,
    /// ...above this many days, "a month"
    pub duration_month_days: i32,
    /// ...above this many days, "several weeks"
    pub duration_several_weeks_days: i32,
    /// ...above this many days, "a week"; below is "several days"
    pub duration_week_days: i32,

    // === TRANSFORMATIONS ===
    /// Transfer delay (hours) for clones and revived soldiers when the rule
    /// gives none
    ///
    /// A new roster occupant always arrives through a transfer so that the
    /// base never gains a soldier mid-screen.
    pub default_soldier_transfer_hours: i32,

    /// Transfer delay (hours) for an item produced by retiring a soldier
    /// when the rule gives none
    pub default_item_transfer_hours: i32,

    /// Show psi strength in previews once psi research is done, even for
    /// soldiers without psi skill
    pub psi_strength_eval: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            max_odds: 200.0,

            odds_great: 100,
            odds_good: 70,
            odds_average: 50,
            odds_poor: 25,

            duration_several_months_days: 45,
            duration_month_days: 20,
            duration_several_weeks_days: 10,
            duration_week_days: 6,

            default_soldier_transfer_hours: 24,
            default_item_transfer_hours: 1,

            psi_strength_eval: false,
        }
    }
}

impl ProjectConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_odds <= 0.0 {
            return Err(format!("max_odds ({}) must be positive", self.max_odds));
        }

        // Rating thresholds must strictly descend
        let odds = [self.odds_great, self.odds_good, self.odds_average, self.odds_poor];
        if odds.windows(2).any(|w| w[0] <= w[1]) {
            return Err(format!("odds thresholds must descend, got {:?}", odds));
        }

        let durations = [
            self.duration_several_months_days,
            self.duration_month_days,
            self.duration_several_weeks_days,
            self.duration_week_days,
        ];
        if durations.windows(2).any(|w| w[0] <= w[1]) {
            return Err(format!("duration thresholds must descend, got {:?}", durations));
        }

        if self.default_soldier_transfer_hours <= 0 || self.default_item_transfer_hours <= 0 {
            return Err("Default transfer delays must be positive".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ProjectConfig> = OnceLock::new();

/// Get the global project config (initializes with defaults if not set)
pub fn config() -> &'static ProjectConfig {
    CONFIG.get_or_init(ProjectConfig::default)
}

/// Set the global project config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: ProjectConfig) -> Result<(), ProjectConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ProjectConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unordered_odds_thresholds_rejected() {
        let config = ProjectConfig {
            odds_good: 120,
            ..ProjectConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_transfer_rejected() {
        let config = ProjectConfig {
            default_item_transfer_hours: 0,
            ..ProjectConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_global_config_defaults() {
        assert_eq!(config().max_odds, 200.0);
    }
}
