//! Match configuration.
//!
//! Timer durations, urgency thresholds and the mana persistence flag are
//! configured per match. Defaults match the shipped game: a 60 second turn,
//! 10 second card decisions with a 3 second validation window, and a
//! 15 second combo window.
//!
//! ```
//! use arena_ccg::core::MatchConfig;
//!
//! let config = MatchConfig::new().with_mana_persistence(true);
//! assert_eq!(config.turn_duration, 60.0);
//! assert!(config.mana_persists);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::ContentError;

/// Turn time thresholds, in seconds remaining.
///
/// A threshold is exclusive on the calmer level: exactly 30.0 seconds
/// remaining is already `Warning`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyThresholds {
    pub warning: f64,
    pub urgent: f64,
    pub critical: f64,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            warning: 30.0,
            urgent: 15.0,
            critical: 5.0,
        }
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Length of a turn, in seconds.
    pub turn_duration: f64,

    /// Time a scanned card waits for a play/discard decision.
    pub card_decision_duration: f64,

    /// Leading part of the decision window spent validating the scan.
    pub validation_window: f64,

    /// Inactivity window before a partial combo expires.
    pub combo_window: f64,

    pub urgency: UrgencyThresholds,

    /// Keep unspent mana across turns instead of zeroing it.
    pub mana_persists: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            turn_duration: 60.0,
            card_decision_duration: 10.0,
            validation_window: 3.0,
            combo_window: 15.0,
            urgency: UrgencyThresholds::default(),
            mana_persists: false,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_turn_duration(mut self, seconds: f64) -> Self {
        self.turn_duration = seconds;
        self
    }

    #[must_use]
    pub fn with_card_decision(mut self, seconds: f64, validation_window: f64) -> Self {
        self.card_decision_duration = seconds;
        self.validation_window = validation_window;
        self
    }

    #[must_use]
    pub fn with_combo_window(mut self, seconds: f64) -> Self {
        self.combo_window = seconds;
        self
    }

    #[must_use]
    pub fn with_mana_persistence(mut self, persists: bool) -> Self {
        self.mana_persists = persists;
        self
    }

    /// Reject configurations the timers cannot run with.
    pub fn validate(&self) -> Result<(), ContentError> {
        let durations = [
            ("turn_duration", self.turn_duration),
            ("card_decision_duration", self.card_decision_duration),
            ("combo_window", self.combo_window),
        ];
        for (name, value) in durations {
            if !(value.is_finite() && value > 0.0) {
                return Err(ContentError::invalid(
                    "config",
                    format!("{name} must be a positive number of seconds, got {value}"),
                ));
            }
        }

        if !(0.0..=self.card_decision_duration).contains(&self.validation_window) {
            return Err(ContentError::invalid(
                "config",
                format!(
                    "validation_window {} must lie within the decision duration {}",
                    self.validation_window, self.card_decision_duration
                ),
            ));
        }

        let t = self.urgency;
        if !(t.warning > t.urgent && t.urgent > t.critical && t.critical >= 0.0) {
            return Err(ContentError::invalid(
                "config",
                format!(
                    "urgency thresholds must descend: {} > {} > {} >= 0",
                    t.warning, t.urgent, t.critical
                ),
            ));
        }

        Ok(())
    }
}
