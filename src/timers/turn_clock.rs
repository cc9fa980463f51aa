//! The match turn clock.

use serde::{Deserialize, Serialize};

use crate::core::{RulesError, UrgencyThresholds};
use crate::events::{EventLog, MatchEvent};

/// How close the active turn is to running out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    Warning,
    Urgent,
    Critical,
}

impl Urgency {
    /// Urgency for a remaining time.
    ///
    /// Each threshold belongs to the more urgent level:
    ///
    /// ```
    /// use arena_ccg::core::UrgencyThresholds;
    /// use arena_ccg::timers::Urgency;
    ///
    /// let t = UrgencyThresholds::default();
    /// assert_eq!(Urgency::from_remaining(30.5, &t), Urgency::Normal);
    /// assert_eq!(Urgency::from_remaining(30.0, &t), Urgency::Warning);
    /// assert_eq!(Urgency::from_remaining(14.0, &t), Urgency::Urgent);
    /// assert_eq!(Urgency::from_remaining(5.0, &t), Urgency::Critical);
    /// ```
    #[must_use]
    pub fn from_remaining(time_remaining: f64, thresholds: &UrgencyThresholds) -> Self {
        if time_remaining > thresholds.warning {
            Urgency::Normal
        } else if time_remaining > thresholds.urgent {
            Urgency::Warning
        } else if time_remaining > thresholds.critical {
            Urgency::Urgent
        } else {
            Urgency::Critical
        }
    }
}

/// What a clock tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockTick {
    /// No turn is running.
    Idle,
    Running,
    /// The clock hit zero on this tick.
    Expired,
}

/// Single per-match turn countdown.
///
/// ```
/// use arena_ccg::core::MatchConfig;
/// use arena_ccg::events::EventLog;
/// use arena_ccg::timers::{ClockTick, TurnClock, Urgency};
///
/// let mut events = EventLog::new();
/// let mut clock = TurnClock::new(&MatchConfig::default());
/// clock.start_turn(1).unwrap();
///
/// assert_eq!(clock.tick(46.0, &mut events), ClockTick::Running);
/// assert_eq!(clock.time_remaining(), 14.0);
/// assert_eq!(clock.urgency(), Urgency::Urgent);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnClock {
    duration: f64,
    thresholds: UrgencyThresholds,
    turn_number: u32,
    time_remaining: f64,
    urgency: Urgency,
    running: bool,
}

impl TurnClock {
    #[must_use]
    pub fn new(config: &crate::core::MatchConfig) -> Self {
        Self {
            duration: config.turn_duration,
            thresholds: config.urgency,
            turn_number: 0,
            time_remaining: 0.0,
            urgency: Urgency::Normal,
            running: false,
        }
    }

    /// Start counting down a new turn.
    ///
    /// A running turn must be ended first.
    pub fn start_turn(&mut self, turn_number: u32) -> Result<(), RulesError> {
        if self.running {
            return Err(RulesError::TurnAlreadyActive {
                turn_number: self.turn_number,
            });
        }

        self.turn_number = turn_number;
        self.time_remaining = self.duration;
        self.urgency = Urgency::from_remaining(self.duration, &self.thresholds);
        self.running = true;
        tracing::info!(turn_number, duration = self.duration, "turn clock started");
        Ok(())
    }

    /// Advance the clock by `dt` seconds.
    ///
    /// Emits `TurnTimerUpdated` on every running tick. When the clock reaches
    /// zero it stops and emits `TurnTimerExpired`; the caller must then end
    /// the turn.
    pub fn tick(&mut self, dt: f64, events: &mut EventLog) -> ClockTick {
        if !self.running {
            return ClockTick::Idle;
        }
        if dt.is_finite() && dt > 0.0 {
            self.time_remaining = (self.time_remaining - dt).max(0.0);
        }

        let urgency = Urgency::from_remaining(self.time_remaining, &self.thresholds);
        if urgency != self.urgency {
            tracing::debug!(from = ?self.urgency, to = ?urgency, "turn urgency changed");
            self.urgency = urgency;
        }

        events.push(MatchEvent::TurnTimerUpdated {
            time_remaining: self.time_remaining,
            urgency: self.urgency,
        });

        if self.time_remaining <= 0.0 {
            self.running = false;
            tracing::info!(turn_number = self.turn_number, "turn clock expired");
            events.push(MatchEvent::TurnTimerExpired {
                turn_number: self.turn_number,
            });
            return ClockTick::Expired;
        }

        ClockTick::Running
    }

    /// Stop the clock. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    #[must_use]
    pub fn urgency(&self) -> Urgency {
        self.urgency
    }
}
