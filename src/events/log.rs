//! Per-tick event log.

use serde::{Deserialize, Serialize};

use super::event::MatchEvent;

/// Ordered buffer of emitted events.
///
/// Components push while handling an input or a tick; the orchestrator
/// drains the log afterwards and forwards the events in order.
///
/// ```
/// use arena_ccg::events::{EventLog, MatchEvent};
///
/// let mut log = EventLog::new();
/// log.push(MatchEvent::TurnTimerExpired { turn_number: 1 });
///
/// let drained = log.drain();
/// assert_eq!(drained.len(), 1);
/// assert!(log.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MatchEvent) {
        tracing::trace!(event = event.name(), "emit");
        self.events.push(event);
    }

    /// Take every buffered event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }

    /// Count buffered events with the given name.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }
}

impl Extend<MatchEvent> for EventLog {
    fn extend<I: IntoIterator<Item = MatchEvent>>(&mut self, iter: I) {
        for event in iter {
            self.push(event);
        }
    }
}
