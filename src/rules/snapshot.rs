//! Match snapshots for network resync.
//!
//! A snapshot holds runtime state only. Content (card definitions, arena
//! definitions, combo definitions) is loaded by every peer up front, so a
//! snapshot refers to it by id and stays small.

use serde::{Deserialize, Serialize};

use crate::arena::ArenaState;
use crate::cards::CardSummary;
use crate::combos::ActiveCombo;
use crate::core::{ContentError, PlayerSide, SideMap};
use crate::resources::ResourcePool;
use crate::timers::TurnTimers;
use crate::uniqueness::UniquenessGuard;
use crate::zones::ZoneRegistry;

/// Serializable runtime state of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub turn_number: u32,
    pub active_side: Option<PlayerSide>,
    pub resources: SideMap<ResourcePool>,
    pub timers: TurnTimers,
    pub arena: ArenaState,
    pub zones: ZoneRegistry,
    pub uniqueness: UniquenessGuard,
    /// Pending combo chains, oldest first.
    pub combos: Vec<ActiveCombo>,
    /// Cards known to the match, ordered by id.
    pub cards: Vec<CardSummary>,
}

impl MatchSnapshot {
    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ContentError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContentError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;

    fn empty() -> MatchSnapshot {
        MatchSnapshot {
            turn_number: 4,
            active_side: Some(PlayerSide::Opponent),
            resources: SideMap::with_default(),
            timers: TurnTimers::new(&MatchConfig::default()),
            arena: ArenaState::default(),
            zones: ZoneRegistry::new(),
            uniqueness: UniquenessGuard::new(),
            combos: Vec::new(),
            cards: Vec::new(),
        }
    }

    #[test]
    fn test_bytes_restore_snapshot() {
        let snapshot = empty();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(MatchSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = empty().to_bytes().unwrap();
        let err = MatchSnapshot::from_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(err, Err(ContentError::Snapshot(_))));
    }
}
