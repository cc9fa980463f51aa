//! Error types.
//!
//! `RulesError` covers every guard rejection the match can produce at
//! runtime. A rejected operation never mutates match state, so callers can
//! surface the error to the player and carry on.
//!
//! `ContentError` covers loading configuration and content (arenas, combos)
//! before a match starts.

use smallvec::SmallVec;
use thiserror::Error;

use super::entity::{CardSku, EntityId};
use super::side::PlayerSide;
use crate::resources::MissingResource;

/// Which uniqueness rule blocked a play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DuplicatePlay {
    /// The sku has already been played this match.
    OncePerGame { sku: CardSku, played_on_turn: u32 },
    /// A legendary creature with this name is already on the side's battlefield.
    Legendary { name: String, side: PlayerSide },
}

impl std::fmt::Display for DuplicatePlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePlay::OncePerGame { sku, played_on_turn } => {
                write!(f, "{sku} is once-per-game and was played on turn {played_on_turn}")
            }
            DuplicatePlay::Legendary { name, side } => {
                write!(f, "legendary {name} is already in play for the {side}")
            }
        }
    }
}

/// Runtime rule violations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("insufficient resources: {}", format_missing(.missing))]
    InsufficientResource {
        missing: SmallVec<[MissingResource; 4]>,
    },

    #[error("duplicate play: {0}")]
    DuplicatePlay(DuplicatePlay),

    #[error("{card} is not in any tracked zone")]
    InvalidZoneTransition { card: EntityId },

    #[error("it is not the {side}'s turn")]
    NotActivePlayer { side: PlayerSide },

    #[error("no turn is active")]
    NoActiveTurn,

    #[error("turn {turn_number} is still active; end it first")]
    TurnAlreadyActive { turn_number: u32 },

    #[error("{card} has no pending decision")]
    CardNotPending { card: EntityId },

    #[error("{card} is already awaiting a decision")]
    CardAlreadyPending { card: EntityId },

    #[error("{card} is still being validated")]
    CardValidating { card: EntityId },

    #[error("an arena has already been selected for this match")]
    ArenaAlreadySelected,

    #[error("{card} does not belong to the {side}")]
    NotCardOwner { card: EntityId, side: PlayerSide },

    #[error("{card} is not known to this match")]
    UnknownCard { card: EntityId },
}

fn format_missing(missing: &[MissingResource]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures while loading configuration or content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {what}: {message}")]
    Invalid { what: &'static str, message: String },

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl ContentError {
    pub(crate) fn invalid(what: &'static str, message: impl Into<String>) -> Self {
        ContentError::Invalid {
            what,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{ManaColor, ResourceKind};
    use smallvec::smallvec;

    #[test]
    fn test_insufficient_message_lists_every_item() {
        let err = RulesError::InsufficientResource {
            missing: smallvec![
                MissingResource::new(ResourceKind::Energy, 2, 1),
                MissingResource::new(ResourceKind::Mana(ManaColor::Azure), 1, 0),
            ],
        };

        let message = err.to_string();
        assert!(message.contains("energy"));
        assert!(message.contains("azure"));
    }

    #[test]
    fn test_duplicate_play_message() {
        let err = RulesError::DuplicatePlay(DuplicatePlay::OncePerGame {
            sku: CardSku::new("HERO_001"),
            played_on_turn: 3,
        });
        assert_eq!(
            err.to_string(),
            "duplicate play: HERO_001 is once-per-game and was played on turn 3"
        );
    }
}
