//! Multi-step ability combos.
//!
//! ## Key Types
//!
//! - [`ComboDefinition`]: content-loaded ability set with bonus effects
//! - [`ComboTracker`]: per-side chain matching with a rolling window
//! - [`ActiveCombo`], [`ComboState`]: a chain in progress

mod definition;
mod tracker;

pub use definition::{ComboDefinition, ComboId};
pub use tracker::{ActiveCombo, ComboCompletion, ComboState, ComboTracker};
