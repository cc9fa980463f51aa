//! Two-currency resource economy.
//!
//! - **Energy**: universal, refilled each turn to the turn number.
//! - **Mana**: six colors, generated mainly by the arena.
//!
//! ## Key Types
//!
//! - [`ManaColor`]: the six colors and their opposition table
//! - [`ManaPool`], [`ResourcePool`], [`Cost`]: amounts
//! - [`ResourceLedger`]: one side's pool with affordability and spending

mod color;
mod ledger;
mod pool;

pub use color::ManaColor;
pub use ledger::{Affordability, MissingResource, ResourceKind, ResourceLedger};
pub use pool::{Cost, ManaPool, ResourcePool};
