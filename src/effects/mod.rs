//! Effect descriptions relayed to external resolution.
//!
//! Card sacrifice effects, combo bonuses, arena special rules and objective
//! rewards all carry `Effect` values. The rules core routes them; it does
//! not interpret their magnitude against combat state.

mod effect;

pub use effect::{DamageType, Effect};
