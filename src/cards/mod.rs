//! Card system: abilities, definitions, instances and registry.
//!
//! ## Key Types
//!
//! - `AbilityKind`: what a card can resolve; combos match on these
//! - `CardDefinition`: static printed card data
//! - `CardInstance`: one scanned physical card in a match
//! - `CardRegistry`: sku to definition lookup

pub mod ability;
pub mod definition;
pub mod instance;
pub mod registry;

pub use ability::AbilityKind;
pub use definition::{CardDefinition, CardKind};
pub use instance::{CardInstance, CardSummary};
pub use registry::CardRegistry;
