//! Match-scoped uniqueness: once-per-game cards and the legendary rule.

mod guard;

pub use guard::UniquenessGuard;
