//! Domain layer types and invariants.

pub mod carousel;
pub mod error;
pub mod offices;
pub mod schema;
