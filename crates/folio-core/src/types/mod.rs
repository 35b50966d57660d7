//! Core types for folio.

mod entity;
mod relationship;

pub use entity::*;
pub use relationship::*;
