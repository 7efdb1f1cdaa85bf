//! The foundational [`Bean`] trait and its kind/capability vocabulary.

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod kind;

// -----------------------------------------------------------------------------
// Exports

pub use bean::Bean;
pub use kind::{BeanKind, Capability};
