//! Core data model: lattices, structures, compositions, element data.
//!
//! These types are the inputs to the matching pipeline. Structures are
//! immutable once built; all matrices downstream index into the caller's
//! structure collections by position.

pub mod composition;
pub mod elements;
pub mod lattice;
pub mod structure;

pub use composition::Composition;
pub use lattice::Lattice;
pub use structure::{Structure, StructureError};
