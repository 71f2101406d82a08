//! Structure-set input parsing.
//!
//! The only supported input is a serde-backed JSON description of
//! structures (lattice + species + fractional coordinates); parsing
//! crystallographic file formats (CIF, POSCAR, ...) is explicitly out of
//! scope and belongs to external tooling.

pub mod json;

pub use json::{load_structure, load_structures, parse_structures, ParseError};
