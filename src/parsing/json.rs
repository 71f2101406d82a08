use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;
use thiserror::Error;

use crate::core::{Lattice, Structure, StructureError};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid structure JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid structure at index {index}: {source}")]
    Structure {
        index: usize,
        source: StructureError,
    },

    #[error("structure at index {index} contains a non-finite number")]
    NonFinite { index: usize },

    #[error("expected exactly one structure, found {found}")]
    ExpectedSingle { found: usize },
}

/// Lattice given either as cell parameters (angles in degrees) or as an
/// explicit 3x3 row-vector matrix.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LatticeSpec {
    Parameters {
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    },
    Matrix([[f64; 3]; 3]),
}

impl LatticeSpec {
    fn values(&self) -> Vec<f64> {
        match self {
            Self::Parameters {
                a,
                b,
                c,
                alpha,
                beta,
                gamma,
            } => vec![*a, *b, *c, *alpha, *beta, *gamma],
            Self::Matrix(m) => m.iter().flatten().copied().collect(),
        }
    }

    fn build(&self) -> Lattice {
        match self {
            Self::Parameters {
                a,
                b,
                c,
                alpha,
                beta,
                gamma,
            } => Lattice::from_parameters(*a, *b, *c, *alpha, *beta, *gamma),
            Self::Matrix(m) => Lattice::from_matrix(*m),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StructureSpec {
    lattice: LatticeSpec,
    species: Vec<String>,
    frac_coords: Vec<[f64; 3]>,
}

impl StructureSpec {
    fn build(self, index: usize) -> Result<Structure, ParseError> {
        let finite = self.lattice.values().iter().all(|v| v.is_finite())
            && self
                .frac_coords
                .iter()
                .flatten()
                .all(|v| v.is_finite());
        if !finite {
            return Err(ParseError::NonFinite { index });
        }

        let coords = self
            .frac_coords
            .iter()
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        Structure::new(self.lattice.build(), self.species, coords)
            .map_err(|source| ParseError::Structure { index, source })
    }
}

/// A set file is either a bare JSON list of structures or an object with a
/// `structures` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SetSpec {
    Bare(Vec<StructureSpec>),
    Wrapped { structures: Vec<StructureSpec> },
}

/// Parse a structure set from JSON text.
///
/// # Errors
///
/// Returns a `ParseError` for malformed JSON, non-finite numbers, or
/// inconsistent site lists.
pub fn parse_structures(text: &str) -> Result<Vec<Structure>, ParseError> {
    let specs = match serde_json::from_str::<SetSpec>(text)? {
        SetSpec::Bare(specs) | SetSpec::Wrapped { structures: specs } => specs,
    };
    specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| spec.build(index))
        .collect()
}

/// Load a structure set from a JSON file.
///
/// # Errors
///
/// See [`parse_structures`]; IO failures are reported as `ParseError::Io`.
pub fn load_structures(path: &Path) -> Result<Vec<Structure>, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_structures(&text)
}

/// Load a file that must contain exactly one structure.
///
/// # Errors
///
/// Returns `ParseError::ExpectedSingle` when the file holds zero or more
/// than one structure.
pub fn load_structure(path: &Path) -> Result<Structure, ParseError> {
    let mut structures = load_structures(path)?;
    if structures.len() != 1 {
        return Err(ParseError::ExpectedSingle {
            found: structures.len(),
        });
    }
    Ok(structures.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PARAMS_SET: &str = r#"{
        "structures": [
            {
                "lattice": {"a": 3.84, "b": 3.84, "c": 3.84, "alpha": 120.0, "beta": 90.0, "gamma": 60.0},
                "species": ["Si", "Si"],
                "frac_coords": [[0.0, 0.0, 0.0], [0.75, 0.5, 0.75]]
            }
        ]
    }"#;

    const BARE_MATRIX_SET: &str = r#"[
        {
            "lattice": [[3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]],
            "species": ["Ni"],
            "frac_coords": [[0.0, 0.0, 0.0]]
        }
    ]"#;

    #[test]
    fn test_parse_wrapped_parameters() {
        let structures = parse_structures(PARAMS_SET).unwrap();
        assert_eq!(structures.len(), 1);
        let s = &structures[0];
        assert_eq!(s.num_sites(), 2);
        assert_relative_eq!(s.lattice().lengths()[0], 3.84, epsilon = 1e-10);
        assert_relative_eq!(s.lattice().angles()[0], 120.0, epsilon = 1e-6);
    }

    #[test]
    fn test_parse_bare_matrix_list() {
        let structures = parse_structures(BARE_MATRIX_SET).unwrap();
        assert_eq!(structures.len(), 1);
        assert_eq!(structures[0].species()[0], "Ni");
        assert_relative_eq!(structures[0].lattice().volume(), 27.0, epsilon = 1e-10);
    }

    #[test]
    fn test_mismatched_sites_reported_with_index() {
        let text = r#"[
            {
                "lattice": [[3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]],
                "species": ["Ni", "Ni"],
                "frac_coords": [[0.0, 0.0, 0.0]]
            }
        ]"#;
        let err = parse_structures(text).unwrap_err();
        assert!(matches!(err, ParseError::Structure { index: 0, .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(parse_structures("not json").is_err());
        assert!(parse_structures("{}").is_err());
    }
}
