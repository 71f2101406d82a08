//! Fingerprint featurizer seams and the built-in reference featurizers.
//!
//! The matching pipeline only depends on the two traits here:
//!
//! - [`CompositionFeaturizer`]: composition -> fixed-length vector
//! - [`SiteFeaturizer`]: (structure, site index) -> fixed-length vector
//!
//! A whole-structure fingerprint is the per-site average, computed by
//! [`structure_fingerprint`]. The two fingerprint kinds (composition vs.
//! structure) are never mixed within one distance matrix; the kind is
//! selected once per build.
//!
//! Featurizer failures propagate unmasked: a structure the featurizer cannot
//! process is an input problem, and substituting a default fingerprint would
//! silently corrupt downstream match rates.

pub mod element_property;
pub mod site_stats;

pub use element_property::ElementPropertyFeaturizer;
pub use site_stats::SiteStatsFeaturizer;

use thiserror::Error;

use crate::core::{Composition, Structure};

#[derive(Debug, Error)]
pub enum FeaturizeError {
    #[error("unknown element symbol '{symbol}' (not in the property table)")]
    UnknownElement { symbol: String },

    #[error("cannot featurize a structure with no sites")]
    EmptyStructure,

    #[error("site {site} has no neighbors within {rmax} angstroms")]
    IsolatedSite { site: usize, rmax: f64 },
}

/// Maps a composition to a fixed-length feature vector.
pub trait CompositionFeaturizer: Send + Sync {
    /// # Errors
    ///
    /// Returns a `FeaturizeError` when the composition cannot be processed,
    /// e.g. it contains an element missing from the property table.
    fn featurize(&self, composition: &Composition) -> Result<Vec<f64>, FeaturizeError>;
}

/// Maps one site of a structure to a fixed-length feature vector.
pub trait SiteFeaturizer: Send + Sync {
    /// # Errors
    ///
    /// Returns a `FeaturizeError` when the site cannot be processed.
    fn featurize(&self, structure: &Structure, site: usize) -> Result<Vec<f64>, FeaturizeError>;
}

/// Structure-level fingerprint: the mean of the per-site fingerprints.
///
/// # Errors
///
/// Returns `FeaturizeError::EmptyStructure` for a structure with no sites,
/// and propagates any per-site featurizer error.
pub fn structure_fingerprint(
    featurizer: &dyn SiteFeaturizer,
    structure: &Structure,
) -> Result<Vec<f64>, FeaturizeError> {
    if structure.num_sites() == 0 {
        return Err(FeaturizeError::EmptyStructure);
    }

    let mut mean: Vec<f64> = featurizer.featurize(structure, 0)?;
    for site in 1..structure.num_sites() {
        let fp = featurizer.featurize(structure, site)?;
        for (acc, x) in mean.iter_mut().zip(fp.iter()) {
            *acc += x;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let n = structure.num_sites() as f64;
    for x in &mut mean {
        *x /= n;
    }
    Ok(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    use crate::core::Lattice;

    struct SiteIndexFeaturizer;

    impl SiteFeaturizer for SiteIndexFeaturizer {
        fn featurize(&self, _: &Structure, site: usize) -> Result<Vec<f64>, FeaturizeError> {
            #[allow(clippy::cast_precision_loss)]
            {
                Ok(vec![site as f64, 1.0])
            }
        }
    }

    #[test]
    fn test_structure_fingerprint_is_site_mean() {
        let s = Structure::new(
            Lattice::from_parameters(3.0, 3.0, 3.0, 90.0, 90.0, 90.0),
            vec!["Si".to_string(), "Si".to_string(), "Si".to_string()],
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.5, 0.5, 0.0),
                Vector3::new(0.5, 0.0, 0.5),
            ],
        )
        .unwrap();

        let fp = structure_fingerprint(&SiteIndexFeaturizer, &s).unwrap();
        // Site indices 0, 1, 2 average to 1.0
        assert!((fp[0] - 1.0).abs() < 1e-12);
        assert!((fp[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_structure_rejected() {
        let s = Structure::new(
            Lattice::from_parameters(3.0, 3.0, 3.0, 90.0, 90.0, 90.0),
            vec![],
            vec![],
        )
        .unwrap();
        assert!(matches!(
            structure_fingerprint(&SiteIndexFeaturizer, &s),
            Err(FeaturizeError::EmptyStructure)
        ));
    }
}
