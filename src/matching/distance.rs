use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::core::Structure;
use crate::fingerprint::{
    structure_fingerprint, CompositionFeaturizer, FeaturizeError, SiteFeaturizer,
};
use crate::progress::ProgressSink;

/// Which fingerprint feeds a distance matrix build.
///
/// The two kinds are not interchangeable; a single build uses one kind for
/// both collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintKind {
    /// Element-property fingerprint of the composition.
    Composition,
    /// Site-averaged local-geometry fingerprint.
    Structure,
}

/// Composition fingerprints for a whole collection, in input order.
///
/// Parallelized per structure; failures propagate and abort the build.
///
/// # Errors
///
/// Propagates any featurizer failure; no fallback fingerprints.
pub fn composition_fingerprints(
    structures: &[Structure],
    featurizer: &dyn CompositionFeaturizer,
    progress: &dyn ProgressSink,
) -> Result<Vec<Vec<f64>>, FeaturizeError> {
    progress.begin("composition fingerprints", structures.len());
    let result = structures
        .par_iter()
        .map(|s| {
            let fp = featurizer.featurize(&s.composition());
            progress.step();
            fp
        })
        .collect();
    progress.finish();
    result
}

/// Site-averaged structure fingerprints for a whole collection, in input
/// order.
///
/// # Errors
///
/// Propagates any featurizer failure; no fallback fingerprints.
pub fn structure_fingerprints(
    structures: &[Structure],
    featurizer: &dyn SiteFeaturizer,
    progress: &dyn ProgressSink,
) -> Result<Vec<Vec<f64>>, FeaturizeError> {
    progress.begin("structure fingerprints", structures.len());
    let result = structures
        .par_iter()
        .map(|s| {
            let fp = structure_fingerprint(featurizer, s);
            progress.step();
            fp
        })
        .collect();
    progress.finish();
    result
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Full cross-distance matrix between two fingerprint collections,
/// shape (|a|, |b|).
#[must_use]
pub fn cross_distance_matrix(a: &[Vec<f64>], b: &[Vec<f64>]) -> DMatrix<f64> {
    DMatrix::from_fn(a.len(), b.len(), |i, j| euclidean(&a[i], &b[j]))
}

/// Self-distance matrix via the condensed upper triangle, mirrored to a
/// full square. Numerically equivalent to the cross path for identical
/// collections; the diagonal is exactly zero by construction.
#[must_use]
pub fn self_distance_matrix(fps: &[Vec<f64>]) -> DMatrix<f64> {
    let n = fps.len();
    let mut dm = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(&fps[i], &fps[j]);
            dm[(i, j)] = d;
            dm[(j, i)] = d;
        }
    }
    dm
}
