use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::core::Structure;
use crate::matching::comparator::StructureComparator;
use crate::progress::ProgressSink;

/// Boolean match matrix; rows index the test collection, columns the
/// generated collection.
pub type MatchMatrix = DMatrix<bool>;

/// Threshold a distance matrix into a match matrix: `distance <= cutoff`.
#[must_use]
pub fn threshold(distances: &DMatrix<f64>, cutoff: f64) -> MatchMatrix {
    distances.map(|d| d <= cutoff)
}

/// Elementwise logical AND of two criterion matrices.
///
/// Shapes must agree; this is enforced upstream where both matrices are
/// built over the same pair of collections.
#[must_use]
pub fn combine_and(a: &MatchMatrix, b: &MatchMatrix) -> MatchMatrix {
    a.zip_map(b, |x, y| x && y)
}

/// All-pairs match matrix from a direct equivalence predicate.
///
/// Every cell is one predicate call; with `symmetric` only the upper
/// triangle is evaluated and mirrored, and the diagonal is still evaluated
/// explicitly (a structure the predicate cannot match to itself stays
/// false). Rows are evaluated in parallel; output is independent of the
/// scheduling order.
#[must_use]
pub fn pairwise_match_matrix(
    test: &[Structure],
    gen: &[Structure],
    comparator: &dyn StructureComparator,
    symmetric: bool,
    progress: &dyn ProgressSink,
) -> MatchMatrix {
    let (rows, cols) = (test.len(), gen.len());
    progress.begin("pairwise structure matching", rows);

    let row_data: Vec<Vec<bool>> = test
        .par_iter()
        .enumerate()
        .map(|(i, ts)| {
            let row = gen
                .iter()
                .enumerate()
                .map(|(j, gs)| {
                    if symmetric && j < i {
                        // Mirrored from the upper triangle after the loop
                        false
                    } else {
                        comparator.equivalent(ts, gs)
                    }
                })
                .collect();
            progress.step();
            row
        })
        .collect();
    progress.finish();

    let mut matrix = DMatrix::from_fn(rows, cols, |i, j| row_data[i][j]);
    // Mirroring only makes sense for a square self-comparison
    if symmetric && rows == cols {
        for i in 0..rows {
            for j in 0..i {
                matrix[(i, j)] = matrix[(j, i)];
            }
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    use crate::core::{Lattice, Structure};
    use crate::matching::comparator::ToleranceComparator;
    use crate::progress::NoopProgress;

    fn dummy_structures() -> Vec<Structure> {
        let lattice = Lattice::from_parameters(3.84, 3.84, 3.84, 120.0, 90.0, 60.0);
        let coords = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.75, 0.5, 0.75)];
        ["Si", "Ni"]
            .iter()
            .map(|sp| {
                Structure::new(
                    lattice.clone(),
                    vec![(*sp).to_string(), (*sp).to_string()],
                    coords.clone(),
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_threshold() {
        let dm = DMatrix::from_row_slice(2, 2, &[0.0, 5.0, 12.0, 10.0]);
        let mm = threshold(&dm, 10.0);
        assert!(mm[(0, 0)]);
        assert!(mm[(0, 1)]);
        assert!(!mm[(1, 0)]);
        assert!(mm[(1, 1)]);
    }

    #[test]
    fn test_threshold_monotonic_in_cutoff() {
        let dm = DMatrix::from_row_slice(2, 3, &[0.1, 2.0, 7.5, 3.3, 9.9, 0.0]);
        let tight = threshold(&dm, 2.0);
        let loose = threshold(&dm, 8.0);
        for i in 0..2 {
            for j in 0..3 {
                // Raising the cutoff never turns a match off
                assert!(!tight[(i, j)] || loose[(i, j)]);
            }
        }
    }

    #[test]
    fn test_combine_and() {
        let a = DMatrix::from_row_slice(2, 2, &[true, true, false, true]);
        let b = DMatrix::from_row_slice(2, 2, &[true, false, false, true]);
        let c = combine_and(&a, &b);
        assert!(c[(0, 0)]);
        assert!(!c[(0, 1)]);
        assert!(!c[(1, 0)]);
        assert!(c[(1, 1)]);
        // Never true where either input is false
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(c[(i, j)], a[(i, j)] && b[(i, j)]);
            }
        }
    }

    #[test]
    fn test_pairwise_identity() {
        let structures = dummy_structures();
        let comparator = ToleranceComparator::new();
        let mm = pairwise_match_matrix(&structures, &structures, &comparator, true, &NoopProgress);
        assert!(mm[(0, 0)]);
        assert!(mm[(1, 1)]);
        assert!(!mm[(0, 1)]);
        assert!(!mm[(1, 0)]);
    }

    #[test]
    fn test_pairwise_symmetric_equals_full() {
        let structures = dummy_structures();
        let comparator = ToleranceComparator::new();
        let full =
            pairwise_match_matrix(&structures, &structures, &comparator, false, &NoopProgress);
        let mirrored =
            pairwise_match_matrix(&structures, &structures, &comparator, true, &NoopProgress);
        assert_eq!(full, mirrored);
    }
}
