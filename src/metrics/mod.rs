//! Aggregate benchmark metrics derived from a match matrix.
//!
//! Everything here is a pure function of the boolean match matrix (rows =
//! test/reference structures, columns = generated structures); recomputing
//! with the same matrix always yields identical results. [`GenMetrics`]
//! packages the pipeline end to end: it owns the two collections, builds the
//! match matrix once through a [`MatchingEngine`], caches it, and exposes
//! the derived quantities.

use std::sync::OnceLock;

use crate::core::Structure;
use crate::matching::{MatchError, MatchMatrix, MatchingConfig, MatchingEngine};

/// Helper to convert a count to f64 for rate calculations.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Per-test-row match counts: entry i is the number of generated structures
/// matching reference structure i.
#[must_use]
pub fn match_counts(matrix: &MatchMatrix) -> Vec<usize> {
    (0..matrix.nrows())
        .map(|i| matrix.row(i).iter().filter(|m| **m).count())
        .collect()
}

/// Number of reference structures with at least one match.
///
/// A row with three matches still contributes one; this is coverage, not
/// the total number of matching pairs.
#[must_use]
pub fn match_count(matrix: &MatchMatrix) -> usize {
    match_counts(matrix).iter().filter(|c| **c > 0).count()
}

/// Fraction of reference structures covered by at least one generated
/// structure, in [0, 1]. Empty matrices rate 0.0, never NaN.
#[must_use]
pub fn match_rate(matrix: &MatchMatrix) -> f64 {
    if matrix.nrows() == 0 {
        return 0.0;
    }
    count_to_f64(match_count(matrix)) / count_to_f64(matrix.nrows())
}

/// Per-test-row excess matches: `match_counts[i] - 1` for covered rows,
/// 0 for uncovered rows. Never negative.
#[must_use]
pub fn duplicity_counts(matrix: &MatchMatrix) -> Vec<usize> {
    match_counts(matrix)
        .iter()
        .map(|c| c.saturating_sub(1))
        .collect()
}

/// Total redundant match events across all reference structures.
#[must_use]
pub fn duplicity_count(matrix: &MatchMatrix) -> usize {
    duplicity_counts(matrix).iter().sum()
}

/// Redundant matches per reference structure. Not bounded above by 1;
/// heavy near-duplicate generation pushes it past 1. Empty matrices rate
/// 0.0, never NaN.
#[must_use]
pub fn duplicity_rate(matrix: &MatchMatrix) -> f64 {
    if matrix.nrows() == 0 {
        return 0.0;
    }
    count_to_f64(duplicity_count(matrix)) / count_to_f64(matrix.nrows())
}

/// All derived metrics in one serializable bundle.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MetricsReport {
    pub num_test: usize,
    pub num_gen: usize,
    pub match_counts: Vec<usize>,
    pub match_count: usize,
    pub match_rate: f64,
    pub duplicity_counts: Vec<usize>,
    pub duplicity_count: usize,
    pub duplicity_rate: f64,
}

impl MetricsReport {
    /// Derive the full report from a match matrix.
    #[must_use]
    pub fn from_matrix(matrix: &MatchMatrix) -> Self {
        Self {
            num_test: matrix.nrows(),
            num_gen: matrix.ncols(),
            match_counts: match_counts(matrix),
            match_count: match_count(matrix),
            match_rate: match_rate(matrix),
            duplicity_counts: duplicity_counts(matrix),
            duplicity_count: duplicity_count(matrix),
            duplicity_rate: duplicity_rate(matrix),
        }
    }
}

/// End-to-end metrics computation over a pair of structure collections.
///
/// Collections are fixed at construction and immutable for the lifetime of
/// the value; the match matrix is computed lazily on first use and cached.
pub struct GenMetrics {
    test_structures: Vec<Structure>,
    gen_structures: Vec<Structure>,
    engine: MatchingEngine,
    matrix: OnceLock<MatchMatrix>,
}

impl GenMetrics {
    /// Create a metrics computation with the built-in reference services.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid configuration, before any featurization.
    pub fn new(
        test_structures: Vec<Structure>,
        gen_structures: Vec<Structure>,
        config: MatchingConfig,
    ) -> Result<Self, MatchError> {
        Ok(Self {
            test_structures,
            gen_structures,
            engine: MatchingEngine::new(config)?,
            matrix: OnceLock::new(),
        })
    }

    /// Create a metrics computation with a caller-built engine (custom
    /// featurizers or comparator).
    #[must_use]
    pub fn with_engine(
        test_structures: Vec<Structure>,
        gen_structures: Vec<Structure>,
        engine: MatchingEngine,
    ) -> Self {
        Self {
            test_structures,
            gen_structures,
            engine,
            matrix: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn num_test(&self) -> usize {
        self.test_structures.len()
    }

    #[must_use]
    pub fn num_gen(&self) -> usize {
        self.gen_structures.len()
    }

    /// The cached match matrix, built on first call.
    ///
    /// An empty collection on either side short-circuits to an all-false
    /// matrix of the right shape, so the derived metrics stay well-defined
    /// (zero, not NaN) without invoking any featurizer.
    ///
    /// # Errors
    ///
    /// Propagates engine errors from the first build.
    pub fn match_matrix(&self) -> Result<&MatchMatrix, MatchError> {
        if let Some(matrix) = self.matrix.get() {
            return Ok(matrix);
        }

        let matrix = if self.test_structures.is_empty() || self.gen_structures.is_empty() {
            MatchMatrix::from_element(
                self.test_structures.len(),
                self.gen_structures.len(),
                false,
            )
        } else {
            self.engine
                .match_matrix(&self.test_structures, &self.gen_structures)?
        };
        Ok(self.matrix.get_or_init(|| matrix))
    }

    /// # Errors
    ///
    /// Propagates engine errors from the first matrix build.
    pub fn match_counts(&self) -> Result<Vec<usize>, MatchError> {
        Ok(match_counts(self.match_matrix()?))
    }

    /// # Errors
    ///
    /// Propagates engine errors from the first matrix build.
    pub fn match_count(&self) -> Result<usize, MatchError> {
        Ok(match_count(self.match_matrix()?))
    }

    /// # Errors
    ///
    /// Propagates engine errors from the first matrix build.
    pub fn match_rate(&self) -> Result<f64, MatchError> {
        Ok(match_rate(self.match_matrix()?))
    }

    /// # Errors
    ///
    /// Propagates engine errors from the first matrix build.
    pub fn duplicity_counts(&self) -> Result<Vec<usize>, MatchError> {
        Ok(duplicity_counts(self.match_matrix()?))
    }

    /// # Errors
    ///
    /// Propagates engine errors from the first matrix build.
    pub fn duplicity_count(&self) -> Result<usize, MatchError> {
        Ok(duplicity_count(self.match_matrix()?))
    }

    /// # Errors
    ///
    /// Propagates engine errors from the first matrix build.
    pub fn duplicity_rate(&self) -> Result<f64, MatchError> {
        Ok(duplicity_rate(self.match_matrix()?))
    }

    /// # Errors
    ///
    /// Propagates engine errors from the first matrix build.
    pub fn report(&self) -> Result<MetricsReport, MatchError> {
        Ok(MetricsReport::from_matrix(self.match_matrix()?))
    }
}
