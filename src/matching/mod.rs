//! Pairwise structure matching: distance matrices, match matrices, and the
//! strategy dispatch that ties them together.
//!
//! Two interchangeable strategies decide whether a (test, gen) pair matches:
//!
//! 1. **Coverage** (default): composition and structure fingerprint
//!    distances are thresholded independently and combined with a logical
//!    AND. Chemistry or geometry alone produces false positives; requiring
//!    both is what makes the criterion meaningful.
//! 2. **Exact**: every pair goes through a structural-equivalence predicate
//!    directly. O(|test| x |gen|) predicate calls, no fingerprints.
//!
//! Self-comparisons (`symmetric`) compute only the upper triangle and
//! mirror it; for fingerprint distances the two paths agree to floating
//! point tolerance with a full cross computation.

pub mod comparator;
pub mod distance;
pub mod engine;
pub mod matrix;

pub use comparator::{StructureComparator, ToleranceComparator};
pub use distance::FingerprintKind;
pub use engine::{
    MatchError, MatchServices, MatchStrategy, MatchingConfig, MatchingEngine,
    DEFAULT_COMP_CUTOFF, DEFAULT_STRUCT_CUTOFF,
};
pub use matrix::MatchMatrix;
