//! # genmetrics
//!
//! Benchmark metrics for generative crystal structure models.
//!
//! Generative materials models are evaluated by how well their output
//! covers a held-out reference set: a generated structure "matches" a
//! reference structure when both its chemistry and its geometry are close.
//! `genmetrics` builds the all-pairs match matrix between a reference
//! ("test") collection and a generated collection and derives coverage,
//! match-rate, and duplicity statistics from it.
//!
//! ## Features
//!
//! - **Coverage matching**: composition and structure fingerprint distances,
//!   independently thresholded and combined with a logical AND
//! - **Exact matching**: a tolerance-based structural-equivalence predicate
//!   applied to every pair, for a stricter (and far costlier) criterion
//! - **Symmetric self-comparison**: condensed upper-triangle computation
//!   when a collection is compared against itself
//! - **Pluggable collaborators**: featurizers and the equivalence predicate
//!   are trait seams; the built-in implementations can be swapped out
//!
//! ## Example
//!
//! ```rust,no_run
//! use genmetrics::{GenMetrics, MatchingConfig};
//! use genmetrics::parsing::parse_structures;
//!
//! let test = parse_structures(r#"[]"#).unwrap();
//! let gen = parse_structures(r#"[]"#).unwrap();
//!
//! let metrics = GenMetrics::new(test, gen, MatchingConfig::default()).unwrap();
//! println!("match rate: {:.2}", metrics.match_rate().unwrap());
//! println!("duplicity rate: {:.2}", metrics.duplicity_rate().unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Structures, lattices, compositions, element data
//! - [`fingerprint`]: Featurizer seams and reference featurizers
//! - [`matching`]: Distance/match matrices and strategy dispatch
//! - [`metrics`]: Aggregate statistics over a match matrix
//! - [`parsing`]: JSON structure-set loading
//! - [`progress`]: Progress-reporting seam
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod fingerprint;
pub mod matching;
pub mod metrics;
pub mod parsing;
pub mod progress;

// Re-export commonly used types for convenience
pub use self::core::{Composition, Lattice, Structure};
pub use matching::{
    MatchError, MatchMatrix, MatchServices, MatchStrategy, MatchingConfig, MatchingEngine,
};
pub use metrics::{GenMetrics, MetricsReport};
