use std::str::FromStr;

use nalgebra::DMatrix;
use thiserror::Error;

use crate::core::Structure;
use crate::fingerprint::{
    CompositionFeaturizer, ElementPropertyFeaturizer, FeaturizeError, SiteFeaturizer,
    SiteStatsFeaturizer,
};
use crate::matching::comparator::{StructureComparator, ToleranceComparator};
use crate::matching::distance::{
    composition_fingerprints, cross_distance_matrix, self_distance_matrix, structure_fingerprints,
    FingerprintKind,
};
use crate::matching::matrix::{combine_and, pairwise_match_matrix, threshold, MatchMatrix};
use crate::progress::ProgressSink;

/// Default cutoff for composition fingerprint distance.
pub const DEFAULT_COMP_CUTOFF: f64 = 10.0;
/// Default cutoff for structure fingerprint distance.
pub const DEFAULT_STRUCT_CUTOFF: f64 = 0.4;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("unknown match type '{value}' (allowed: coverage, exact)")]
    UnknownStrategy { value: String },

    #[error("{name} structure collection is empty")]
    EmptyCollection { name: &'static str },

    #[error("invalid {name} cutoff {value}: must be finite and non-negative")]
    InvalidCutoff { name: &'static str, value: f64 },

    #[error(transparent)]
    Featurize(#[from] FeaturizeError),
}

/// How pairs of structures are declared matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Composite fingerprint criterion: composition distance AND structure
    /// distance, each under its own cutoff. The cheap default.
    #[default]
    Coverage,
    /// Direct pairwise structural-equivalence predicate. Far more expensive,
    /// far more literal.
    Exact,
}

impl FromStr for MatchStrategy {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coverage" => Ok(Self::Coverage),
            "exact" => Ok(Self::Exact),
            other => Err(MatchError::UnknownStrategy {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coverage => write!(f, "coverage"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Configuration for a match matrix build.
#[derive(Debug, Clone, Copy)]
pub struct MatchingConfig {
    pub strategy: MatchStrategy,
    /// Self-comparison of one collection against itself; enables the
    /// condensed/mirrored computation paths.
    pub symmetric: bool,
    pub comp_cutoff: f64,
    pub struct_cutoff: f64,
    pub verbose: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::default(),
            symmetric: false,
            comp_cutoff: DEFAULT_COMP_CUTOFF,
            struct_cutoff: DEFAULT_STRUCT_CUTOFF,
            verbose: false,
        }
    }
}

impl MatchingConfig {
    /// Fail-fast validation, run before any computation.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidCutoff` for non-finite or negative
    /// cutoffs.
    pub fn validate(&self) -> Result<(), MatchError> {
        for (name, value) in [
            ("composition", self.comp_cutoff),
            ("structure", self.struct_cutoff),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchError::InvalidCutoff { name, value });
            }
        }
        Ok(())
    }
}

/// Injected collaborator services: the two featurizers and the equivalence
/// predicate. Construct once, reuse across all builds; setup is the
/// expensive part and every service is read-only afterwards.
pub struct MatchServices {
    pub composition: Box<dyn CompositionFeaturizer>,
    pub site: Box<dyn SiteFeaturizer>,
    pub comparator: Box<dyn StructureComparator>,
}

impl Default for MatchServices {
    fn default() -> Self {
        Self {
            composition: Box::new(ElementPropertyFeaturizer::new()),
            site: Box::new(SiteStatsFeaturizer::new()),
            comparator: Box::new(ToleranceComparator::new()),
        }
    }
}

/// The matching engine: builds distance and match matrices between two
/// structure collections under an injected service set.
pub struct MatchingEngine {
    services: MatchServices,
    config: MatchingConfig,
    progress: Box<dyn ProgressSink>,
}

impl MatchingEngine {
    /// Engine with the built-in reference services.
    ///
    /// # Errors
    ///
    /// Fails fast on an invalid configuration.
    pub fn new(config: MatchingConfig) -> Result<Self, MatchError> {
        Self::with_services(MatchServices::default(), config)
    }

    /// Engine with caller-supplied services.
    ///
    /// # Errors
    ///
    /// Fails fast on an invalid configuration.
    pub fn with_services(services: MatchServices, config: MatchingConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let progress = crate::progress::sink_for_verbosity(config.verbose);
        Ok(Self {
            services,
            config,
            progress,
        })
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    fn check_collections(test: &[Structure], gen: &[Structure]) -> Result<(), MatchError> {
        if test.is_empty() {
            return Err(MatchError::EmptyCollection { name: "test" });
        }
        if gen.is_empty() {
            return Err(MatchError::EmptyCollection { name: "gen" });
        }
        Ok(())
    }

    fn fingerprints(
        &self,
        structures: &[Structure],
        kind: FingerprintKind,
    ) -> Result<Vec<Vec<f64>>, FeaturizeError> {
        match kind {
            FingerprintKind::Composition => composition_fingerprints(
                structures,
                self.services.composition.as_ref(),
                self.progress.as_ref(),
            ),
            FingerprintKind::Structure => structure_fingerprints(
                structures,
                self.services.site.as_ref(),
                self.progress.as_ref(),
            ),
        }
    }

    /// Pairwise fingerprint distance matrix, shape (|test|, |gen|).
    ///
    /// With `symmetric` in the config, `gen` is assumed identical to `test`
    /// and only the condensed upper triangle is computed, then mirrored.
    ///
    /// # Errors
    ///
    /// Empty collections fail fast; featurizer failures propagate.
    pub fn distance_matrix(
        &self,
        test: &[Structure],
        gen: &[Structure],
        kind: FingerprintKind,
    ) -> Result<DMatrix<f64>, MatchError> {
        Self::check_collections(test, gen)?;
        let test_fps = self.fingerprints(test, kind)?;
        if self.config.symmetric {
            Ok(self_distance_matrix(&test_fps))
        } else {
            let gen_fps = self.fingerprints(gen, kind)?;
            Ok(cross_distance_matrix(&test_fps, &gen_fps))
        }
    }

    /// Single-criterion match matrix: distance under `kind`, thresholded at
    /// `cutoff`.
    ///
    /// # Errors
    ///
    /// See [`Self::distance_matrix`].
    pub fn match_matrix_with_cutoff(
        &self,
        test: &[Structure],
        gen: &[Structure],
        kind: FingerprintKind,
        cutoff: f64,
    ) -> Result<MatchMatrix, MatchError> {
        let distances = self.distance_matrix(test, gen, kind)?;
        Ok(threshold(&distances, cutoff))
    }

    /// Composite coverage criterion: composition match AND structure match.
    ///
    /// Either signal alone produces false positives; a genuine match needs
    /// both chemistry and geometry to be close.
    ///
    /// # Errors
    ///
    /// See [`Self::distance_matrix`].
    pub fn composite_match_matrix(
        &self,
        test: &[Structure],
        gen: &[Structure],
    ) -> Result<MatchMatrix, MatchError> {
        let comp = self.match_matrix_with_cutoff(
            test,
            gen,
            FingerprintKind::Composition,
            self.config.comp_cutoff,
        )?;
        let stru = self.match_matrix_with_cutoff(
            test,
            gen,
            FingerprintKind::Structure,
            self.config.struct_cutoff,
        )?;
        Ok(combine_and(&comp, &stru))
    }

    /// Direct predicate-based match matrix (the "exact" strategy).
    ///
    /// # Errors
    ///
    /// Empty collections fail fast.
    pub fn exact_match_matrix(
        &self,
        test: &[Structure],
        gen: &[Structure],
    ) -> Result<MatchMatrix, MatchError> {
        Self::check_collections(test, gen)?;
        Ok(pairwise_match_matrix(
            test,
            gen,
            self.services.comparator.as_ref(),
            self.config.symmetric,
            self.progress.as_ref(),
        ))
    }

    /// Build the match matrix under the configured strategy.
    ///
    /// # Errors
    ///
    /// Configuration problems fail before any computation; featurizer
    /// failures propagate unmasked.
    pub fn match_matrix(
        &self,
        test: &[Structure],
        gen: &[Structure],
    ) -> Result<MatchMatrix, MatchError> {
        match self.config.strategy {
            MatchStrategy::Coverage => self.composite_match_matrix(test, gen),
            MatchStrategy::Exact => self.exact_match_matrix(test, gen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    use crate::core::Lattice;

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

    fn symmetric_engine(strategy: MatchStrategy) -> MatchingEngine {
        MatchingEngine::new(MatchingConfig {
            strategy,
            symmetric: true,
            ..MatchingConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "coverage".parse::<MatchStrategy>().unwrap(),
            MatchStrategy::Coverage
        );
        assert_eq!(
            "exact".parse::<MatchStrategy>().unwrap(),
            MatchStrategy::Exact
        );

        let err = "StructureMatcher".parse::<MatchStrategy>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("StructureMatcher"));
        assert!(msg.contains("coverage"));
        assert!(msg.contains("exact"));
    }

    #[test]
    fn test_invalid_cutoff_fails_fast() {
        let config = MatchingConfig {
            comp_cutoff: -1.0,
            ..MatchingConfig::default()
        };
        assert!(matches!(
            MatchingEngine::new(config),
            Err(MatchError::InvalidCutoff { .. })
        ));

        let config = MatchingConfig {
            struct_cutoff: f64::NAN,
            ..MatchingConfig::default()
        };
        assert!(MatchingEngine::new(config).is_err());
    }

    #[test]
    fn test_empty_collection_fails_fast() {
        let engine = MatchingEngine::new(MatchingConfig::default()).unwrap();
        let structures = dummy_structures();
        let err = engine.match_matrix(&[], &structures).unwrap_err();
        assert!(matches!(err, MatchError::EmptyCollection { name: "test" }));
        let err = engine.match_matrix(&structures, &[]).unwrap_err();
        assert!(matches!(err, MatchError::EmptyCollection { name: "gen" }));
    }

    #[test]
    fn test_coverage_identity_on_dummy_structures() {
        let engine = symmetric_engine(MatchStrategy::Coverage);
        let structures = dummy_structures();
        let mm = engine.match_matrix(&structures, &structures).unwrap();
        assert!(mm[(0, 0)]);
        assert!(mm[(1, 1)]);
        assert!(!mm[(0, 1)]);
        assert!(!mm[(1, 0)]);
    }

    #[test]
    fn test_exact_identity_on_dummy_structures() {
        let engine = symmetric_engine(MatchStrategy::Exact);
        let structures = dummy_structures();
        let mm = engine.match_matrix(&structures, &structures).unwrap();
        assert!(mm[(0, 0)], "diagonal must be evaluated, not assumed false");
        assert!(mm[(1, 1)]);
        assert!(!mm[(0, 1)]);
    }

    #[test]
    fn test_composite_is_and_of_criteria() {
        let engine = symmetric_engine(MatchStrategy::Coverage);
        let structures = dummy_structures();

        let comp = engine
            .match_matrix_with_cutoff(
                &structures,
                &structures,
                FingerprintKind::Composition,
                DEFAULT_COMP_CUTOFF,
            )
            .unwrap();
        let stru = engine
            .match_matrix_with_cutoff(
                &structures,
                &structures,
                FingerprintKind::Structure,
                DEFAULT_STRUCT_CUTOFF,
            )
            .unwrap();
        let composite = engine.composite_match_matrix(&structures, &structures).unwrap();

        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(composite[(i, j)], comp[(i, j)] && stru[(i, j)]);
            }
        }
    }

    #[test]
    fn test_symmetric_distance_equals_cross() {
        let structures = dummy_structures();
        let symmetric = symmetric_engine(MatchStrategy::Coverage);
        let cross = MatchingEngine::new(MatchingConfig::default()).unwrap();

        let dm_sym = symmetric
            .distance_matrix(&structures, &structures, FingerprintKind::Composition)
            .unwrap();
        let dm_full = cross
            .distance_matrix(&structures, &structures, FingerprintKind::Composition)
            .unwrap();

        for i in 0..2 {
            for j in 0..2 {
                assert!((dm_sym[(i, j)] - dm_full[(i, j)]).abs() < 1e-9);
            }
        }
    }
}
