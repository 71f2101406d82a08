//! End-to-end metrics pipeline tests over the canonical dummy structures.

use nalgebra::Vector3;

use genmetrics::matching::{
    FingerprintKind, MatchStrategy, MatchingConfig, MatchingEngine, DEFAULT_COMP_CUTOFF,
    DEFAULT_STRUCT_CUTOFF,
};
use genmetrics::{GenMetrics, Lattice, Structure};

/// Two single-element dummy structures sharing one lattice and coordinate
/// set, differing only in species (Si2 and Ni2).
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

fn symmetric_config(strategy: MatchStrategy) -> MatchingConfig {
    MatchingConfig {
        strategy,
        symmetric: true,
        ..MatchingConfig::default()
    }
}

#[test]
fn identity_match_with_coverage_strategy() {
    let structures = dummy_structures();
    let metrics = GenMetrics::new(
        structures.clone(),
        structures,
        symmetric_config(MatchStrategy::Coverage),
    )
    .unwrap();

    let matrix = metrics.match_matrix().unwrap();
    assert!(matrix[(0, 0)]);
    assert!(matrix[(1, 1)]);
    assert!(!matrix[(0, 1)]);
    assert!(!matrix[(1, 0)]);

    assert_eq!(metrics.match_counts().unwrap(), vec![1, 1]);
    assert_eq!(metrics.match_count().unwrap(), 2);
    assert!((metrics.match_rate().unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(metrics.duplicity_counts().unwrap(), vec![0, 0]);
    assert_eq!(metrics.duplicity_count().unwrap(), 0);
    assert_eq!(metrics.duplicity_rate().unwrap(), 0.0);
}

#[test]
fn identity_match_with_exact_strategy() {
    let structures = dummy_structures();
    let metrics = GenMetrics::new(
        structures.clone(),
        structures,
        symmetric_config(MatchStrategy::Exact),
    )
    .unwrap();

    let matrix = metrics.match_matrix().unwrap();
    assert!(matrix[(0, 0)]);
    assert!(matrix[(1, 1)]);
    assert!(!matrix[(0, 1)]);
    assert!((metrics.match_rate().unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn symmetric_path_equals_cross_path() {
    let structures = dummy_structures();
    let symmetric = MatchingEngine::new(symmetric_config(MatchStrategy::Coverage)).unwrap();
    let cross = MatchingEngine::new(MatchingConfig::default()).unwrap();

    for kind in [FingerprintKind::Composition, FingerprintKind::Structure] {
        let dm_sym = symmetric
            .distance_matrix(&structures, &structures, kind)
            .unwrap();
        let dm_full = cross
            .distance_matrix(&structures, &structures, kind)
            .unwrap();
        assert_eq!(dm_sym.shape(), dm_full.shape());
        for i in 0..dm_sym.nrows() {
            for j in 0..dm_sym.ncols() {
                assert!(
                    (dm_sym[(i, j)] - dm_full[(i, j)]).abs() < 1e-9,
                    "paths disagree at ({i}, {j})"
                );
            }
        }
    }
}

#[test]
fn composite_never_true_where_a_criterion_is_false() {
    let structures = dummy_structures();
    let engine = MatchingEngine::new(symmetric_config(MatchStrategy::Coverage)).unwrap();

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
    let composite = engine
        .composite_match_matrix(&structures, &structures)
        .unwrap();

    for i in 0..composite.nrows() {
        for j in 0..composite.ncols() {
            assert_eq!(composite[(i, j)], comp[(i, j)] && stru[(i, j)]);
        }
    }
}

#[test]
fn raising_cutoffs_never_removes_matches() {
    let structures = dummy_structures();
    let engine = MatchingEngine::new(MatchingConfig::default()).unwrap();

    let true_count = |cutoff: f64| -> usize {
        engine
            .match_matrix_with_cutoff(
                &structures,
                &structures,
                FingerprintKind::Composition,
                cutoff,
            )
            .unwrap()
            .iter()
            .filter(|m| **m)
            .count()
    };

    let mut previous = 0;
    for cutoff in [0.0, 1.0, 10.0, 100.0, 1000.0] {
        let count = true_count(cutoff);
        assert!(count >= previous, "match count dropped at cutoff {cutoff}");
        previous = count;
    }
}

#[test]
fn duplicity_counts_with_redundant_generation() {
    let structures = dummy_structures();
    // Generated set contains the Si structure three times: reference Si is
    // covered once and duplicated twice, reference Ni is never covered.
    let gen = vec![
        structures[0].clone(),
        structures[0].clone(),
        structures[0].clone(),
    ];
    let metrics = GenMetrics::new(structures, gen, MatchingConfig::default()).unwrap();

    assert_eq!(metrics.match_counts().unwrap(), vec![3, 0]);
    assert_eq!(metrics.match_count().unwrap(), 1);
    assert!((metrics.match_rate().unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(metrics.duplicity_counts().unwrap(), vec![2, 0]);
    assert_eq!(metrics.duplicity_count().unwrap(), 2);
    assert!((metrics.duplicity_rate().unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn empty_collections_give_zero_rates() {
    let metrics = GenMetrics::new(vec![], vec![], MatchingConfig::default()).unwrap();
    assert_eq!(metrics.match_count().unwrap(), 0);
    assert_eq!(metrics.match_rate().unwrap(), 0.0);
    assert_eq!(metrics.duplicity_rate().unwrap(), 0.0);

    let metrics = GenMetrics::new(dummy_structures(), vec![], MatchingConfig::default()).unwrap();
    assert_eq!(metrics.match_rate().unwrap(), 0.0);
}
