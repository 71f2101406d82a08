use crate::core::elements::{self, NUM_PROPERTIES};
use crate::core::Composition;
use crate::fingerprint::{CompositionFeaturizer, FeaturizeError};

/// Number of statistics computed per element property.
const NUM_STATS: usize = 5;

/// Fixed length of the composition fingerprint.
pub const FINGERPRINT_LEN: usize = NUM_PROPERTIES * NUM_STATS;

/// Composition fingerprint from element-property statistics.
///
/// For each tabulated element property, five statistics are taken over the
/// composition: fraction-weighted mean, minimum, maximum, range, and
/// fraction-weighted mean absolute deviation. This is the classic
/// magpie-style descriptor layout, which the default composition cutoff of
/// 10.0 is calibrated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementPropertyFeaturizer;

impl ElementPropertyFeaturizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CompositionFeaturizer for ElementPropertyFeaturizer {
    fn featurize(&self, composition: &Composition) -> Result<Vec<f64>, FeaturizeError> {
        if composition.num_atoms() == 0 {
            return Err(FeaturizeError::EmptyStructure);
        }

        // (property values per element, atomic fraction)
        let mut rows: Vec<([f64; NUM_PROPERTIES], f64)> = Vec::new();
        for (symbol, fraction) in composition.fractions() {
            let props = elements::properties(symbol).ok_or_else(|| {
                FeaturizeError::UnknownElement {
                    symbol: symbol.to_string(),
                }
            })?;
            rows.push((props.as_array(), fraction));
        }

        let mut fingerprint = Vec::with_capacity(FINGERPRINT_LEN);
        for p in 0..NUM_PROPERTIES {
            let mean: f64 = rows.iter().map(|(vals, frac)| vals[p] * frac).sum();
            let min = rows
                .iter()
                .map(|(vals, _)| vals[p])
                .fold(f64::INFINITY, f64::min);
            let max = rows
                .iter()
                .map(|(vals, _)| vals[p])
                .fold(f64::NEG_INFINITY, f64::max);
            let avg_dev: f64 = rows
                .iter()
                .map(|(vals, frac)| (vals[p] - mean).abs() * frac)
                .sum();

            fingerprint.push(mean);
            fingerprint.push(min);
            fingerprint.push(max);
            fingerprint.push(max - min);
            fingerprint.push(avg_dev);
        }
        Ok(fingerprint)
    }
}
