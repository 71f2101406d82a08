use crate::core::Structure;
use crate::fingerprint::{FeaturizeError, SiteFeaturizer};

/// Default neighbor search radius in angstroms.
pub const DEFAULT_RMAX: f64 = 6.0;

/// Fixed length of the per-site fingerprint.
pub const FINGERPRINT_LEN: usize = 8;

/// Geometry-only site fingerprint from periodic neighbor-shell statistics.
///
/// The descriptor captures the local coordination environment of a site
/// without reference to species: nearest-neighbor distance, normalized mean
/// distances of the 4/8/12 nearest neighbors, their spread, coordination
/// counts at 1.2x and 1.5x the nearest-neighbor distance, and the total
/// neighbor count within the search radius. The default structure cutoff of
/// 0.4 is calibrated against this descriptor.
#[derive(Debug, Clone, Copy)]
pub struct SiteStatsFeaturizer {
    rmax: f64,
}

impl Default for SiteStatsFeaturizer {
    fn default() -> Self {
        Self { rmax: DEFAULT_RMAX }
    }
}

impl SiteStatsFeaturizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the neighbor search radius.
    #[must_use]
    pub fn with_rmax(rmax: f64) -> Self {
        Self { rmax }
    }
}

/// Mean of the `k` nearest distances, padding with `rmax` when fewer exist.
fn shell_mean(distances: &[f64], k: usize, rmax: f64) -> f64 {
    let sum: f64 = (0..k)
        .map(|i| distances.get(i).copied().unwrap_or(rmax))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    {
        sum / k as f64
    }
}

impl SiteFeaturizer for SiteStatsFeaturizer {
    fn featurize(&self, structure: &Structure, site: usize) -> Result<Vec<f64>, FeaturizeError> {
        if structure.num_sites() == 0 {
            return Err(FeaturizeError::EmptyStructure);
        }

        let distances = structure.neighbor_distances(site, self.rmax);
        let Some(&d_min) = distances.first() else {
            return Err(FeaturizeError::IsolatedSite {
                site,
                rmax: self.rmax,
            });
        };

        let mean4 = shell_mean(&distances, 4, self.rmax);
        let mean8 = shell_mean(&distances, 8, self.rmax);
        let mean12 = shell_mean(&distances, 12, self.rmax);

        // Spread of the 12-neighbor shell, normalized by d_min
        let var12: f64 = (0..12)
            .map(|i| {
                let d = distances.get(i).copied().unwrap_or(self.rmax);
                (d - mean12).powi(2)
            })
            .sum::<f64>()
            / 12.0;

        #[allow(clippy::cast_precision_loss)]
        let cn_tight = distances.iter().filter(|d| **d <= 1.2 * d_min).count() as f64;
        #[allow(clippy::cast_precision_loss)]
        let cn_loose = distances.iter().filter(|d| **d <= 1.5 * d_min).count() as f64;
        #[allow(clippy::cast_precision_loss)]
        let total = distances.len() as f64;

        Ok(vec![
            d_min,
            mean4 / d_min,
            mean8 / d_min,
            mean12 / d_min,
            var12.sqrt() / d_min,
            cn_tight,
            cn_loose,
            total,
        ])
    }
}
