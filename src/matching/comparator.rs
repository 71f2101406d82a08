use nalgebra::Vector3;

use crate::core::Structure;

/// Exact/tolerant structural-equivalence predicate.
///
/// Implementations are stateless with respect to their inputs: tolerance
/// parameters are fixed at construction and read-only thereafter, so one
/// instance is safe to share across all pairwise calls.
pub trait StructureComparator: Send + Sync {
    /// True when the two structures are equivalent up to tolerance,
    /// isotropic scaling, and site ordering.
    fn equivalent(&self, a: &Structure, b: &Structure) -> bool;
}

/// Default site tolerance, as a fraction of the average site spacing.
pub const DEFAULT_SITE_TOL: f64 = 0.5;
/// Default fractional lattice-length tolerance.
pub const DEFAULT_LENGTH_TOL: f64 = 0.3;
/// Default lattice-angle tolerance in degrees.
pub const DEFAULT_ANGLE_TOL: f64 = 10.0;

/// Tolerance-based structural equivalence.
///
/// The check proceeds in stages, each cheap stage gating the next:
/// reduced-formula equality, volume-normalized lattice parameters within
/// tolerance, then a site correspondence search over candidate translations.
/// Supercell relationships are not resolved; structures with different site
/// counts compare as inequivalent.
#[derive(Debug, Clone, Copy)]
pub struct ToleranceComparator {
    site_tol: f64,
    length_tol: f64,
    angle_tol: f64,
}

impl Default for ToleranceComparator {
    fn default() -> Self {
        Self {
            site_tol: DEFAULT_SITE_TOL,
            length_tol: DEFAULT_LENGTH_TOL,
            angle_tol: DEFAULT_ANGLE_TOL,
        }
    }
}

impl ToleranceComparator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom tolerances: site (fractional), lattice length (fractional),
    /// angle (degrees).
    #[must_use]
    pub fn with_tolerances(site_tol: f64, length_tol: f64, angle_tol: f64) -> Self {
        Self {
            site_tol,
            length_tol,
            angle_tol,
        }
    }

    fn lattices_comparable(&self, a: &Structure, b: &Structure) -> bool {
        let mut la = a.lattice().lengths();
        let mut lb = b.lattice().lengths();
        la.sort_by(f64::total_cmp);
        lb.sort_by(f64::total_cmp);
        for (x, y) in la.iter().zip(lb.iter()) {
            if (x - y).abs() > self.length_tol * y {
                return false;
            }
        }

        let mut aa = a.lattice().angles();
        let mut ab = b.lattice().angles();
        aa.sort_by(f64::total_cmp);
        ab.sort_by(f64::total_cmp);
        aa.iter()
            .zip(ab.iter())
            .all(|(x, y)| (x - y).abs() <= self.angle_tol)
    }

    /// Try to map every site of `a` onto a distinct site of `b` with the
    /// same species, under the translation that sends `a` site 0 to `b`
    /// site `anchor`.
    fn sites_correspond(&self, a: &Structure, b: &Structure, anchor: usize, tol: f64) -> bool {
        let shift = b.frac_coords()[anchor] - a.frac_coords()[0];
        let mut used = vec![false; b.num_sites()];

        for (i, species) in a.species().iter().enumerate() {
            let target = a.frac_coords()[i] + shift;
            let found = (0..b.num_sites()).find(|&j| {
                !used[j]
                    && b.species()[j] == *species
                    && min_image_distance(b, &target, &b.frac_coords()[j]) <= tol
            });
            match found {
                Some(j) => used[j] = true,
                None => return false,
            }
        }
        true
    }
}

/// Cartesian distance between two fractional positions under the minimum
/// image convention (component-wise wrap).
fn min_image_distance(s: &Structure, a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let mut delta = a - b;
    for k in 0..3 {
        delta[k] -= delta[k].round();
    }
    s.lattice().cartesian(&delta).norm()
}

impl StructureComparator for ToleranceComparator {
    fn equivalent(&self, a: &Structure, b: &Structure) -> bool {
        if a.num_sites() == 0 || a.num_sites() != b.num_sites() {
            return false;
        }
        if a.composition().reduced_formula() != b.composition().reduced_formula() {
            return false;
        }

        // Normalize out isotropic scaling: compare b in a's volume
        let b = b.scaled_to_volume(a.lattice().volume());
        if !self.lattices_comparable(a, &b) {
            return false;
        }

        // Site tolerance scales with the average volume per site
        #[allow(clippy::cast_precision_loss)]
        let spacing = (a.lattice().volume() / a.num_sites() as f64).cbrt();
        let tol = self.site_tol * spacing;

        // The translation must send site 0 of `a` onto some same-species
        // site of `b`; try each candidate anchor.
        let first_species = &a.species()[0];
        (0..b.num_sites())
            .filter(|&j| b.species()[j] == *first_species)
            .any(|j| self.sites_correspond(a, &b, j, tol))
    }
}
