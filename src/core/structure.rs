use nalgebra::Vector3;
use thiserror::Error;

use crate::core::composition::Composition;
use crate::core::lattice::Lattice;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("species list has {species} entries but coordinate list has {coords}")]
    MismatchedSites { species: usize, coords: usize },
}

/// A periodic crystal structure: lattice plus sites.
///
/// Sites are parallel lists of species symbol and fractional coordinate;
/// site order is preserved and meaningful (it fixes matrix indices
/// downstream). Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    lattice: Lattice,
    species: Vec<String>,
    frac_coords: Vec<Vector3<f64>>,
}

impl Structure {
    /// Create a structure from a lattice and parallel site lists.
    ///
    /// # Errors
    ///
    /// Returns `StructureError::MismatchedSites` when the two lists differ
    /// in length.
    pub fn new(
        lattice: Lattice,
        species: Vec<String>,
        frac_coords: Vec<Vector3<f64>>,
    ) -> Result<Self, StructureError> {
        if species.len() != frac_coords.len() {
            return Err(StructureError::MismatchedSites {
                species: species.len(),
                coords: frac_coords.len(),
            });
        }
        Ok(Self {
            lattice,
            species,
            frac_coords,
        })
    }

    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[must_use]
    pub fn species(&self) -> &[String] {
        &self.species
    }

    #[must_use]
    pub fn frac_coords(&self) -> &[Vector3<f64>] {
        &self.frac_coords
    }

    #[must_use]
    pub fn num_sites(&self) -> usize {
        self.species.len()
    }

    #[must_use]
    pub fn composition(&self) -> Composition {
        Composition::from_species(&self.species)
    }

    /// Cartesian coordinate of site `i`.
    #[must_use]
    pub fn cartesian(&self, i: usize) -> Vector3<f64> {
        self.lattice.cartesian(&self.frac_coords[i])
    }

    /// Return a copy with the cell rescaled to the given volume.
    #[must_use]
    pub fn scaled_to_volume(&self, target: f64) -> Self {
        Self {
            lattice: self.lattice.scaled_to_volume(target),
            species: self.species.clone(),
            frac_coords: self.frac_coords.clone(),
        }
    }

    /// All periodic neighbor distances from site `site` within `rmax`,
    /// sorted ascending.
    ///
    /// Includes images of the site itself but never the zero self-distance.
    #[must_use]
    pub fn neighbor_distances(&self, site: usize, rmax: f64) -> Vec<f64> {
        let origin = self.cartesian(site);
        let images = image_ranges(&self.lattice, rmax);

        let mut distances = Vec::new();
        for j in 0..self.num_sites() {
            let base = self.cartesian(j);
            for na in -images[0]..=images[0] {
                for nb in -images[1]..=images[1] {
                    for nc in -images[2]..=images[2] {
                        #[allow(clippy::cast_precision_loss)]
                        let shift = self.lattice.vector(0) * na as f64
                            + self.lattice.vector(1) * nb as f64
                            + self.lattice.vector(2) * nc as f64;
                        let d = (base + shift - origin).norm();
                        if d > 1e-8 && d <= rmax {
                            distances.push(d);
                        }
                    }
                }
            }
        }
        distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        distances
    }
}

/// Number of lattice images needed per axis so that every point within
/// `rmax` of the home cell is covered.
fn image_ranges(lattice: &Lattice, rmax: f64) -> [i32; 3] {
    let volume = lattice.volume();
    let mut out = [1; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;
        let cross = lattice.vector(j).cross(&lattice.vector(k)).norm();
        // Perpendicular spacing between (i) lattice planes
        let spacing = if cross > 0.0 { volume / cross } else { 0.0 };
        if spacing > 0.0 {
            #[allow(clippy::cast_possible_truncation)]
            {
                *slot = (rmax / spacing).ceil() as i32 + 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simple_cubic(symbol: &str, a: f64) -> Structure {
        Structure::new(
            Lattice::from_parameters(a, a, a, 90.0, 90.0, 90.0),
            vec![symbol.to_string()],
            vec![Vector3::new(0.0, 0.0, 0.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_mismatched_sites_rejected() {
        let result = Structure::new(
            Lattice::from_parameters(3.0, 3.0, 3.0, 90.0, 90.0, 90.0),
            vec!["Si".to_string()],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_simple_cubic_neighbors() {
        let s = simple_cubic("Po", 3.0);
        let distances = s.neighbor_distances(0, 3.5);
        // Simple cubic: 6 first neighbors at a, 12 second at a*sqrt(2)=4.24 (cut off)
        assert_eq!(distances.len(), 6);
        for d in &distances {
            assert_relative_eq!(*d, 3.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_neighbors_exclude_self() {
        let s = simple_cubic("Fe", 2.87);
        let distances = s.neighbor_distances(0, 10.0);
        assert!(distances.iter().all(|d| *d > 1e-8));
        // Sorted ascending
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_composition() {
        let s = Structure::new(
            Lattice::from_parameters(3.84, 3.84, 3.84, 120.0, 90.0, 60.0),
            vec!["Si".to_string(), "Si".to_string()],
            vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.75, 0.5, 0.75)],
        )
        .unwrap();
        assert_eq!(s.composition().reduced_formula(), "Si1");
        assert_eq!(s.num_sites(), 2);
    }
}
