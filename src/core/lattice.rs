use nalgebra::{Matrix3, Vector3};

/// A crystal lattice stored as three row vectors (a, b, c).
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    matrix: Matrix3<f64>,
}

impl Lattice {
    /// Build a lattice from an explicit 3x3 matrix of row vectors.
    #[must_use]
    pub fn from_matrix(matrix: [[f64; 3]; 3]) -> Self {
        let [a, b, c] = matrix;
        Self {
            matrix: Matrix3::new(a[0], a[1], a[2], b[0], b[1], b[2], c[0], c[1], c[2]),
        }
    }

    /// Build a lattice from cell parameters; angles are in degrees.
    ///
    /// Uses the standard orientation: a along x, b in the xy plane.
    #[must_use]
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        let alpha_r = alpha.to_radians();
        let beta_r = beta.to_radians();
        let gamma_r = gamma.to_radians();

        let cos_alpha = alpha_r.cos();
        let cos_beta = beta_r.cos();
        let cos_gamma = gamma_r.cos();
        let sin_gamma = gamma_r.sin();

        let a_vec = [a, 0.0, 0.0];
        let b_vec = [b * cos_gamma, b * sin_gamma, 0.0];

        let c1 = c * cos_beta;
        let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c3 = (c * c - c1 * c1 - c2 * c2).max(0.0).sqrt();

        Self::from_matrix([a_vec, b_vec, [c1, c2, c3]])
    }

    /// Lattice vector i as a column vector.
    #[must_use]
    pub fn vector(&self, i: usize) -> Vector3<f64> {
        self.matrix.row(i).transpose()
    }

    /// The three cell edge lengths (|a|, |b|, |c|).
    #[must_use]
    pub fn lengths(&self) -> [f64; 3] {
        [
            self.vector(0).norm(),
            self.vector(1).norm(),
            self.vector(2).norm(),
        ]
    }

    /// The three cell angles (alpha, beta, gamma) in degrees.
    ///
    /// alpha is the angle between b and c, beta between a and c,
    /// gamma between a and b.
    #[must_use]
    pub fn angles(&self) -> [f64; 3] {
        let a = self.vector(0);
        let b = self.vector(1);
        let c = self.vector(2);
        let angle = |u: &Vector3<f64>, v: &Vector3<f64>| {
            (u.dot(v) / (u.norm() * v.norm())).clamp(-1.0, 1.0).acos().to_degrees()
        };
        [angle(&b, &c), angle(&a, &c), angle(&a, &b)]
    }

    /// Cell volume in cubic angstroms.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Convert fractional coordinates to cartesian.
    #[must_use]
    pub fn cartesian(&self, frac: &Vector3<f64>) -> Vector3<f64> {
        // Rows are the lattice vectors, so cart = M^T * frac
        self.matrix.transpose() * frac
    }

    /// Uniformly rescale the cell so its volume becomes `target`.
    ///
    /// Fractional coordinates are volume-invariant, so structures keep their
    /// geometry up to isotropic scaling.
    #[must_use]
    pub fn scaled_to_volume(&self, target: f64) -> Self {
        let factor = (target / self.volume()).cbrt();
        Self {
            matrix: self.matrix * factor,
        }
    }

    /// Raw matrix of row vectors.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}
