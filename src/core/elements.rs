//! Static element property data used by the composition fingerprinter.
//!
//! Values are standard tabulated data: atomic number, atomic mass (u),
//! covalent radius (Å), Pauling electronegativity, period, and group.
//! Noble gases without a Pauling value carry 0.0.

/// Properties of a single element relevant to composition fingerprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementProperties {
    pub atomic_number: f64,
    pub atomic_mass: f64,
    pub covalent_radius: f64,
    pub electronegativity: f64,
    pub period: f64,
    pub group: f64,
}

/// Number of scalar properties carried per element.
pub const NUM_PROPERTIES: usize = 6;

impl ElementProperties {
    /// Properties as a fixed array, in a stable order.
    #[must_use]
    pub fn as_array(&self) -> [f64; NUM_PROPERTIES] {
        [
            self.atomic_number,
            self.atomic_mass,
            self.covalent_radius,
            self.electronegativity,
            self.period,
            self.group,
        ]
    }
}

/// Look up the property record for an element symbol.
///
/// Returns `None` for symbols outside the supported table; callers treat
/// that as a featurization error rather than substituting defaults.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn properties(symbol: &str) -> Option<ElementProperties> {
    // (Z, mass, covalent radius, Pauling EN, period, group)
    let raw: (f64, f64, f64, f64, f64, f64) = match symbol {
        // --- Period 1 ---
        "H" => (1.0, 1.008, 0.37, 2.20, 1.0, 1.0),
        "He" => (2.0, 4.003, 0.32, 0.0, 1.0, 18.0),
        // --- Period 2 ---
        "Li" => (3.0, 6.94, 1.34, 0.98, 2.0, 1.0),
        "Be" => (4.0, 9.012, 0.90, 1.57, 2.0, 2.0),
        "B" => (5.0, 10.81, 0.82, 2.04, 2.0, 13.0),
        "C" => (6.0, 12.011, 0.77, 2.55, 2.0, 14.0),
        "N" => (7.0, 14.007, 0.75, 3.04, 2.0, 15.0),
        "O" => (8.0, 15.999, 0.73, 3.44, 2.0, 16.0),
        "F" => (9.0, 18.998, 0.71, 3.98, 2.0, 17.0),
        "Ne" => (10.0, 20.180, 0.69, 0.0, 2.0, 18.0),
        // --- Period 3 ---
        "Na" => (11.0, 22.990, 1.54, 0.93, 3.0, 1.0),
        "Mg" => (12.0, 24.305, 1.30, 1.31, 3.0, 2.0),
        "Al" => (13.0, 26.982, 1.18, 1.61, 3.0, 13.0),
        "Si" => (14.0, 28.086, 1.11, 1.90, 3.0, 14.0),
        "P" => (15.0, 30.974, 1.06, 2.19, 3.0, 15.0),
        "S" => (16.0, 32.06, 1.02, 2.58, 3.0, 16.0),
        "Cl" => (17.0, 35.45, 0.99, 3.16, 3.0, 17.0),
        "Ar" => (18.0, 39.948, 0.97, 0.0, 3.0, 18.0),
        // --- Period 4 ---
        "K" => (19.0, 39.098, 1.96, 0.82, 4.0, 1.0),
        "Ca" => (20.0, 40.078, 1.74, 1.00, 4.0, 2.0),
        "Sc" => (21.0, 44.956, 1.44, 1.36, 4.0, 3.0),
        "Ti" => (22.0, 47.867, 1.36, 1.54, 4.0, 4.0),
        "V" => (23.0, 50.942, 1.25, 1.63, 4.0, 5.0),
        "Cr" => (24.0, 51.996, 1.27, 1.66, 4.0, 6.0),
        "Mn" => (25.0, 54.938, 1.39, 1.55, 4.0, 7.0),
        "Fe" => (26.0, 55.845, 1.25, 1.83, 4.0, 8.0),
        "Co" => (27.0, 58.933, 1.26, 1.88, 4.0, 9.0),
        "Ni" => (28.0, 58.693, 1.21, 1.91, 4.0, 10.0),
        "Cu" => (29.0, 63.546, 1.38, 1.90, 4.0, 11.0),
        "Zn" => (30.0, 65.38, 1.31, 1.65, 4.0, 12.0),
        "Ga" => (31.0, 69.723, 1.26, 1.81, 4.0, 13.0),
        "Ge" => (32.0, 72.630, 1.22, 2.01, 4.0, 14.0),
        "As" => (33.0, 74.922, 1.19, 2.18, 4.0, 15.0),
        "Se" => (34.0, 78.971, 1.16, 2.55, 4.0, 16.0),
        "Br" => (35.0, 79.904, 1.14, 2.96, 4.0, 17.0),
        "Kr" => (36.0, 83.798, 1.10, 3.00, 4.0, 18.0),
        // --- Period 5 ---
        "Rb" => (37.0, 85.468, 2.11, 0.82, 5.0, 1.0),
        "Sr" => (38.0, 87.62, 1.92, 0.95, 5.0, 2.0),
        "Y" => (39.0, 88.906, 1.62, 1.22, 5.0, 3.0),
        "Zr" => (40.0, 91.224, 1.48, 1.33, 5.0, 4.0),
        "Nb" => (41.0, 92.906, 1.37, 1.60, 5.0, 5.0),
        "Mo" => (42.0, 95.95, 1.45, 2.16, 5.0, 6.0),
        "Tc" => (43.0, 98.0, 1.56, 1.90, 5.0, 7.0),
        "Ru" => (44.0, 101.07, 1.26, 2.20, 5.0, 8.0),
        "Rh" => (45.0, 102.906, 1.35, 2.28, 5.0, 9.0),
        "Pd" => (46.0, 106.42, 1.31, 2.20, 5.0, 10.0),
        "Ag" => (47.0, 107.868, 1.53, 1.93, 5.0, 11.0),
        "Cd" => (48.0, 112.414, 1.48, 1.69, 5.0, 12.0),
        "In" => (49.0, 114.818, 1.44, 1.78, 5.0, 13.0),
        "Sn" => (50.0, 118.710, 1.41, 1.96, 5.0, 14.0),
        "Sb" => (51.0, 121.760, 1.38, 2.05, 5.0, 15.0),
        "Te" => (52.0, 127.60, 1.35, 2.10, 5.0, 16.0),
        "I" => (53.0, 126.904, 1.33, 2.66, 5.0, 17.0),
        "Xe" => (54.0, 131.293, 1.30, 2.60, 5.0, 18.0),
        // --- Period 6 (common elements) ---
        "Cs" => (55.0, 132.905, 2.25, 0.79, 6.0, 1.0),
        "Ba" => (56.0, 137.327, 1.98, 0.89, 6.0, 2.0),
        "La" => (57.0, 138.905, 1.69, 1.10, 6.0, 3.0),
        "Ce" => (58.0, 140.116, 1.65, 1.12, 6.0, 3.0),
        "Nd" => (60.0, 144.242, 1.64, 1.14, 6.0, 3.0),
        "Sm" => (62.0, 150.36, 1.62, 1.17, 6.0, 3.0),
        "Gd" => (64.0, 157.25, 1.61, 1.20, 6.0, 3.0),
        "Dy" => (66.0, 162.500, 1.59, 1.22, 6.0, 3.0),
        "Er" => (68.0, 167.259, 1.57, 1.24, 6.0, 3.0),
        "Yb" => (70.0, 173.045, 1.56, 1.10, 6.0, 3.0),
        "Hf" => (72.0, 178.49, 1.50, 1.30, 6.0, 4.0),
        "Ta" => (73.0, 180.948, 1.38, 1.50, 6.0, 5.0),
        "W" => (74.0, 183.84, 1.46, 2.36, 6.0, 6.0),
        "Re" => (75.0, 186.207, 1.59, 1.90, 6.0, 7.0),
        "Os" => (76.0, 190.23, 1.28, 2.20, 6.0, 8.0),
        "Ir" => (77.0, 192.217, 1.37, 2.20, 6.0, 9.0),
        "Pt" => (78.0, 195.084, 1.28, 2.28, 6.0, 10.0),
        "Au" => (79.0, 196.967, 1.44, 2.54, 6.0, 11.0),
        "Hg" => (80.0, 200.592, 1.49, 2.00, 6.0, 12.0),
        "Tl" => (81.0, 204.38, 1.48, 1.62, 6.0, 13.0),
        "Pb" => (82.0, 207.2, 1.47, 2.33, 6.0, 14.0),
        "Bi" => (83.0, 208.980, 1.46, 2.02, 6.0, 15.0),
        // --- Period 7 ---
        "Th" => (90.0, 232.038, 1.79, 1.30, 7.0, 3.0),
        "U" => (92.0, 238.029, 1.96, 1.38, 7.0, 3.0),
        _ => return None,
    };

    Some(ElementProperties {
        atomic_number: raw.0,
        atomic_mass: raw.1,
        covalent_radius: raw.2,
        electronegativity: raw.3,
        period: raw.4,
        group: raw.5,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_elements() {
        let si = properties("Si").unwrap();
        assert_eq!(si.atomic_number, 14.0);
        assert_eq!(si.period, 3.0);
        assert_eq!(si.group, 14.0);

        let ni = properties("Ni").unwrap();
        assert_eq!(ni.atomic_number, 28.0);
        assert_eq!(ni.group, 10.0);
    }

    #[test]
    fn test_unknown_symbol() {
        assert!(properties("Xx").is_none());
        assert!(properties("").is_none());
        // Case matters: symbols are canonical
        assert!(properties("si").is_none());
    }

    #[test]
    fn test_property_array_order() {
        let fe = properties("Fe").unwrap();
        let arr = fe.as_array();
        assert_eq!(arr.len(), NUM_PROPERTIES);
        assert_eq!(arr[0], 26.0);
        assert_eq!(arr[1], 55.845);
    }
}
