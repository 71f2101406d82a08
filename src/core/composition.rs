use std::collections::BTreeMap;
use std::fmt;

/// Element counts for one structure.
///
/// Counts are whole site counts; fractional occupancies are not modeled.
/// Iteration order is the sorted element symbol order, which keeps derived
/// fingerprints deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    counts: BTreeMap<String, usize>,
}

impl Composition {
    /// Build a composition by tallying a list of site species.
    #[must_use]
    pub fn from_species(species: &[String]) -> Self {
        let mut counts = BTreeMap::new();
        for sp in species {
            *counts.entry(sp.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Total number of atoms.
    #[must_use]
    pub fn num_atoms(&self) -> usize {
        self.counts.values().sum()
    }

    /// Distinct element symbols, sorted.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Iterate (symbol, atomic fraction) pairs in sorted symbol order.
    pub fn fractions(&self) -> impl Iterator<Item = (&str, f64)> {
        let total = self.num_atoms();
        self.counts.iter().map(move |(sym, count)| {
            let frac = if total == 0 {
                0.0
            } else {
                #[allow(clippy::cast_precision_loss)]
                {
                    *count as f64 / total as f64
                }
            };
            (sym.as_str(), frac)
        })
    }

    /// GCD-normalized element counts (e.g. Si4O8 reduces to Si1O2).
    #[must_use]
    pub fn reduced(&self) -> BTreeMap<String, usize> {
        let divisor = self.counts.values().copied().fold(0, gcd);
        if divisor <= 1 {
            return self.counts.clone();
        }
        self.counts
            .iter()
            .map(|(sym, count)| (sym.clone(), count / divisor))
            .collect()
    }

    /// Reduced formula string, elements in sorted order (e.g. "O2Si1").
    #[must_use]
    pub fn reduced_formula(&self) -> String {
        self.reduced()
            .iter()
            .map(|(sym, count)| format!("{sym}{count}"))
            .collect()
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reduced_formula())
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
