//! Atom data

use lin_alg::f32::Vec3;

/// A single atom: element symbol and position
///
/// Atoms are immutable once the molecule is built.
#[derive(Debug, Clone)]
pub struct Atom {
    /// Element symbol ("C", "N", "O", ...)
    pub element: String,
    /// Position in Angstroms
    pub position: Vec3,
}

impl Atom {
    /// Create a new atom
    pub fn new(element: impl Into<String>, position: Vec3) -> Self {
        Self {
            element: element.into(),
            position,
        }
    }

    /// Van der Waals radius from a small table of the common biological elements
    pub fn vdw_radius(&self) -> f32 {
        match self.element.trim().to_ascii_uppercase().as_str() {
            "H" => 1.20,
            "C" => 1.70,
            "N" => 1.55,
            "O" => 1.52,
            "S" => 1.80,
            "P" => 1.80,
            "SE" => 1.90,
            "FE" => 1.40,
            "ZN" => 1.39,
            "MG" => 1.73,
            _ => 1.50,
        }
    }
}
