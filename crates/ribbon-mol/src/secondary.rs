//! Secondary structure classes
//!
//! The cartoon builder distinguishes only three classes. Finer DSSP codes
//! collapse onto them when parsed with [`SecondaryStructure::from_char`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural class of a residue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum SecondaryStructure {
    /// Loop, turn, bend or any irregular conformation
    #[default]
    Coil = 0,
    /// Any helix (alpha, 3-10, pi)
    Helix = 1,
    /// Extended beta strand
    Sheet = 2,
}

impl SecondaryStructure {
    /// Create from a single character code
    ///
    /// - 'H', 'G', 'I' = Helix
    /// - 'E', 'B' = Sheet
    /// - anything else = Coil
    pub fn from_char(c: char) -> Self {
        match c {
            'H' | 'h' | 'G' | 'g' | 'I' | 'i' => SecondaryStructure::Helix,
            'E' | 'e' | 'B' | 'b' => SecondaryStructure::Sheet,
            _ => SecondaryStructure::Coil,
        }
    }

    /// Convert to single character code
    pub fn to_char(&self) -> char {
        match self {
            SecondaryStructure::Coil => 'L',
            SecondaryStructure::Helix => 'H',
            SecondaryStructure::Sheet => 'E',
        }
    }

    #[inline]
    pub fn is_helix(&self) -> bool {
        *self == SecondaryStructure::Helix
    }

    #[inline]
    pub fn is_sheet(&self) -> bool {
        *self == SecondaryStructure::Sheet
    }

    #[inline]
    pub fn is_coil(&self) -> bool {
        *self == SecondaryStructure::Coil
    }

    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SecondaryStructure::Coil => "Coil",
            SecondaryStructure::Helix => "Helix",
            SecondaryStructure::Sheet => "Sheet",
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
