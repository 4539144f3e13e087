//! Type-safe atom index
//!
//! Residues reference atoms in the molecule's flat atom array through
//! [`AtomIndex`] rather than raw integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Invalid index marker value
pub const INVALID_INDEX: u32 = u32::MAX;

/// Index of an atom in [`crate::Molecule::atoms`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct AtomIndex(pub u32);

impl AtomIndex {
    /// Create a new index
    #[inline]
    pub const fn new(index: u32) -> Self {
        AtomIndex(index)
    }

    /// Get the raw index value as usize
    #[inline]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid index
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != INVALID_INDEX
    }

    /// Create an invalid index
    #[inline]
    pub const fn invalid() -> Self {
        AtomIndex(INVALID_INDEX)
    }
}

impl fmt::Debug for AtomIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "AtomIndex({})", self.0)
        } else {
            write!(f, "AtomIndex(INVALID)")
        }
    }
}

impl fmt::Display for AtomIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "INVALID")
        }
    }
}

impl From<u32> for AtomIndex {
    #[inline]
    fn from(index: u32) -> Self {
        AtomIndex(index)
    }
}

impl From<usize> for AtomIndex {
    #[inline]
    fn from(index: usize) -> Self {
        AtomIndex(index as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_index_validity() {
        assert!(AtomIndex::new(3).is_valid());
        assert!(!AtomIndex::invalid().is_valid());
        assert_eq!(AtomIndex::from(7usize).as_usize(), 7);
    }

    #[test]
    fn test_atom_index_display() {
        assert_eq!(format!("{}", AtomIndex(12)), "12");
        assert_eq!(format!("{:?}", AtomIndex::invalid()), "AtomIndex(INVALID)");
    }
}
