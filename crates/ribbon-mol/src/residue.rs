//! Residues, chains and secondary structure runs

use serde::{Deserialize, Serialize};

use crate::index::AtomIndex;
use crate::secondary::SecondaryStructure;

/// One residue of a chain
///
/// `center` is the central backbone atom (CA for proteins). `flank` holds
/// two backbone atoms on either side of it (typically C and O) whose
/// offsets from the center span the peptide plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Residue {
    /// Residue name (e.g. "ALA")
    pub name: String,
    /// Residue sequence number
    pub seq: i32,
    /// Secondary structure class
    pub ss: SecondaryStructure,
    /// Central backbone atom
    pub center: Option<AtomIndex>,
    /// Flanking backbone atoms used for peptide plane estimation
    pub flank: Option<[AtomIndex; 2]>,
}

impl Residue {
    pub fn new(name: impl Into<String>, seq: i32, ss: SecondaryStructure) -> Self {
        Self {
            name: name.into(),
            seq,
            ss,
            center: None,
            flank: None,
        }
    }

    /// Set the central backbone atom
    pub fn with_center(mut self, center: AtomIndex) -> Self {
        self.center = Some(center);
        self
    }

    /// Set the two flanking backbone atoms
    pub fn with_flank(mut self, flank: [AtomIndex; 2]) -> Self {
        self.flank = Some(flank);
        self
    }

    /// Iterate over every atom this residue references
    pub fn atom_refs(&self) -> impl Iterator<Item = AtomIndex> + '_ {
        self.center
            .into_iter()
            .chain(self.flank.into_iter().flat_map(|f| f.into_iter()))
    }
}

/// An ordered sequence of residues with an identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    /// Chain identifier
    pub id: String,
    /// Residues in backbone order
    pub residues: Vec<Residue>,
}

impl Chain {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residues: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Secondary structure string, one character per residue
    pub fn ss_string(&self) -> String {
        self.residues.iter().map(|r| r.ss.to_char()).collect()
    }
}

/// A maximal span of consecutive entries sharing one class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// First index of the run
    pub start: usize,
    /// Last index of the run (inclusive)
    pub end: usize,
    /// Class shared by every entry
    pub ss: SecondaryStructure,
}

// A run always holds at least one entry
#[allow(clippy::len_without_is_empty)]
impl Run {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// Split a class sequence into maximal runs of identical class
pub fn find_runs(classes: &[SecondaryStructure]) -> Vec<Run> {
    let mut runs = Vec::new();
    if classes.is_empty() {
        return runs;
    }

    let mut start = 0;
    for i in 1..=classes.len() {
        if i == classes.len() || classes[i] != classes[start] {
            runs.push(Run {
                start,
                end: i - 1,
                ss: classes[start],
            });
            start = i;
        }
    }

    runs
}
