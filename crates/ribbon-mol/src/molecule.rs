//! Molecule container and builder

use lin_alg::f32::Vec3;

use crate::atom::Atom;
use crate::error::{MolError, MolResult};
use crate::index::AtomIndex;
use crate::residue::{Chain, Residue};
use crate::secondary::SecondaryStructure;

/// A molecule: a flat atom array plus the chains that reference it
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Molecule name
    pub name: String,
    /// All atoms
    pub atoms: Vec<Atom>,
    /// Chains in file order
    pub chains: Vec<Chain>,
}

impl Molecule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            atoms: Vec::new(),
            chains: Vec::new(),
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Total residues across all chains
    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.len()).sum()
    }

    #[inline]
    pub fn get_atom(&self, index: AtomIndex) -> Option<&Atom> {
        self.atoms.get(index.as_usize())
    }

    /// Position of an atom, if the index is in range
    #[inline]
    pub fn position(&self, index: AtomIndex) -> Option<Vec3> {
        self.get_atom(index).map(|a| a.position)
    }

    pub fn get_chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Check that every residue references atoms inside the atom array
    pub fn validate(&self) -> MolResult<()> {
        let max = self.atoms.len();
        for chain in &self.chains {
            for (residue_idx, residue) in chain.residues.iter().enumerate() {
                if let Some(bad) = residue.atom_refs().find(|idx| idx.as_usize() >= max) {
                    return Err(MolError::AtomIndexOutOfBounds {
                        chain: chain.id.clone(),
                        residue: residue_idx,
                        index: bad.0,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Incremental construction of a [`Molecule`], chain by chain
#[derive(Debug, Default)]
pub struct MoleculeBuilder {
    molecule: Molecule,
}

impl MoleculeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            molecule: Molecule::new(name),
        }
    }

    /// Append an atom and return its index
    pub fn add_atom(&mut self, element: impl Into<String>, position: Vec3) -> AtomIndex {
        let index = AtomIndex::from(self.molecule.atoms.len());
        self.molecule.atoms.push(Atom::new(element, position));
        index
    }

    /// Start a new chain; subsequent residues are appended to it
    pub fn begin_chain(&mut self, id: impl Into<String>) -> &mut Self {
        self.molecule.chains.push(Chain::new(id));
        self
    }

    /// Append a residue to the current chain
    ///
    /// Residues added before [`begin_chain`](Self::begin_chain) are reported
    /// by [`build`](Self::build).
    pub fn add_residue(
        &mut self,
        name: impl Into<String>,
        seq: i32,
        ss: SecondaryStructure,
        center: Option<AtomIndex>,
        flank: Option<[AtomIndex; 2]>,
    ) -> &mut Self {
        let residue = Residue {
            name: name.into(),
            seq,
            ss,
            center,
            flank,
        };
        match self.molecule.chains.last_mut() {
            Some(chain) => chain.residues.push(residue),
            None => {
                // Parked in an unnamed chain so build() can reject it
                let mut orphan = Chain::new("");
                orphan.residues.push(residue);
                self.molecule.chains.push(orphan);
            }
        }
        self
    }

    /// Finish and validate the molecule
    pub fn build(self) -> MolResult<Molecule> {
        let molecule = self.molecule;

        for (i, chain) in molecule.chains.iter().enumerate() {
            if chain.id.is_empty() {
                let name = chain
                    .residues
                    .first()
                    .map(|r| r.name.clone())
                    .unwrap_or_default();
                return Err(MolError::NoOpenChain(name));
            }
            if molecule.chains[..i].iter().any(|c| c.id == chain.id) {
                return Err(MolError::DuplicateChain(chain.id.clone()));
            }
        }

        molecule.validate()?;
        Ok(molecule)
    }
}
