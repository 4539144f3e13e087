//! Molecular model for cartoon geometry generation
//!
//! This crate holds the minimal structural data the cartoon builder consumes:
//!
//! - [`Atom`] - Element symbol and position
//! - [`Residue`] - Secondary structure class plus its central and flanking backbone atoms
//! - [`Chain`] - Ordered residues sharing one identifier
//! - [`Molecule`] - Flat atom array plus its chains
//!
//! # Architecture
//!
//! Atoms live in a single flat array and residues reference them through
//! [`AtomIndex`]. Chains never share residues, and residue order inside a
//! chain is the spatial order of the backbone.
//!
//! # Example
//!
//! ```rust
//! use ribbon_mol::{MoleculeBuilder, SecondaryStructure};
//! use lin_alg::f32::Vec3;
//!
//! let mut builder = MoleculeBuilder::new("peptide");
//! builder.begin_chain("A");
//! for i in 0..3 {
//!     let ca = builder.add_atom("C", Vec3::new(i as f32 * 3.8, 0.0, 0.0));
//!     builder.add_residue("ALA", i + 1, SecondaryStructure::Coil, Some(ca), None);
//! }
//! let molecule = builder.build().unwrap();
//!
//! assert_eq!(molecule.chain_count(), 1);
//! assert_eq!(molecule.atom_count(), 3);
//! ```

mod atom;
mod error;
mod index;
mod molecule;
mod residue;
mod secondary;

pub use atom::Atom;
pub use error::{MolError, MolResult};
pub use index::{AtomIndex, INVALID_INDEX};
pub use molecule::{Molecule, MoleculeBuilder};
pub use residue::{find_runs, Chain, Residue, Run};
pub use secondary::SecondaryStructure;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::{Atom, AtomIndex, Chain, Molecule, MoleculeBuilder, Residue, SecondaryStructure};
}
