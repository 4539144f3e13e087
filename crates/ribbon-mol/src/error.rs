//! Error types for molecular operations

use thiserror::Error;

/// Errors that can occur when assembling or validating molecular data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MolError {
    /// A residue references an atom outside the atom array
    #[error("Atom index {index} referenced by residue {residue} of chain '{chain}' is out of bounds (max: {max})")]
    AtomIndexOutOfBounds {
        chain: String,
        residue: usize,
        index: u32,
        max: usize,
    },

    /// A residue was added before any chain was started
    #[error("Residue '{0}' added before any chain was started")]
    NoOpenChain(String),

    /// Two chains share the same identifier
    #[error("Duplicate chain identifier '{0}'")]
    DuplicateChain(String),
}

/// Result type for molecular operations
pub type MolResult<T> = Result<T, MolError>;
