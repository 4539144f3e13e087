//! Error types for the render crate

use ribbon_mol::MolError;
use ribbon_settings::SettingError;
use thiserror::Error;

/// Errors that can occur while building or updating representations
///
/// Geometry stages resolve degenerate input locally and never fail. These
/// variants only cover API misuse and invalid input references.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A per-atom array is shorter than the atom range the geometry references
    #[error("Per-atom {attribute} array has {actual} entries but {expected} are required")]
    AttributeLengthMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Requested chain does not exist
    #[error("Chain index {index} is out of bounds (chains: {count})")]
    ChainIndexOutOfBounds { index: usize, count: usize },

    /// Invalid molecular input
    #[error("Invalid molecule: {0}")]
    Molecule(#[from] MolError),

    /// Invalid generation settings
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingError),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Check a per-atom attribute array covers `required` atoms
pub(crate) fn check_attribute_len(
    attribute: &'static str,
    actual: usize,
    required: usize,
) -> RenderResult<()> {
    if actual < required {
        return Err(RenderError::AttributeLengthMismatch {
            attribute,
            expected: required,
            actual,
        });
    }
    Ok(())
}
