//! Molecular representations
//!
//! The set of representations is closed: [`MoleculeRep`] holds one of the
//! concrete types and forwards the shared [`Representation`] interface to it.

pub mod cartoon;
pub mod sphere;

use ribbon_mol::Molecule;
use ribbon_settings::CartoonSettings;

use crate::error::RenderResult;

pub use self::cartoon::CartoonRep;
pub use self::sphere::SphereRep;

/// Representation types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepType {
    Cartoon,
    Spheres,
}

impl RepType {
    pub fn name(&self) -> &'static str {
        match self {
            RepType::Cartoon => "cartoon",
            RepType::Spheres => "spheres",
        }
    }
}

/// Shared interface of every representation
///
/// `build` regenerates geometry from scratch. The attribute mutators take
/// per-atom arrays indexed by [`AtomIndex`](ribbon_mol::AtomIndex) and
/// update the built geometry in place; a short array is rejected before
/// anything is written.
pub trait Representation {
    /// Generate geometry for `molecule`
    ///
    /// `settings` drives the cartoon only. Other variants ignore it and
    /// read their own parameters, such as [`SphereRep::set_scale`].
    fn build(&mut self, molecule: &Molecule, settings: &CartoonSettings);

    /// Recolor from a per-atom RGBA array
    fn set_colors(&mut self, atom_colors: &[[f32; 4]]) -> RenderResult<()>;

    /// Apply per-atom visibility and an optional per-atom scale multiplier
    fn set_visibility(&mut self, atom_visible: &[bool], scale: Option<&[f32]>) -> RenderResult<()>;

    /// Drop all built geometry
    fn dispose(&mut self);

    fn is_dirty(&self) -> bool;

    fn set_dirty(&mut self);

    /// Triangles for meshes, instances for impostors
    fn primitive_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}

/// One of the available representations
#[derive(Debug, Clone)]
pub enum MoleculeRep {
    Cartoon(CartoonRep),
    Spheres(SphereRep),
}

impl MoleculeRep {
    /// Empty, dirty representation of the given type
    pub fn new(rep_type: RepType) -> Self {
        match rep_type {
            RepType::Cartoon => MoleculeRep::Cartoon(CartoonRep::new()),
            RepType::Spheres => MoleculeRep::Spheres(SphereRep::new()),
        }
    }

    pub fn rep_type(&self) -> RepType {
        match self {
            MoleculeRep::Cartoon(_) => RepType::Cartoon,
            MoleculeRep::Spheres(_) => RepType::Spheres,
        }
    }
}

impl Representation for MoleculeRep {
    fn build(&mut self, molecule: &Molecule, settings: &CartoonSettings) {
        match self {
            MoleculeRep::Cartoon(rep) => rep.build(molecule, settings),
            MoleculeRep::Spheres(rep) => rep.build(molecule, settings),
        }
    }

    fn set_colors(&mut self, atom_colors: &[[f32; 4]]) -> RenderResult<()> {
        match self {
            MoleculeRep::Cartoon(rep) => rep.set_colors(atom_colors),
            MoleculeRep::Spheres(rep) => rep.set_colors(atom_colors),
        }
    }

    fn set_visibility(&mut self, atom_visible: &[bool], scale: Option<&[f32]>) -> RenderResult<()> {
        match self {
            MoleculeRep::Cartoon(rep) => rep.set_visibility(atom_visible, scale),
            MoleculeRep::Spheres(rep) => rep.set_visibility(atom_visible, scale),
        }
    }

    fn dispose(&mut self) {
        match self {
            MoleculeRep::Cartoon(rep) => rep.dispose(),
            MoleculeRep::Spheres(rep) => rep.dispose(),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            MoleculeRep::Cartoon(rep) => rep.is_dirty(),
            MoleculeRep::Spheres(rep) => rep.is_dirty(),
        }
    }

    fn set_dirty(&mut self) {
        match self {
            MoleculeRep::Cartoon(rep) => rep.set_dirty(),
            MoleculeRep::Spheres(rep) => rep.set_dirty(),
        }
    }

    fn primitive_count(&self) -> usize {
        match self {
            MoleculeRep::Cartoon(rep) => rep.primitive_count(),
            MoleculeRep::Spheres(rep) => rep.primitive_count(),
        }
    }
}
