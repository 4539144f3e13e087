//! Cartoon representation: one ribbon mesh per chain

use ribbon_mol::Molecule;
use ribbon_settings::CartoonSettings;

use crate::cartoon::{build_cartoon, ChainMesh};
use crate::error::{check_attribute_len, RenderResult};
use crate::mesh::RibbonMesh;
use crate::representation::Representation;

/// Cartoon representation for protein secondary structure
///
/// Holds the chain meshes of the last build together with the settings
/// they were built with. Settings changes only show up after a rebuild.
#[derive(Debug, Clone)]
pub struct CartoonRep {
    meshes: Vec<ChainMesh>,
    /// Settings snapshot of the last build
    settings: Option<CartoonSettings>,
    dirty: bool,
}

impl CartoonRep {
    /// Create a new cartoon representation
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            settings: None,
            dirty: true,
        }
    }

    pub fn meshes(&self) -> &[ChainMesh] {
        &self.meshes
    }

    /// Mesh of the chain with identifier `chain_id`
    pub fn mesh_for_chain(&self, chain_id: &str) -> Option<&RibbonMesh> {
        self.meshes.iter().find(|m| m.chain_id == chain_id).map(|m| &m.mesh)
    }

    /// Settings the current meshes were built with
    pub fn settings(&self) -> Option<&CartoonSettings> {
        self.settings.as_ref()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.vertex_count()).sum()
    }

    /// False when no mesh has a visible ring
    pub fn is_visible(&self) -> bool {
        self.meshes.iter().any(|m| m.mesh.is_visible())
    }

    fn atom_extent(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.atom_extent()).max().unwrap_or(0)
    }
}

impl Default for CartoonRep {
    fn default() -> Self {
        Self::new()
    }
}

impl Representation for CartoonRep {
    fn build(&mut self, molecule: &Molecule, settings: &CartoonSettings) {
        self.meshes = build_cartoon(molecule, settings);
        self.settings = Some(settings.clone());
        self.dirty = false;
        log::debug!(
            "Cartoon '{}': {} chain meshes, {} triangles",
            molecule.name,
            self.meshes.len(),
            self.primitive_count()
        );
    }

    fn set_colors(&mut self, atom_colors: &[[f32; 4]]) -> RenderResult<()> {
        check_attribute_len("color", atom_colors.len(), self.atom_extent())?;
        for chain in &mut self.meshes {
            chain.mesh.set_colors(atom_colors)?;
        }
        Ok(())
    }

    fn set_visibility(&mut self, atom_visible: &[bool], scale: Option<&[f32]>) -> RenderResult<()> {
        let extent = self.atom_extent();
        check_attribute_len("visibility", atom_visible.len(), extent)?;
        if let Some(scale) = scale {
            check_attribute_len("scale", scale.len(), extent)?;
        }
        for chain in &mut self.meshes {
            chain.mesh.set_visibility(atom_visible, scale)?;
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.meshes = Vec::new();
        self.settings = None;
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn set_dirty(&mut self) {
        self.dirty = true;
    }

    fn primitive_count(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.triangle_count()).sum()
    }
}
