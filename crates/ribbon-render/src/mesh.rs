//! Ribbon mesh storage and per-residue mutators
//!
//! A [`RibbonMesh`] is built once per chain. Afterwards only vertex
//! positions and colors change; topology, normals and the vertex-to-residue
//! map are fixed for the mesh's lifetime.

use lin_alg::f32::Vec3;
use ribbon_mol::AtomIndex;

use crate::cartoon::ProfileKind;
use crate::cartoon::utils::to_array;
use crate::error::{check_attribute_len, RenderResult};
use crate::vertex::MeshVertex;

const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One ring of vertices (a body ring or an end-cap fan)
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpan {
    /// Index of the ring's first vertex
    pub first_vertex: u32,
    /// Number of consecutive vertices in the ring
    pub vertex_count: u32,
    /// Control point the ring is attributed to
    pub control_point: usize,
    /// Residue index within the chain
    pub residue: usize,
    /// Central atom of that residue
    pub atom: AtomIndex,
    /// Centerline point hidden vertices collapse to
    pub center: Vec3,
    pub kind: ProfileKind,
    /// Profile half-width across the ribbon
    pub half_width: f32,
}

impl RingSpan {
    #[inline]
    pub fn vertex_range(&self) -> std::ops::Range<usize> {
        let start = self.first_vertex as usize;
        start..start + self.vertex_count as usize
    }
}

/// Triangulated ribbon surface of one chain
#[derive(Debug, Clone, Default)]
pub struct RibbonMesh {
    chain_id: String,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
    /// Residue index (within the chain) per vertex
    vertex_residues: Vec<u32>,
    /// Central atom of the attributed residue per vertex
    vertex_atoms: Vec<AtomIndex>,
    /// Positions as built, restored when a residue is shown again
    rest_positions: Vec<[f32; 3]>,
    rings: Vec<RingSpan>,
    /// One past the largest atom index referenced
    atom_extent: usize,
    visible: bool,
}

impl RibbonMesh {
    pub(crate) fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            visible: true,
            ..Default::default()
        }
    }

    pub(crate) fn push_vertex(&mut self, position: Vec3, normal: Vec3, residue: usize, atom: AtomIndex) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(to_array(position));
        self.normals.push(to_array(normal));
        self.colors.push(DEFAULT_COLOR);
        self.vertex_residues.push(residue as u32);
        self.vertex_atoms.push(atom);
        self.atom_extent = self.atom_extent.max(atom.as_usize() + 1);
        index
    }

    pub(crate) fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub(crate) fn push_ring(&mut self, ring: RingSpan) {
        self.rings.push(ring);
    }

    /// Snapshot rest positions once geometry is complete
    pub(crate) fn finish(&mut self) {
        self.rest_positions = self.positions.clone();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Residue index per vertex
    pub fn vertex_residues(&self) -> &[u32] {
        &self.vertex_residues
    }

    pub fn vertex_atoms(&self) -> &[AtomIndex] {
        &self.vertex_atoms
    }

    /// Positions as built, before any visibility change
    pub fn rest_positions(&self) -> &[[f32; 3]] {
        &self.rest_positions
    }

    pub fn rings(&self) -> &[RingSpan] {
        &self.rings
    }

    /// Minimum length of per-atom arrays passed to the mutators
    pub fn atom_extent(&self) -> usize {
        self.atom_extent
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// False only when every ring is hidden
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Interleaved vertices for upload
    pub fn vertices(&self) -> Vec<MeshVertex> {
        let mut out = Vec::with_capacity(self.positions.len());
        self.write_vertices(&mut out);
        out
    }

    /// Interleave into a caller-owned buffer, reusing its allocation
    pub fn write_vertices(&self, out: &mut Vec<MeshVertex>) {
        out.clear();
        out.extend(
            self.positions
                .iter()
                .zip(self.normals.iter())
                .zip(self.colors.iter())
                .map(|((position, normal), color)| MeshVertex {
                    position: *position,
                    normal: *normal,
                    color: *color,
                }),
        );
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Copy each vertex's attributed atom color from a per-atom array
    pub fn set_colors(&mut self, atom_colors: &[[f32; 4]]) -> RenderResult<()> {
        check_attribute_len("color", atom_colors.len(), self.atom_extent)?;

        for (color, atom) in self.colors.iter_mut().zip(self.vertex_atoms.iter()) {
            *color = atom_colors[atom.as_usize()];
        }
        Ok(())
    }

    /// Collapse hidden rings onto their centerline point and restore visible ones
    ///
    /// `scale` is accepted for parity with other representations and only
    /// length-checked.
    pub fn set_visibility(&mut self, atom_visible: &[bool], scale: Option<&[f32]>) -> RenderResult<()> {
        check_attribute_len("visibility", atom_visible.len(), self.atom_extent)?;
        if let Some(scale) = scale {
            check_attribute_len("scale", scale.len(), self.atom_extent)?;
        }

        let mut any_visible = false;
        for ring in &self.rings {
            let range = ring.vertex_range();
            if atom_visible[ring.atom.as_usize()] {
                self.positions[range.clone()].copy_from_slice(&self.rest_positions[range]);
                any_visible = true;
            } else {
                self.positions[range].fill(to_array(ring.center));
            }
        }

        self.visible = any_visible;
        Ok(())
    }
}
