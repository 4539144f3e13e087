//! Interleaved vertex formats for upload by an external renderer
//!
//! All structs derive `Pod` and `Zeroable` so slices of them can be viewed
//! as bytes without copying.

use bytemuck::{Pod, Zeroable};

/// Per-instance sphere data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    /// Sphere center position in world space
    pub center: [f32; 3],
    /// Sphere radius
    pub radius: f32,
    /// RGBA color
    pub color: [f32; 4],
}

/// Triangle mesh vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Normal vector for lighting
    pub normal: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
}

impl MeshVertex {
    /// Byte stride of one vertex
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// View a vertex slice as raw bytes
    pub fn as_bytes(vertices: &[MeshVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

impl SphereVertex {
    /// View an instance slice as raw bytes
    pub fn as_bytes(instances: &[SphereVertex]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertex_size() {
        assert_eq!(std::mem::size_of::<SphereVertex>(), 32);
    }

    #[test]
    fn test_mesh_vertex_size() {
        assert_eq!(MeshVertex::STRIDE, 40);
    }

    #[test]
    fn test_as_bytes_length() {
        let verts = [MeshVertex::zeroed(); 3];
        assert_eq!(MeshVertex::as_bytes(&verts).len(), 120);
    }
}
