//! Local frames for orienting cross-sections along the curve

use lin_alg::f32::Vec3;

use super::utils::{normalize_safe, orthogonalize};

/// A reference frame at one curve sample
///
/// - Tangent (T): along the curve
/// - Normal (N): across the ribbon, the profile's local x axis
/// - Binormal (B): the guide-normal "up", the profile's local y axis
///
/// `N x B = T`, so counter-clockwise profiles produce outward-facing quads.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceFrame {
    pub position: Vec3,
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

impl ReferenceFrame {
    /// Frame from a tangent and an approximate up vector
    ///
    /// `up` is re-orthogonalized against the tangent, falling back to any
    /// perpendicular if it is parallel.
    pub fn new(position: Vec3, tangent: Vec3, up: Vec3) -> Self {
        let t = normalize_safe(tangent);
        let b = orthogonalize(up, t);
        let n = b.cross(t);
        Self {
            position,
            tangent: t,
            normal: n,
            binormal: b,
        }
    }

    /// Rotate the cross-section half a turn about the tangent
    pub fn flipped(&self) -> Self {
        Self {
            normal: self.normal * -1.0,
            binormal: self.binormal * -1.0,
            ..*self
        }
    }

    /// Transform a local 2D profile point to world space
    #[inline]
    pub fn transform_local(&self, local: (f32, f32)) -> Vec3 {
        self.position + self.normal * local.0 + self.binormal * local.1
    }

    /// Transform a local 2D profile normal to a world-space unit normal
    #[inline]
    pub fn local_normal(&self, local: (f32, f32)) -> Vec3 {
        normalize_safe(self.normal * local.0 + self.binormal * local.1)
    }
}
