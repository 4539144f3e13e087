//! Shared vector helpers for the cartoon stages

use lin_alg::f32::Vec3;

/// Magnitude below which a direction signal is treated as degenerate
pub const SIGNAL_EPS: f32 = 1e-4;

/// Normalize a vector safely, returning a default for zero-length vectors
#[inline]
pub fn normalize_safe(v: Vec3) -> Vec3 {
    let len_sq = v.magnitude_squared();
    if len_sq > 1e-10 {
        v / len_sq.sqrt()
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    }
}

/// Normalize a vector if its magnitude exceeds `eps`
#[inline]
pub fn try_normalize(v: Vec3, eps: f32) -> Option<Vec3> {
    let len = v.magnitude();
    if len > eps && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

/// Find a unit vector perpendicular to `v`
///
/// Crosses with the coordinate axis least aligned with `v`.
pub fn find_perpendicular(v: Vec3) -> Vec3 {
    let abs_x = v.x.abs();
    let abs_y = v.y.abs();
    let abs_z = v.z.abs();

    let other = if abs_x <= abs_y && abs_x <= abs_z {
        Vec3::new(1.0, 0.0, 0.0)
    } else if abs_y <= abs_z {
        Vec3::new(0.0, 1.0, 0.0)
    } else {
        Vec3::new(0.0, 0.0, 1.0)
    };

    normalize_safe(v.cross(other))
}

/// Remove the component of `v` along the unit vector `axis` and renormalize
///
/// Falls back to an arbitrary perpendicular of `axis` if nothing remains.
#[inline]
pub fn orthogonalize(v: Vec3, axis: Vec3) -> Vec3 {
    let projected = v - axis * v.dot(axis);
    try_normalize(projected, SIGNAL_EPS).unwrap_or_else(|| find_perpendicular(axis))
}

#[inline]
pub fn to_array(v: Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}
