//! Guide-normal field construction
//!
//! One "up" vector per control point orients the ribbon cross-section. The
//! first non-degenerate signal of this fallback chain is used:
//!
//! 1. For helix and sheet points, the displacement from the original atom
//!    position to the smoothed/idealized position
//! 2. The peptide-plane normal from the two flanking backbone atoms
//! 3. The cross product of the incoming and outgoing trace edges
//! 4. Any vector perpendicular to the local tangent
//!
//! The raw field is then sign-aligned, smoothed once with a 3-point window
//! and orthogonalized against the tangent of the final control points.

use lin_alg::f32::Vec3;
use ribbon_mol::SecondaryStructure;

use super::spline::compute_tangents;
use super::utils::{find_perpendicular, orthogonalize, try_normalize, SIGNAL_EPS};

/// Inputs for one chain's guide-normal field
pub struct NormalInputs<'a> {
    /// Final control points
    pub points: &'a [Vec3],
    /// Control points before any smoothing
    pub originals: &'a [Vec3],
    pub classes: &'a [SecondaryStructure],
    /// Flanking backbone atom positions per control point
    pub flanks: &'a [Option<[Vec3; 2]>],
}

/// Build the guide-normal field for one chain
pub fn build_guide_normals(inputs: &NormalInputs<'_>) -> Vec<Vec3> {
    let points = inputs.points;
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let tangents = compute_tangents(points);

    let mut normals: Vec<Vec3> = (0..n).map(|i| raw_normal(inputs, &tangents, i)).collect();

    align_signs(&mut normals);

    // One pass of 3-point averaging, reading only the aligned field
    let aligned = normals.clone();
    for i in 0..n {
        let mut sum = aligned[i];
        if i > 0 {
            sum = sum + aligned[i - 1];
        }
        if i + 1 < n {
            sum = sum + aligned[i + 1];
        }
        if let Some(v) = try_normalize(sum, SIGNAL_EPS) {
            normals[i] = v;
        }
    }

    for (normal, tangent) in normals.iter_mut().zip(tangents.iter()) {
        *normal = orthogonalize(*normal, *tangent);
    }

    // Orthogonalization can rotate a normal past its neighbour
    align_signs(&mut normals);

    normals
}

fn raw_normal(inputs: &NormalInputs<'_>, tangents: &[Vec3], i: usize) -> Vec3 {
    let points = inputs.points;

    if !inputs.classes[i].is_coil() {
        if let Some(v) = try_normalize(points[i] - inputs.originals[i], SIGNAL_EPS) {
            return v;
        }
    }

    if let Some([a, b]) = inputs.flanks.get(i).copied().flatten() {
        let center = inputs.originals[i];
        if let Some(v) = try_normalize((a - center).cross(b - center), SIGNAL_EPS) {
            return v;
        }
    }

    if i > 0 && i + 1 < points.len() {
        let incoming = points[i] - points[i - 1];
        let outgoing = points[i + 1] - points[i];
        if let Some(v) = try_normalize(incoming.cross(outgoing), SIGNAL_EPS) {
            return v;
        }
    }

    find_perpendicular(tangents[i])
}

/// Flip any normal pointing away from its predecessor
fn align_signs(normals: &mut [Vec3]) {
    for i in 1..normals.len() {
        if normals[i].dot(normals[i - 1]) < 0.0 {
            normals[i] = normals[i] * -1.0;
        }
    }
}
