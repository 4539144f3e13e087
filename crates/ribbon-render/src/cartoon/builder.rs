//! Ribbon mesh builder
//!
//! Sweeps cross-section profiles along the smoothed backbone curve. Inside
//! idealized helix runs the frame comes from the fitted screw; elsewhere
//! from the centerline curve and the interpolated guide-normal field.
//!
//! Profile selection per sample, first match wins:
//! 1. Arrowhead taper within `arrow_length` residues before a strand end
//! 2. Class boundary: coil on either side snaps to the coil profile,
//!    helix/sheet boundaries blend by fractional position
//! 3. The class's base profile (sheet rounds off just before a taper)

use std::borrow::Cow;

use ribbon_mol::{Run, SecondaryStructure};
use ribbon_settings::CartoonSettings;

use super::frame::ReferenceFrame;
use super::helix::HelixRun;
use super::profile::{arrow_profile, rounded_sheet_profile, Profile, ProfileKind, ProfileSet};
use super::sheet::sheet_runs;
use super::spline::{compute_tangents, CatmullRom};
use super::utils::{try_normalize, SIGNAL_EPS};
use super::CartoonTrace;
use crate::mesh::{RibbonMesh, RingSpan};

/// Sweep the profiles of one traced chain into a mesh
pub fn build_mesh(trace: &CartoonTrace, settings: &CartoonSettings) -> RibbonMesh {
    let mut mesh = RibbonMesh::new(trace.chain_id.as_str());
    let n = trace.points.len();
    if n < 2 {
        return mesh;
    }

    let sampling = settings.sampling.max(1) as usize;
    let total = (n - 1) * sampling;

    let centerline = CatmullRom::new(&trace.points);
    let normal_curve = CatmullRom::new(&trace.normals);
    let profiles = ProfileSet::new(settings);
    let selector = ProfileSelector {
        classes: &trace.classes,
        sheets: sheet_runs(&trace.classes),
        profiles: &profiles,
        settings,
    };

    let mut last_tangent = compute_tangents(&trace.points)[0];
    let mut prev_frame: Option<ReferenceFrame> = None;
    let mut prev_ring: Option<u32> = None;
    let mut end_cap: Option<(ReferenceFrame, Profile)> = None;

    for k in 0..=total {
        let f = k as f32 / sampling as f32;
        let segment = (k / sampling).min(n - 2);
        let t = f - segment as f32;

        let mut frame = match trace.helix_runs.iter().find(|h| h.contains(f)) {
            Some(helix) => helix_frame(helix, f),
            None => {
                let tangent = try_normalize(centerline.derivative(f), SIGNAL_EPS).unwrap_or(last_tangent);
                ReferenceFrame::new(centerline.point(f), tangent, normal_curve.point(f))
            }
        };
        if let Some(prev) = prev_frame {
            if frame.binormal.dot(prev.binormal) < 0.0 {
                frame = frame.flipped();
            }
        }
        last_tangent = frame.tangent;

        let (profile, kind) = selector.select(f, segment, t);
        let control_point = (f.round() as usize).min(n - 1);
        let owner = RingOwner {
            control_point,
            residue: trace.residues[control_point],
            atom: trace.atoms[control_point],
        };

        if k == 0 {
            emit_cap(&mut mesh, &frame, &profile, &owner, true);
        }

        let ring = emit_ring(&mut mesh, &frame, &profile, &owner, kind);
        if let Some(prev) = prev_ring {
            connect_rings(&mut mesh, prev, ring, profile.len() as u32);
        }
        prev_ring = Some(ring);
        prev_frame = Some(frame);

        if k == total {
            end_cap = Some((frame, profile.into_owned()));
        }
    }

    if let Some((frame, profile)) = end_cap {
        let owner = RingOwner {
            control_point: n - 1,
            residue: trace.residues[n - 1],
            atom: trace.atoms[n - 1],
        };
        emit_cap(&mut mesh, &frame, &profile, &owner, false);
    }

    mesh.finish();
    log::debug!(
        "Chain '{}': {} control points, {} rings, {} vertices, {} triangles",
        trace.chain_id,
        n,
        mesh.rings().len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Analytic frame on an idealized helix
fn helix_frame(helix: &HelixRun, f: f32) -> ReferenceFrame {
    ReferenceFrame::new(helix.position(f), helix.tangent(f), helix.radial(f))
}

// ============================================================================
// Profile selection
// ============================================================================

struct ProfileSelector<'a> {
    classes: &'a [SecondaryStructure],
    sheets: Vec<Run>,
    profiles: &'a ProfileSet,
    settings: &'a CartoonSettings,
}

impl<'a> ProfileSelector<'a> {
    /// Profile for fractional position `f`, `t` along interval `segment`
    ///
    /// A ring at an integer `f` takes the profile of the interval that
    /// starts there. The last ring of a run followed by coil is therefore a
    /// coil ring, while the first ring of the run has the run's profile.
    fn select(&self, f: f32, segment: usize, t: f32) -> (Cow<'a, Profile>, ProfileKind) {
        let arrow_length = self.settings.arrow_length;
        let profiles: &'a ProfileSet = self.profiles;

        for run in &self.sheets {
            let distance = run.end as f32 - f;
            if f >= run.start as f32 && (0.0..=arrow_length).contains(&distance) {
                return (Cow::Owned(arrow_profile(distance, self.settings)), ProfileKind::Arrow);
            }
        }

        let here = self.classes[segment];
        let next = self.classes[segment + 1];
        if here != next {
            if here.is_coil() || next.is_coil() {
                return (Cow::Borrowed(&profiles.coil), ProfileKind::Coil);
            }
            let from = profiles.for_class(here);
            let to = profiles.for_class(next);
            return (Cow::Owned(from.blend(to, t)), ProfileKind::Blend);
        }

        if here.is_sheet() {
            if let Some(run) = self.sheets.iter().find(|r| r.contains(segment)) {
                let lead = run.end as f32 - arrow_length - f;
                if lead >= 0.0 && lead < self.settings.arrow_round_span {
                    return (Cow::Owned(rounded_sheet_profile(lead, self.settings)), ProfileKind::Sheet);
                }
            }
        }

        (Cow::Borrowed(profiles.for_class(here)), ProfileKind::for_class(here))
    }
}

// ============================================================================
// Triangulation
// ============================================================================

struct RingOwner {
    control_point: usize,
    residue: usize,
    atom: ribbon_mol::AtomIndex,
}

fn emit_ring(
    mesh: &mut RibbonMesh,
    frame: &ReferenceFrame,
    profile: &Profile,
    owner: &RingOwner,
    kind: ProfileKind,
) -> u32 {
    let first = mesh.vertex_count() as u32;
    for (point, normal) in profile.points.iter().zip(profile.normals.iter()) {
        mesh.push_vertex(
            frame.transform_local(*point),
            frame.local_normal(*normal),
            owner.residue,
            owner.atom,
        );
    }
    mesh.push_ring(RingSpan {
        first_vertex: first,
        vertex_count: profile.len() as u32,
        control_point: owner.control_point,
        residue: owner.residue,
        atom: owner.atom,
        center: frame.position,
        kind,
        half_width: profile.half_width(),
    });
    first
}

/// Connect two profile rings with triangles
fn connect_rings(mesh: &mut RibbonMesh, ring1_start: u32, ring2_start: u32, profile_len: u32) {
    for j in 0..profile_len {
        let j_next = (j + 1) % profile_len;

        let v00 = ring1_start + j;
        let v01 = ring1_start + j_next;
        let v10 = ring2_start + j;
        let v11 = ring2_start + j_next;

        // Two triangles per quad, CCW when viewed from outside
        mesh.push_triangle(v00, v01, v10);
        mesh.push_triangle(v01, v11, v10);
    }
}

/// Close a tube end with a triangle fan around a center vertex
///
/// The fan duplicates the ring's edge so it can carry the flat cap normal.
fn emit_cap(mesh: &mut RibbonMesh, frame: &ReferenceFrame, profile: &Profile, owner: &RingOwner, is_start: bool) {
    let cap_normal = if is_start {
        frame.tangent * -1.0
    } else {
        frame.tangent
    };

    let center = mesh.push_vertex(frame.position, cap_normal, owner.residue, owner.atom);
    let edge_start = mesh.vertex_count() as u32;
    for point in &profile.points {
        mesh.push_vertex(frame.transform_local(*point), cap_normal, owner.residue, owner.atom);
    }

    let n = profile.len() as u32;
    for j in 0..n {
        let j_next = (j + 1) % n;
        if is_start {
            // Reverse winding for start cap
            mesh.push_triangle(center, edge_start + j_next, edge_start + j);
        } else {
            mesh.push_triangle(center, edge_start + j, edge_start + j_next);
        }
    }

    mesh.push_ring(RingSpan {
        first_vertex: center,
        vertex_count: n + 1,
        control_point: owner.control_point,
        residue: owner.residue,
        atom: owner.atom,
        center: frame.position,
        kind: ProfileKind::Cap,
        half_width: profile.half_width(),
    });
}
