//! Sheet flattening and arrow-tip straightening

use lin_alg::f32::Vec3;
use ribbon_mol::{find_runs, Run, SecondaryStructure};
use ribbon_settings::CartoonSettings;

use super::utils::{try_normalize, SIGNAL_EPS};

/// Sheet runs of a class sequence, in chain order
pub fn sheet_runs(classes: &[SecondaryStructure]) -> Vec<Run> {
    find_runs(classes)
        .into_iter()
        .filter(|r| r.ss == SecondaryStructure::Sheet)
        .collect()
}

/// Project every sheet run of at least 3 points onto its best-fit plane
///
/// The plane is re-estimated each cycle since projection moves the points.
pub fn flatten_sheets(points: &mut [Vec3], classes: &[SecondaryStructure], flat_cycles: u32) {
    for run in sheet_runs(classes) {
        if run.len() < 3 {
            continue;
        }

        for _ in 0..flat_cycles {
            let run_points = &mut points[run.start..=run.end];
            let Some(normal) = plane_normal(run_points) else {
                log::debug!("Sheet run {}..={} is collinear, nothing to flatten", run.start, run.end);
                break;
            };

            let mut sum = Vec3::new(0.0, 0.0, 0.0);
            for p in run_points.iter() {
                sum = sum + *p;
            }
            let centroid = sum / run_points.len() as f32;

            for p in run_points.iter_mut() {
                let offset = (*p - centroid).dot(normal);
                *p = *p - normal * offset;
            }
        }
    }
}

/// Average normal of the planes spanned by consecutive edge pairs
///
/// Each cross product is sign-corrected against the running sum, so the
/// alternating turn direction of a pleated strand does not cancel out.
pub fn plane_normal(points: &[Vec3]) -> Option<Vec3> {
    if points.len() < 3 {
        return None;
    }

    let mut sum = Vec3::new(0.0, 0.0, 0.0);
    for i in 0..(points.len() - 2) {
        let a = points[i + 1] - points[i];
        let b = points[i + 2] - points[i + 1];
        let c = a.cross(b);
        if c.dot(sum) < 0.0 {
            sum = sum - c;
        } else {
            sum = sum + c;
        }
    }

    try_normalize(sum, SIGNAL_EPS)
}

/// Straighten the last few points of every strand toward the anchor-tip line
///
/// A strand end is the last point of a sheet run. Strands with fewer than
/// two points between anchor and tip are left untouched.
pub fn refine_tips(points: &mut [Vec3], classes: &[SecondaryStructure], settings: &CartoonSettings) {
    let offset = settings.tip_anchor_offset.max(1) as usize;

    for run in sheet_runs(classes) {
        let tip = run.end;
        let anchor = tip.saturating_sub(offset).max(run.start);
        if tip < anchor + 3 {
            continue;
        }

        for _ in 0..settings.tip_refine_cycles {
            let a = points[anchor];
            let b = points[tip];
            let dir = b - a;
            let len_sq = dir.magnitude_squared();
            if len_sq < SIGNAL_EPS * SIGNAL_EPS {
                break;
            }

            for i in (anchor + 1)..tip {
                let p = points[i];
                let s = ((p - a).dot(dir) / len_sq).clamp(0.0, 1.0);
                let target = a + dir * s;
                points[i] = p + (target - p) * settings.tip_pull;
            }
        }
    }
}
