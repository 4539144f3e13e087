//! Helix idealization
//!
//! Each helix run long enough to define an axis is fitted to an exact screw:
//! the axis is the dominant eigenvector of the run's covariance, and the
//! angle and height of every point around and along it are fitted as linear
//! functions of the point index. The run's points are then replaced by
//! samples of that screw, and the fitted parameters are kept so the mesh
//! builder can sample position and frame analytically.

use lin_alg::f32::Vec3;
use ribbon_mol::{find_runs, SecondaryStructure};

use super::utils::{normalize_safe, try_normalize, SIGNAL_EPS};

const POWER_ITERATIONS: usize = 100;
const POWER_TOLERANCE: f32 = 1e-6;

/// Fitted parameters of one idealized helix run
///
/// Angles and heights are linear in the control point index `f`, measured
/// from `start`. `f` may be fractional.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixRun {
    /// First control point of the run
    pub start: usize,
    /// Last control point of the run (inclusive)
    pub end: usize,
    pub centroid: Vec3,
    /// Unit axis, oriented from the run's first point toward its last
    pub axis: Vec3,
    /// First basis vector perpendicular to the axis
    pub u: Vec3,
    /// Second basis vector, `axis x u`
    pub w: Vec3,
    pub angle_offset: f32,
    /// Radians per residue
    pub angle_rate: f32,
    pub height_offset: f32,
    /// Rise per residue along the axis
    pub height_rate: f32,
    /// Mean distance of the original points from the axis
    pub radius: f32,
}

impl HelixRun {
    /// Whether the fractional control index `f` lies inside the run
    #[inline]
    pub fn contains(&self, f: f32) -> bool {
        f >= self.start as f32 && f <= self.end as f32
    }

    #[inline]
    fn local(&self, f: f32) -> f32 {
        f - self.start as f32
    }

    #[inline]
    fn angle(&self, f: f32) -> f32 {
        self.angle_offset + self.angle_rate * self.local(f)
    }

    /// Outward unit direction from the axis at `f`
    pub fn radial(&self, f: f32) -> Vec3 {
        let theta = self.angle(f);
        self.u * theta.cos() + self.w * theta.sin()
    }

    /// Position on the ideal helix at `f`
    pub fn position(&self, f: f32) -> Vec3 {
        let height = self.height_offset + self.height_rate * self.local(f);
        self.centroid + self.axis * height + self.radial(f) * self.radius
    }

    /// Unit tangent of the ideal helix at `f`
    pub fn tangent(&self, f: f32) -> Vec3 {
        let theta = self.angle(f);
        let around = self.w * theta.cos() - self.u * theta.sin();
        normalize_safe(self.axis * self.height_rate + around * (self.radius * self.angle_rate))
    }

    /// Distance of `p` from the fitted axis
    pub fn distance_from_axis(&self, p: Vec3) -> f32 {
        let d = p - self.centroid;
        (d - self.axis * d.dot(self.axis)).magnitude()
    }
}

/// Fit and idealize every helix run of at least `min_length` points
///
/// Returns the fitted runs in chain order. Runs whose geometry is too
/// degenerate to define an axis are left as they are.
pub fn idealize_helices(
    points: &mut [Vec3],
    classes: &[SecondaryStructure],
    min_length: usize,
) -> Vec<HelixRun> {
    let mut fitted = Vec::new();

    for run in find_runs(classes) {
        if run.ss != SecondaryStructure::Helix {
            continue;
        }
        if run.len() < min_length.max(4) {
            log::debug!(
                "Helix run {}..={} too short to idealize ({} points)",
                run.start,
                run.end,
                run.len()
            );
            continue;
        }

        let Some(helix) = fit_helix(&points[run.start..=run.end], run.start) else {
            log::debug!("Helix run {}..={} is degenerate, left unfitted", run.start, run.end);
            continue;
        };

        for i in run.start..=run.end {
            points[i] = helix.position(i as f32);
        }
        fitted.push(helix);
    }

    fitted
}

/// Fit an ideal helix to `points`, the run starting at control index `start`
pub fn fit_helix(points: &[Vec3], start: usize) -> Option<HelixRun> {
    let n = points.len();
    if n < 4 {
        return None;
    }

    let mut sum = Vec3::new(0.0, 0.0, 0.0);
    for p in points {
        sum = sum + *p;
    }
    let centroid = sum / n as f32;

    let covariance = covariance(points, centroid);
    let span = points[n - 1] - points[0];
    let mut axis = dominant_eigenvector(&covariance, span)?;
    if axis.dot(span) < 0.0 {
        axis = axis * -1.0;
    }

    let reference = if axis.y.abs() > 0.9 {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    };
    let u = try_normalize(axis.cross(reference), SIGNAL_EPS)?;
    let w = axis.cross(u);

    let mut heights = Vec::with_capacity(n);
    let mut angles = Vec::with_capacity(n);
    let mut radius = 0.0;
    for p in points {
        let d = *p - centroid;
        let height = d.dot(axis);
        let radial = d - axis * height;
        heights.push(height);
        angles.push(radial.dot(w).atan2(radial.dot(u)));
        radius += radial.magnitude();
    }
    radius /= n as f32;

    unwrap_angles(&mut angles);
    let (angle_offset, angle_rate) = linear_fit(&angles);
    let (height_offset, height_rate) = linear_fit(&heights);

    Some(HelixRun {
        start,
        end: start + n - 1,
        centroid,
        axis,
        u,
        w,
        angle_offset,
        angle_rate,
        height_offset,
        height_rate,
        radius,
    })
}

// ============================================================================
// Numerics
// ============================================================================

fn covariance(points: &[Vec3], centroid: Vec3) -> [[f32; 3]; 3] {
    let mut m = [[0.0f32; 3]; 3];
    for p in points {
        let d = *p - centroid;
        let c = [d.x, d.y, d.z];
        for r in 0..3 {
            for k in 0..3 {
                m[r][k] += c[r] * c[k];
            }
        }
    }
    let inv = 1.0 / points.len() as f32;
    for row in m.iter_mut() {
        for v in row.iter_mut() {
            *v *= inv;
        }
    }
    m
}

fn mat_vec(m: &[[f32; 3]; 3], v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}

/// Power iteration from `seed`; stops once successive estimates agree
fn dominant_eigenvector(m: &[[f32; 3]; 3], seed: Vec3) -> Option<Vec3> {
    let mut v = try_normalize(seed, SIGNAL_EPS).unwrap_or(Vec3::new(1.0, 1.0, 1.0) / 3f32.sqrt());

    for _ in 0..POWER_ITERATIONS {
        let next = try_normalize(mat_vec(m, v), 1e-12)?;
        let step = (next - v).magnitude();
        v = next;
        if step < POWER_TOLERANCE {
            break;
        }
    }

    Some(v)
}

/// Shift angles by whole turns so consecutive steps never exceed pi
fn unwrap_angles(angles: &mut [f32]) {
    use std::f32::consts::{PI, TAU};
    for i in 1..angles.len() {
        let mut a = angles[i];
        while a - angles[i - 1] > PI {
            a -= TAU;
        }
        while a - angles[i - 1] < -PI {
            a += TAU;
        }
        angles[i] = a;
    }
}

/// Least-squares line through `(index, value)`, as `(offset, rate)`
fn linear_fit(values: &[f32]) -> (f32, f32) {
    let n = values.len() as f32;
    let mean_t = (n - 1.0) * 0.5;
    let mean_v = values.iter().sum::<f32>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (i, v) in values.iter().enumerate() {
        let dt = i as f32 - mean_t;
        cov += dt * (v - mean_v);
        var += dt * dt;
    }

    let rate = if var > 0.0 { cov / var } else { 0.0 };
    (mean_v - rate * mean_t, rate)
}
