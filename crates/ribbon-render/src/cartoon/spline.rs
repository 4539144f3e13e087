//! Curve interpolation through control points
//!
//! The ribbon centerline and the guide-normal field are both sampled from
//! Catmull-Rom curves (cubic Hermite segments whose knot tangents are the
//! central differences of the neighbouring points), so the normal field is
//! C1-continuous like the centerline it rides on.

use lin_alg::f32::Vec3;

use super::utils::normalize_safe;

/// Compute unit tangent vectors at each control point
///
/// - First: tangent[0] = nv[0]
/// - Interior: tangent[i] = normalize(nv[i] + nv[i-1])
/// - Last: tangent[n-1] = nv[n-2]
///
/// Where nv[i] = normalize(pos[i+1] - pos[i])
pub fn compute_tangents(positions: &[Vec3]) -> Vec<Vec3> {
    let n = positions.len();
    if n < 2 {
        return vec![Vec3::new(0.0, 0.0, 1.0); n];
    }

    let mut nv = Vec::with_capacity(n - 1);
    for i in 0..(n - 1) {
        nv.push(normalize_safe(positions[i + 1] - positions[i]));
    }

    let mut tangents = Vec::with_capacity(n);
    tangents.push(nv[0]);
    for i in 1..(n - 1) {
        tangents.push(normalize_safe(nv[i] + nv[i - 1]));
    }
    tangents.push(nv[n - 2]);

    tangents
}

/// Catmull-Rom curve through a sequence of knots
#[derive(Debug, Clone)]
pub struct CatmullRom {
    knots: Vec<Vec3>,
    slopes: Vec<Vec3>,
}

impl CatmullRom {
    /// Build the curve; ends use one-sided differences
    pub fn new(knots: &[Vec3]) -> Self {
        let n = knots.len();
        let slopes = (0..n)
            .map(|i| {
                if n < 2 {
                    Vec3::new(0.0, 0.0, 0.0)
                } else if i == 0 {
                    knots[1] - knots[0]
                } else if i == n - 1 {
                    knots[n - 1] - knots[n - 2]
                } else {
                    (knots[i + 1] - knots[i - 1]) * 0.5
                }
            })
            .collect();

        Self {
            knots: knots.to_vec(),
            slopes,
        }
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Segment index and local parameter for fractional knot index `f`
    fn locate(&self, f: f32) -> (usize, f32) {
        let last = self.knots.len().saturating_sub(2);
        let f = f.max(0.0);
        let i = (f.floor() as usize).min(last);
        (i, (f - i as f32).clamp(0.0, 1.0))
    }

    /// Point on the curve at fractional knot index `f`
    pub fn point(&self, f: f32) -> Vec3 {
        match self.knots.len() {
            0 => Vec3::new(0.0, 0.0, 0.0),
            1 => self.knots[0],
            _ => {
                let (i, t) = self.locate(f);
                hermite_point(self.knots[i], self.slopes[i], self.knots[i + 1], self.slopes[i + 1], t)
            }
        }
    }

    /// Derivative with respect to the knot index at `f`
    pub fn derivative(&self, f: f32) -> Vec3 {
        if self.knots.len() < 2 {
            return Vec3::new(0.0, 0.0, 0.0);
        }
        let (i, t) = self.locate(f);
        hermite_tangent(self.knots[i], self.slopes[i], self.knots[i + 1], self.slopes[i + 1], t)
    }
}

/// Cubic Hermite interpolation for position
fn hermite_point(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11
}

/// Cubic Hermite interpolation for tangent (derivative of position)
fn hermite_tangent(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;

    let dh00 = 6.0 * t2 - 6.0 * t;
    let dh10 = 3.0 * t2 - 4.0 * t + 1.0;
    let dh01 = -6.0 * t2 + 6.0 * t;
    let dh11 = 3.0 * t2 - 2.0 * t;

    p0 * dh00 + m0 * dh10 + p1 * dh01 + m1 * dh11
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_tangents() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        let tangents = compute_tangents(&positions);
        assert_eq!(tangents.len(), 3);
        for t in &tangents {
            assert!((t.x - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_compute_tangents_curved() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        let tangents = compute_tangents(&positions);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!((tangents[1].x - s).abs() < 1e-5);
        assert!((tangents[1].y - s).abs() < 1e-5);
    }

    #[test]
    fn test_curve_interpolates_knots() {
        let knots = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 1.0, 1.0),
            Vec3::new(4.0, 0.0, 2.0),
        ];
        let curve = CatmullRom::new(&knots);
        for (i, k) in knots.iter().enumerate() {
            assert!((curve.point(i as f32) - *k).magnitude() < 1e-5);
        }
    }

    #[test]
    fn test_straight_line_is_linear() {
        let knots: Vec<Vec3> = (0..5).map(|i| Vec3::new(i as f32 * 2.0, 0.0, 0.0)).collect();
        let curve = CatmullRom::new(&knots);
        let p = curve.point(1.25);
        assert!((p.x - 2.5).abs() < 1e-5);
        assert!((curve.derivative(2.6).x - 2.0).abs() < 1e-4);
    }
}
