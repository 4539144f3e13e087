//! Cross-section profiles for cartoon extrusion
//!
//! A profile is a closed 2D ring swept along the backbone curve. Local `x`
//! runs across the ribbon (width) and local `y` along the guide normal
//! (thickness). Every profile built for one mesh has the same point count,
//! so any two rings can be connected or blended point by point.

use ribbon_mol::SecondaryStructure;
use ribbon_settings::CartoonSettings;

/// Narrowest arrowhead half-width, used at the very tip
pub const MIN_ARROW_WIDTH: f32 = 0.05;

/// Which rule produced a ring's profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Coil,
    Helix,
    Sheet,
    /// Tapering arrowhead before a strand end
    Arrow,
    /// Helix/sheet boundary interpolation
    Blend,
    /// End cap fan
    Cap,
}

impl ProfileKind {
    /// Base kind for a structural class
    pub fn for_class(ss: SecondaryStructure) -> Self {
        match ss {
            SecondaryStructure::Coil => ProfileKind::Coil,
            SecondaryStructure::Helix => ProfileKind::Helix,
            SecondaryStructure::Sheet => ProfileKind::Sheet,
        }
    }
}

/// Cross-section profile
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Points in local 2D coordinates; the ring closes from last to first
    pub points: Vec<(f32, f32)>,
    /// Outward-facing unit normals for each point
    pub normals: Vec<(f32, f32)>,
}

impl Profile {
    /// Elliptical profile with half-extents `width` (x) and `thickness` (y)
    pub fn ellipse(width: f32, thickness: f32, quality: u32) -> Self {
        Self::superellipse(width, thickness, 2.0, quality)
    }

    /// Circular profile (for coil tubes)
    pub fn circle(radius: f32, quality: u32) -> Self {
        Self::ellipse(radius, radius, quality)
    }

    /// Superellipse `|x/a|^e + |y/b|^e = 1`
    ///
    /// `exponent` 2 gives an ellipse; larger values approach a rectangle.
    /// Points use the same angular parameterization for every exponent so
    /// profiles of equal quality blend cleanly.
    pub fn superellipse(width: f32, thickness: f32, exponent: f32, quality: u32) -> Self {
        let n = quality.max(3) as usize;
        let exponent = exponent.max(1.0);
        let mut points = Vec::with_capacity(n);
        let mut normals = Vec::with_capacity(n);

        for i in 0..n {
            let angle = std::f32::consts::TAU * (i as f32) / (n as f32);
            let cos_a = angle.cos();
            let sin_a = angle.sin();
            let sign_x = if cos_a < 0.0 { -1.0 } else { 1.0 };
            let sign_y = if sin_a < 0.0 { -1.0 } else { 1.0 };
            let abs_cos = cos_a.abs();
            let abs_sin = sin_a.abs();

            let x = width * sign_x * abs_cos.powf(2.0 / exponent);
            let y = thickness * sign_y * abs_sin.powf(2.0 / exponent);
            points.push((x, y));

            // Gradient of the implicit form
            let grad_power = 2.0 - 2.0 / exponent;
            let nx = if abs_cos > 1e-6 {
                sign_x * abs_cos.powf(grad_power) / width
            } else {
                0.0
            };
            let ny = if abs_sin > 1e-6 {
                sign_y * abs_sin.powf(grad_power) / thickness
            } else {
                0.0
            };

            let len = (nx * nx + ny * ny).sqrt();
            if len > 1e-6 {
                normals.push((nx / len, ny / len));
            } else {
                let len2 = (x * x + y * y).sqrt();
                if len2 > 1e-6 {
                    normals.push((x / len2, y / len2));
                } else {
                    normals.push((1.0, 0.0));
                }
            }
        }

        Profile { points, normals }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest local x extent
    pub fn half_width(&self) -> f32 {
        self.points.iter().fold(0.0, |m, (x, _)| m.max(x.abs()))
    }

    /// Linear blend of points and normals (0.0 = self, 1.0 = other)
    ///
    /// Both profiles must have the same number of points.
    pub fn blend(&self, other: &Profile, t: f32) -> Self {
        debug_assert_eq!(self.points.len(), other.points.len(), "Profiles must have same point count");

        let t = t.clamp(0.0, 1.0);
        let one_minus_t = 1.0 - t;

        let points = self
            .points
            .iter()
            .zip(other.points.iter())
            .map(|((x1, y1), (x2, y2))| (x1 * one_minus_t + x2 * t, y1 * one_minus_t + y2 * t))
            .collect();

        let normals = self
            .normals
            .iter()
            .zip(other.normals.iter())
            .map(|((nx1, ny1), (nx2, ny2))| {
                let nx = nx1 * one_minus_t + nx2 * t;
                let ny = ny1 * one_minus_t + ny2 * t;
                let len = (nx * nx + ny * ny).sqrt();
                if len > 1e-6 {
                    (nx / len, ny / len)
                } else {
                    (*nx1, *ny1)
                }
            })
            .collect();

        Profile { points, normals }
    }
}

/// The fixed profiles of one build, shared by every ring
#[derive(Debug, Clone)]
pub struct ProfileSet {
    pub coil: Profile,
    pub helix: Profile,
    pub sheet: Profile,
}

impl ProfileSet {
    pub fn new(settings: &CartoonSettings) -> Self {
        let q = settings.profile_quality;
        Self {
            coil: Profile::circle(settings.coil_radius, q),
            helix: Profile::ellipse(settings.helix_width, settings.helix_thickness, q),
            sheet: Profile::superellipse(
                settings.sheet_width,
                settings.sheet_thickness,
                settings.sheet_exponent,
                q,
            ),
        }
    }

    pub fn for_class(&self, ss: SecondaryStructure) -> &Profile {
        match ss {
            SecondaryStructure::Coil => &self.coil,
            SecondaryStructure::Helix => &self.helix,
            SecondaryStructure::Sheet => &self.sheet,
        }
    }
}

/// Arrowhead half-width at `distance` residues before the strand end
///
/// Linear from `arrow_width` at the start of the taper to
/// [`MIN_ARROW_WIDTH`] at the tip.
pub fn arrow_half_width(distance: f32, settings: &CartoonSettings) -> f32 {
    let fraction = (distance / settings.arrow_length).clamp(0.0, 1.0);
    (settings.arrow_width * fraction).max(MIN_ARROW_WIDTH)
}

/// Tapered arrowhead profile
pub fn arrow_profile(distance: f32, settings: &CartoonSettings) -> Profile {
    Profile::ellipse(
        arrow_half_width(distance, settings),
        settings.sheet_thickness,
        settings.profile_quality,
    )
}

/// Sheet profile rounded toward an ellipse as it approaches the arrow taper
///
/// `lead` is the distance in residues to the start of the taper.
pub fn rounded_sheet_profile(lead: f32, settings: &CartoonSettings) -> Profile {
    let span = settings.arrow_round_span.max(1e-6);
    let fraction = (lead / span).clamp(0.0, 1.0);
    let exponent = 2.0 + (settings.sheet_exponent - 2.0) * fraction;
    Profile::superellipse(
        settings.sheet_width,
        settings.sheet_thickness,
        exponent,
        settings.profile_quality,
    )
}
