//! Class-aware control point smoothing
//!
//! Coil and sheet points are averaged with their immediate neighbours, but
//! only when both neighbours share the point's class. Helix points are left
//! alone since idealization replaces them entirely.

use lin_alg::f32::Vec3;
use ribbon_mol::SecondaryStructure;
use ribbon_settings::CartoonSettings;

/// Smooth coil and sheet points in place
pub fn smooth_control_points(
    points: &mut [Vec3],
    classes: &[SecondaryStructure],
    settings: &CartoonSettings,
) {
    smooth_class(
        points,
        classes,
        SecondaryStructure::Coil,
        settings.coil_smooth_cycles,
        settings.coil_smooth_weight,
    );
    smooth_class(
        points,
        classes,
        SecondaryStructure::Sheet,
        settings.sheet_smooth_cycles,
        settings.sheet_smooth_weight,
    );
}

/// Blend every `class` point toward the mean of its two neighbours
///
/// Each cycle reads only the previous cycle's positions.
pub fn smooth_class(
    points: &mut [Vec3],
    classes: &[SecondaryStructure],
    class: SecondaryStructure,
    cycles: u32,
    weight: f32,
) {
    let len = points.len().min(classes.len());
    if len < 3 || cycles == 0 || weight <= 0.0 {
        return;
    }

    let mut previous = points[..len].to_vec();
    for _ in 0..cycles {
        previous.copy_from_slice(&points[..len]);

        for i in 1..(len - 1) {
            if classes[i] != class || classes[i - 1] != class || classes[i + 1] != class {
                continue;
            }
            let mean = (previous[i - 1] + previous[i + 1]) * 0.5;
            points[i] = previous[i] * (1.0 - weight) + mean * weight;
        }
    }
}
