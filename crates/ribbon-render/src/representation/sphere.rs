//! Sphere representation for van der Waals sphere visualization
//!
//! One impostor instance per atom. Geometry is a per-instance transform
//! only; the renderer expands each instance into a billboard.

use ribbon_mol::Molecule;
use ribbon_settings::CartoonSettings;

use crate::cartoon::utils::to_array;
use crate::error::{check_attribute_len, RenderResult};
use crate::representation::Representation;
use crate::vertex::SphereVertex;

const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Sphere representation for atoms
///
/// Instance `i` belongs to atom `i`. Hidden atoms keep their instance
/// with a zero radius so indices stay stable across visibility changes.
#[derive(Debug, Clone)]
pub struct SphereRep {
    instances: Vec<SphereVertex>,
    /// Van der Waals radius per atom, before any scaling
    base_radii: Vec<f32>,
    dirty: bool,
    /// Sphere scale factor
    sphere_scale: f32,
}

impl SphereRep {
    /// Create a new sphere representation
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            base_radii: Vec::new(),
            dirty: true,
            sphere_scale: 1.0,
        }
    }

    /// Set the sphere scale factor, applied on the next build or visibility update
    pub fn set_scale(&mut self, scale: f32) {
        self.sphere_scale = scale;
    }

    pub fn instances(&self) -> &[SphereVertex] {
        &self.instances
    }

    pub fn instance_bytes(&self) -> &[u8] {
        SphereVertex::as_bytes(&self.instances)
    }
}

impl Default for SphereRep {
    fn default() -> Self {
        Self::new()
    }
}

impl Representation for SphereRep {
    /// Cartoon settings do not apply to spheres
    fn build(&mut self, molecule: &Molecule, _settings: &CartoonSettings) {
        self.instances.clear();
        self.base_radii.clear();

        for atom in &molecule.atoms {
            let radius = atom.vdw_radius();
            self.base_radii.push(radius);
            self.instances.push(SphereVertex {
                center: to_array(atom.position),
                radius: radius * self.sphere_scale,
                color: DEFAULT_COLOR,
            });
        }

        self.dirty = false;
    }

    fn set_colors(&mut self, atom_colors: &[[f32; 4]]) -> RenderResult<()> {
        check_attribute_len("color", atom_colors.len(), self.instances.len())?;
        for (instance, color) in self.instances.iter_mut().zip(atom_colors.iter()) {
            instance.color = *color;
        }
        Ok(())
    }

    fn set_visibility(&mut self, atom_visible: &[bool], scale: Option<&[f32]>) -> RenderResult<()> {
        check_attribute_len("visibility", atom_visible.len(), self.instances.len())?;
        if let Some(scale) = scale {
            check_attribute_len("scale", scale.len(), self.instances.len())?;
        }

        for (i, instance) in self.instances.iter_mut().enumerate() {
            instance.radius = if atom_visible[i] {
                let multiplier = scale.map_or(1.0, |s| s[i]);
                self.base_radii[i] * self.sphere_scale * multiplier
            } else {
                0.0
            };
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.instances = Vec::new();
        self.base_radii = Vec::new();
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn set_dirty(&mut self) {
        self.dirty = true;
    }

    fn primitive_count(&self) -> usize {
        self.instances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lin_alg::f32::Vec3;
    use ribbon_mol::MoleculeBuilder;

    fn water() -> Molecule {
        let mut builder = MoleculeBuilder::new("water");
        builder.add_atom("O", Vec3::new(0.0, 0.0, 0.0));
        builder.add_atom("H", Vec3::new(0.96, 0.0, 0.0));
        builder.add_atom("H", Vec3::new(-0.24, 0.93, 0.0));
        builder.build().unwrap()
    }

    #[test]
    fn test_sphere_rep_new() {
        let rep = SphereRep::new();
        assert!(rep.is_dirty());
        assert!(rep.is_empty());
    }

    #[test]
    fn test_build_uses_vdw_radius_and_scale() {
        let mut rep = SphereRep::new();
        rep.set_scale(0.5);
        rep.build(&water(), &CartoonSettings::default());

        assert_eq!(rep.primitive_count(), 3);
        assert!((rep.instances()[0].radius - 1.52 * 0.5).abs() < 1e-6);
        assert!((rep.instances()[1].radius - 1.2 * 0.5).abs() < 1e-6);
        assert_eq!(rep.instances()[1].center, [0.96, 0.0, 0.0]);
        assert_eq!(rep.instance_bytes().len(), 3 * 32);
    }

    #[test]
    fn test_build_ignores_cartoon_settings() {
        let mut rep = SphereRep::new();
        let invalid = CartoonSettings {
            coil_radius: -1.0,
            sampling: 0,
            ..Default::default()
        };
        rep.build(&water(), &invalid);
        assert_eq!(rep.primitive_count(), 3);
        assert!((rep.instances()[0].radius - 1.52).abs() < 1e-6);
        assert!(!rep.is_dirty());
    }

    #[test]
    fn test_visibility_and_scale() {
        let mut rep = SphereRep::new();
        rep.build(&water(), &CartoonSettings::default());

        rep.set_visibility(&[true, false, true], Some(&[2.0, 1.0, 1.0])).unwrap();
        assert!((rep.instances()[0].radius - 3.04).abs() < 1e-5);
        assert_eq!(rep.instances()[1].radius, 0.0);
        assert!((rep.instances()[2].radius - 1.2).abs() < 1e-6);

        rep.set_visibility(&[true; 3], None).unwrap();
        assert!((rep.instances()[0].radius - 1.52).abs() < 1e-6);
    }

    #[test]
    fn test_colors() {
        let mut rep = SphereRep::new();
        rep.build(&water(), &CartoonSettings::default());
        assert!(rep.set_colors(&[[1.0, 0.0, 0.0, 1.0]]).is_err());

        let colors = [[1.0, 0.0, 0.0, 1.0], [0.9, 0.9, 0.9, 1.0], [0.9, 0.9, 0.9, 1.0]];
        rep.set_colors(&colors).unwrap();
        assert_eq!(rep.instances()[0].color, colors[0]);
        assert_eq!(rep.instances()[2].color, colors[2]);
    }
}
