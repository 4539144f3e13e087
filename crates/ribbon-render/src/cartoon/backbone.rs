//! Backbone trace extraction for the cartoon representation
//!
//! Collects one guide point per residue that has a central backbone atom,
//! carrying its class and the positions of its flanking backbone atoms.
//! Residues without a central atom are skipped rather than interpolated.

use lin_alg::f32::Vec3;
use ribbon_mol::{AtomIndex, MolError, MolResult, Molecule, SecondaryStructure};

/// A guide point for cartoon rendering
///
/// `position` is mutated by the smoothing stages; `original` keeps the
/// atom position so later stages can read the displacement.
#[derive(Debug, Clone)]
pub struct GuidePoint {
    /// Current (smoothed/idealized) position
    pub position: Vec3,
    /// Central atom position before any smoothing
    pub original: Vec3,
    /// Secondary structure class
    pub ss: SecondaryStructure,
    /// Flanking backbone atom positions, if the residue has them
    pub flank: Option<[Vec3; 2]>,
    /// Index of the residue within its chain
    pub residue: usize,
    /// Central backbone atom
    pub atom: AtomIndex,
}

impl GuidePoint {
    pub fn new(
        position: Vec3,
        ss: SecondaryStructure,
        flank: Option<[Vec3; 2]>,
        residue: usize,
        atom: AtomIndex,
    ) -> Self {
        Self {
            position,
            original: position,
            ss,
            flank,
            residue,
            atom,
        }
    }
}

/// The ordered guide points of one chain
#[derive(Debug, Clone)]
pub struct BackboneSegment {
    /// Chain identifier
    pub chain_id: String,
    /// Guide points in backbone order
    pub guide_points: Vec<GuidePoint>,
}

impl BackboneSegment {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            guide_points: Vec::new(),
        }
    }

    pub fn push(&mut self, point: GuidePoint) {
        self.guide_points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.guide_points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.guide_points.len()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.guide_points.iter().map(|g| g.position).collect()
    }

    pub fn classes(&self) -> Vec<SecondaryStructure> {
        self.guide_points.iter().map(|g| g.ss).collect()
    }
}

/// Extract the guide points of one chain
///
/// Fails only when a residue references an atom outside the atom array.
pub fn extract_backbone(molecule: &Molecule, chain_index: usize) -> MolResult<BackboneSegment> {
    let Some(chain) = molecule.chains.get(chain_index) else {
        return Ok(BackboneSegment::new(""));
    };

    let mut segment = BackboneSegment::new(chain.id.as_str());
    let position_of = |residue: usize, index: AtomIndex| -> MolResult<Vec3> {
        molecule
            .position(index)
            .ok_or_else(|| MolError::AtomIndexOutOfBounds {
                chain: chain.id.clone(),
                residue,
                index: index.0,
                max: molecule.atom_count(),
            })
    };

    for (residue_idx, residue) in chain.residues.iter().enumerate() {
        let Some(center) = residue.center else {
            continue;
        };
        let position = position_of(residue_idx, center)?;

        let flank = match residue.flank {
            Some([a, b]) => Some([position_of(residue_idx, a)?, position_of(residue_idx, b)?]),
            None => None,
        };

        segment.push(GuidePoint::new(position, residue.ss, flank, residue_idx, center));
    }

    Ok(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ribbon_mol::MoleculeBuilder;

    #[test]
    fn test_extract_skips_residues_without_center() {
        let mut builder = MoleculeBuilder::new("gap");
        builder.begin_chain("A");
        for i in 0..4 {
            let ca = builder.add_atom("C", Vec3::new(i as f32 * 3.8, 0.0, 0.0));
            let center = if i == 2 { None } else { Some(ca) };
            builder.add_residue("ALA", i + 1, SecondaryStructure::Coil, center, None);
        }
        let mol = builder.build().unwrap();

        let segment = extract_backbone(&mol, 0).unwrap();
        assert_eq!(segment.len(), 3);
        let residues: Vec<usize> = segment.guide_points.iter().map(|g| g.residue).collect();
        assert_eq!(residues, vec![0, 1, 3]);
        assert!((segment.guide_points[2].position.x - 11.4).abs() < 1e-5);
    }

    #[test]
    fn test_extract_reads_flank_positions() {
        let mut builder = MoleculeBuilder::new("flank");
        builder.begin_chain("A");
        let ca = builder.add_atom("C", Vec3::new(0.0, 0.0, 0.0));
        let c = builder.add_atom("C", Vec3::new(1.0, 0.0, 0.0));
        let o = builder.add_atom("O", Vec3::new(1.0, 1.0, 0.0));
        builder.add_residue("GLY", 1, SecondaryStructure::Sheet, Some(ca), Some([c, o]));
        let mol = builder.build().unwrap();

        let segment = extract_backbone(&mol, 0).unwrap();
        let flank = segment.guide_points[0].flank.unwrap();
        assert!((flank[1].y - 1.0).abs() < 1e-6);
        assert_eq!(segment.classes(), vec![SecondaryStructure::Sheet]);
    }

    #[test]
    fn test_extract_rejects_dangling_reference() {
        let mut mol = Molecule::new("broken");
        let mut chain = ribbon_mol::Chain::new("A");
        chain.residues.push(
            ribbon_mol::Residue::new("GLY", 1, SecondaryStructure::Coil).with_center(AtomIndex(9)),
        );
        mol.chains.push(chain);

        assert!(matches!(
            extract_backbone(&mol, 0),
            Err(MolError::AtomIndexOutOfBounds { index: 9, .. })
        ));
    }
}
