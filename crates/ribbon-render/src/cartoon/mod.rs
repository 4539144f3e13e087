//! Cartoon representation for protein secondary structure visualization
//!
//! Renders each chain's backbone as one continuous swept surface:
//! - Alpha helices as flattened elliptical ribbons on an idealized screw
//! - Beta sheets as flat strands ending in an arrowhead
//! - Loops and coils as round tubes
//!
//! # Architecture
//!
//! The cartoon representation is built in several stages per chain:
//! 1. **Backbone extraction**: One control point per residue with a central atom
//! 2. **Smoothing**: Class-aware neighbour averaging of coil and sheet points
//! 3. **Helix idealization**: Fit and replace helix runs with an exact helix
//! 4. **Sheet flattening**: Project strands onto their best-fit plane
//! 5. **Tip refinement**: Straighten the last residues before each arrowhead
//! 6. **Guide normals**: One sign-consistent "up" vector per control point
//! 7. **Extrusion**: Sweep cross-section profiles along the sampled curve
//!
//! Chains are independent and are built in parallel.
//!
//! # Example
//!
//! ```rust
//! use lin_alg::f32::Vec3;
//! use ribbon_mol::{MoleculeBuilder, SecondaryStructure};
//! use ribbon_render::cartoon::build_cartoon;
//! use ribbon_settings::CartoonSettings;
//!
//! let mut builder = MoleculeBuilder::new("loop");
//! builder.begin_chain("A");
//! for i in 0..5 {
//!     let ca = builder.add_atom("C", Vec3::new(i as f32 * 3.8, 0.0, 0.0));
//!     builder.add_residue("GLY", i + 1, SecondaryStructure::Coil, Some(ca), None);
//! }
//! let molecule = builder.build().unwrap();
//!
//! let meshes = build_cartoon(&molecule, &CartoonSettings::default());
//! assert_eq!(meshes.len(), 1);
//! assert!(meshes[0].mesh.triangle_count() > 0);
//! ```

pub mod backbone;
pub mod builder;
pub mod frame;
pub mod helix;
pub mod normals;
pub mod profile;
pub mod sheet;
pub mod smooth;
pub mod spline;
pub mod utils;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use lin_alg::f32::Vec3;
use rayon::prelude::*;
use ribbon_mol::{AtomIndex, MolResult, Molecule, SecondaryStructure};
use ribbon_settings::CartoonSettings;

use crate::error::{RenderError, RenderResult};
use crate::mesh::RibbonMesh;

use self::backbone::extract_backbone;
use self::builder::build_mesh;
use self::helix::idealize_helices;
use self::normals::{build_guide_normals, NormalInputs};
use self::sheet::{flatten_sheets, refine_tips};
use self::smooth::smooth_control_points;

pub use self::helix::HelixRun;
pub use self::profile::{Profile, ProfileKind};

/// One chain's control points after every smoothing stage
///
/// All vectors are indexed by control point.
#[derive(Debug, Clone)]
pub struct CartoonTrace {
    pub chain_id: String,
    /// Residue index within the chain
    pub residues: Vec<usize>,
    /// Central backbone atom of each residue
    pub atoms: Vec<AtomIndex>,
    /// Smoothed, idealized and flattened positions
    pub points: Vec<Vec3>,
    /// Central atom positions before any stage moved them
    pub originals: Vec<Vec3>,
    pub classes: Vec<SecondaryStructure>,
    /// Fitted helix runs, in chain order
    pub helix_runs: Vec<HelixRun>,
    /// Unit guide normals
    pub normals: Vec<Vec3>,
}

impl CartoonTrace {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Run every stage up to the guide normals for one chain
///
/// Returns `Ok(None)` when the chain has fewer than 2 control points or
/// the index is out of range.
pub fn trace_chain(
    molecule: &Molecule,
    chain_index: usize,
    settings: &CartoonSettings,
) -> MolResult<Option<CartoonTrace>> {
    let segment = extract_backbone(molecule, chain_index)?;
    if segment.len() < 2 {
        log::debug!(
            "Chain '{}': {} control points, nothing to build",
            segment.chain_id,
            segment.len()
        );
        return Ok(None);
    }

    let originals = segment.positions();
    let classes = segment.classes();
    let mut points = originals.clone();

    smooth_control_points(&mut points, &classes, settings);

    let helix_runs = if settings.idealize_helices {
        idealize_helices(&mut points, &classes, settings.min_helix_length as usize)
    } else {
        Vec::new()
    };

    if settings.flatten_sheets {
        flatten_sheets(&mut points, &classes, settings.flat_cycles);
    }
    if settings.refine_tips {
        refine_tips(&mut points, &classes, settings);
    }

    let flanks: Vec<Option<[Vec3; 2]>> = segment.guide_points.iter().map(|g| g.flank).collect();
    let normals = build_guide_normals(&NormalInputs {
        points: &points,
        originals: &originals,
        classes: &classes,
        flanks: &flanks,
    });

    Ok(Some(CartoonTrace {
        residues: segment.guide_points.iter().map(|g| g.residue).collect(),
        atoms: segment.guide_points.iter().map(|g| g.atom).collect(),
        chain_id: segment.chain_id,
        points,
        originals,
        classes,
        helix_runs,
        normals,
    }))
}

/// Build the ribbon mesh of one chain
///
/// `Ok(None)` when the chain has fewer than 2 control points.
pub fn build_chain_mesh(
    molecule: &Molecule,
    chain_index: usize,
    settings: &CartoonSettings,
) -> RenderResult<Option<RibbonMesh>> {
    settings.validate()?;
    if chain_index >= molecule.chain_count() {
        return Err(RenderError::ChainIndexOutOfBounds {
            index: chain_index,
            count: molecule.chain_count(),
        });
    }

    let Some(trace) = trace_chain(molecule, chain_index, settings)? else {
        return Ok(None);
    };
    Ok(Some(build_mesh(&trace, settings)))
}

/// A built chain mesh and the chain it belongs to
#[derive(Debug, Clone)]
pub struct ChainMesh {
    pub chain_index: usize,
    pub chain_id: String,
    pub mesh: RibbonMesh,
}

/// Build every chain of `molecule`
///
/// Chains that fail or panic are logged and skipped; the rest are returned
/// in chain order. Chains without enough control points contribute nothing.
pub fn build_cartoon(molecule: &Molecule, settings: &CartoonSettings) -> Vec<ChainMesh> {
    if let Err(e) = settings.validate() {
        log::warn!("Cartoon settings rejected: {}", e);
        return Vec::new();
    }

    build_chains_isolated(molecule.chain_count(), |chain_index| {
        build_chain_mesh(molecule, chain_index, settings)
    })
}

/// Run `build` for every chain index in parallel, containing each chain's errors and panics
fn build_chains_isolated<F>(chain_count: usize, build: F) -> Vec<ChainMesh>
where
    F: Fn(usize) -> RenderResult<Option<RibbonMesh>> + Sync,
{
    (0..chain_count)
        .into_par_iter()
        .filter_map(|chain_index| {
            match panic::catch_unwind(AssertUnwindSafe(|| build(chain_index))) {
                Ok(Ok(Some(mesh))) => Some(ChainMesh {
                    chain_index,
                    chain_id: mesh.chain_id().to_string(),
                    mesh,
                }),
                Ok(Ok(None)) => None,
                Ok(Err(e)) => {
                    log::warn!("Skipping cartoon for chain {}: {}", chain_index, e);
                    None
                }
                Err(payload) => {
                    log::warn!(
                        "Skipping cartoon for chain {}: build panicked: {}",
                        chain_index,
                        panic_message(payload.as_ref())
                    );
                    None
                }
            }
        })
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
