//! ribbon-render: cartoon ribbon geometry for protein chains
//!
//! This crate turns a chain's backbone into a triangulated ribbon surface
//! and keeps that surface updatable per residue:
//!
//! - **Cartoon**: Helices as idealized flat ribbons, strands as arrows,
//!   loops as round tubes, one continuous mesh per chain
//! - **Spheres**: Van der Waals sphere instances, one per atom
//!
//! # Architecture
//!
//! The crate is organized around these key concepts:
//!
//! - [`cartoon`]: The geometry pipeline, from backbone extraction to the swept mesh
//! - [`RibbonMesh`]: Built surface of one chain with its vertex-to-residue map
//! - [`Representation`]: Shared build/recolor/visibility interface
//! - [`MoleculeRep`]: The closed set of representations
//!
//! Nothing here talks to a GPU. Meshes expose plain arrays and
//! [`bytemuck`] byte views for an external renderer to upload.
//!
//! # Example
//!
//! ```rust
//! use lin_alg::f32::Vec3;
//! use ribbon_mol::{MoleculeBuilder, SecondaryStructure};
//! use ribbon_render::{MoleculeRep, RepType, Representation};
//! use ribbon_settings::CartoonSettings;
//!
//! let mut builder = MoleculeBuilder::new("loop");
//! builder.begin_chain("A");
//! for i in 0..6 {
//!     let ca = builder.add_atom("C", Vec3::new(i as f32 * 3.8, 0.0, 0.0));
//!     builder.add_residue("GLY", i + 1, SecondaryStructure::Coil, Some(ca), None);
//! }
//! let molecule = builder.build().unwrap();
//!
//! let mut cartoon = MoleculeRep::new(RepType::Cartoon);
//! cartoon.build(&molecule, &CartoonSettings::default());
//! cartoon.set_colors(&[[0.2, 0.6, 1.0, 1.0]; 6]).unwrap();
//!
//! // Hide the first residue
//! let mut visible = [true; 6];
//! visible[0] = false;
//! cartoon.set_visibility(&visible, None).unwrap();
//! assert!(cartoon.primitive_count() > 0);
//! ```

pub mod cartoon;
mod error;
mod mesh;
mod representation;
mod vertex;

pub use error::{RenderError, RenderResult};
pub use mesh::{RibbonMesh, RingSpan};
pub use representation::{CartoonRep, MoleculeRep, RepType, Representation, SphereRep};
pub use vertex::{MeshVertex, SphereVertex};

pub use cartoon::{build_cartoon, build_chain_mesh, CartoonTrace, ChainMesh, ProfileKind};
