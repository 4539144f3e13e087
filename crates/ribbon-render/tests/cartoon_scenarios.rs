//! End-to-end cartoon builds on synthetic chains

use lin_alg::f32::Vec3;
use ribbon_mol::{AtomIndex, Chain, Molecule, MoleculeBuilder, Residue, SecondaryStructure};
use ribbon_render::cartoon::profile::MIN_ARROW_WIDTH;
use ribbon_render::cartoon::sheet::{plane_normal, sheet_runs};
use ribbon_render::cartoon::spline::compute_tangents;
use ribbon_render::cartoon::trace_chain;
use ribbon_render::{build_cartoon, build_chain_mesh, ProfileKind, RibbonMesh};
use ribbon_settings::CartoonSettings;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const HELIX_RADIUS: f32 = 2.3;

/// Chain whose geometry follows its class string
///
/// Coil residues step 3.8 Å along x, helix residues wind around an x-parallel
/// axis at 100 degrees and 1.5 Å per residue, strand residues zigzag 3.3 Å
/// apart. Coil residues carry flanking atoms.
fn chain_from_classes(classes: &str) -> Molecule {
    let mut builder = MoleculeBuilder::new("synthetic");
    builder.begin_chain("A");

    let mut x = 0.0f32;
    let mut helix_turn = 0usize;
    for (i, c) in classes.chars().enumerate() {
        let ss = SecondaryStructure::from_char(c);
        let position = match ss {
            SecondaryStructure::Coil => {
                x += 3.8;
                Vec3::new(x, 0.2 * (i as f32).sin(), 0.0)
            }
            SecondaryStructure::Helix => {
                x += 1.5;
                let theta = (100.0 * helix_turn as f32).to_radians();
                helix_turn += 1;
                Vec3::new(x, HELIX_RADIUS * theta.cos(), HELIX_RADIUS * theta.sin())
            }
            SecondaryStructure::Sheet => {
                x += 3.3;
                let z = if i % 2 == 0 { 0.9 } else { -0.9 };
                Vec3::new(x, 0.3 * (i as f32 * 0.7).sin(), z)
            }
        };

        let center = builder.add_atom("C", position);
        let flank = if ss.is_coil() {
            let a = builder.add_atom("C", position + Vec3::new(1.2, 0.6, 0.0));
            let b = builder.add_atom("O", position + Vec3::new(0.3, 0.0, 1.1));
            Some([a, b])
        } else {
            None
        };
        builder.add_residue("ALA", i as i32 + 1, ss, Some(center), flank);
    }

    builder.build().unwrap()
}

fn build(classes: &str, settings: &CartoonSettings) -> (Molecule, RibbonMesh) {
    let mol = chain_from_classes(classes);
    let mesh = build_chain_mesh(&mol, 0, settings).unwrap().unwrap();
    (mol, mesh)
}

fn assert_finite(mesh: &RibbonMesh) {
    for p in mesh.positions().iter().chain(mesh.normals().iter()) {
        assert!(p.iter().all(|v| v.is_finite()), "non-finite vertex {:?}", p);
    }
}

fn distance(a: [f32; 3], b: Vec3) -> f32 {
    (Vec3::new(a[0], a[1], a[2]) - b).magnitude()
}

#[test]
fn test_straight_coil_is_a_round_tube() {
    init_logging();
    let settings = CartoonSettings::default();
    let (_, mesh) = build("LLLLLLLLLL", &settings);
    assert_finite(&mesh);

    let body: Vec<_> = mesh.rings().iter().filter(|r| r.kind != ProfileKind::Cap).collect();
    assert_eq!(body.len(), 9 * settings.sampling as usize + 1);

    for ring in &body {
        assert_eq!(ring.kind, ProfileKind::Coil);
        assert!((ring.half_width - settings.coil_radius).abs() < 1e-6);
        for v in ring.vertex_range() {
            let r = distance(mesh.positions()[v], ring.center);
            assert!((r - settings.coil_radius).abs() < 1e-4, "vertex {} off the circle: {}", v, r);
        }
    }

    let caps = mesh.rings().iter().filter(|r| r.kind == ProfileKind::Cap).count();
    assert_eq!(caps, 2);
}

#[test]
fn test_helix_run_is_fitted_once() {
    init_logging();
    let settings = CartoonSettings::default();
    let mol = chain_from_classes("HHHHHHHH");
    let trace = trace_chain(&mol, 0, &settings).unwrap().unwrap();

    assert_eq!(trace.helix_runs.len(), 1);
    let helix = &trace.helix_runs[0];
    assert_eq!((helix.start, helix.end), (0, 7));

    let mean_distance: f32 = trace
        .originals
        .iter()
        .map(|p| helix.distance_from_axis(*p))
        .sum::<f32>()
        / 8.0;
    assert!((helix.radius - mean_distance).abs() < 1e-3);
    assert!((helix.radius - HELIX_RADIUS).abs() < 0.2);

    // Idealized points sit on the fitted helix
    for (i, p) in trace.points.iter().enumerate() {
        assert!((*p - helix.position(i as f32)).magnitude() < 1e-4);
    }

    let mesh = build_chain_mesh(&mol, 0, &settings).unwrap().unwrap();
    assert_finite(&mesh);
    assert!(mesh
        .rings()
        .iter()
        .all(|r| matches!(r.kind, ProfileKind::Helix | ProfileKind::Cap)));
}

#[test]
fn test_arrowhead_tapers_to_the_tip() {
    init_logging();
    let settings = CartoonSettings::default();
    let (_, mesh) = build("LLEEEEEELL", &settings);
    assert_finite(&mesh);

    let arrow: Vec<f32> = mesh
        .rings()
        .iter()
        .filter(|r| r.kind == ProfileKind::Arrow)
        .map(|r| r.half_width)
        .collect();
    assert_eq!(arrow.len(), 2 * settings.sampling as usize + 1);
    for pair in arrow.windows(2) {
        assert!(pair[1] < pair[0], "arrow widths not decreasing: {:?}", arrow);
    }
    assert!((arrow[arrow.len() - 1] - MIN_ARROW_WIDTH).abs() < 1e-6);

    let widest_sheet = mesh
        .rings()
        .iter()
        .filter(|r| r.kind == ProfileKind::Sheet)
        .map(|r| r.half_width)
        .fold(0.0, f32::max);
    assert!((widest_sheet - settings.sheet_width).abs() < 1e-5);
    assert!(arrow.iter().all(|w| *w <= widest_sheet + 1e-6));
}

#[test]
fn test_residue_map_is_ordered() {
    init_logging();
    let classes = "LLHHHHHHLLEEEEELLL";
    let (mol, mesh) = build(classes, &CartoonSettings::default());
    assert_finite(&mesh);

    let residues = mesh.vertex_residues();
    assert_eq!(residues.len(), mesh.vertex_count());
    assert_eq!(residues[0], 0);
    assert_eq!(*residues.last().unwrap() as usize, classes.len() - 1);
    for pair in residues.windows(2) {
        assert!(pair[0] <= pair[1]);
    }

    // Atoms belong to the chain's own residues
    let chain = &mol.chains[0];
    for (v, atom) in mesh.vertex_atoms().iter().enumerate() {
        assert_eq!(chain.residues[residues[v] as usize].center, Some(*atom));
    }
}

#[test]
fn test_hide_and_show_residue() {
    init_logging();
    let (mol, mut mesh) = build("LLLHHHHHHLLL", &CartoonSettings::default());
    let hidden_atom: AtomIndex = mol.chains[0].residues[5].center.unwrap();

    let mut visible = vec![true; mol.atom_count()];
    visible[hidden_atom.as_usize()] = false;
    mesh.set_visibility(&visible, None).unwrap();

    let mut collapsed = 0;
    for ring in mesh.rings() {
        for v in ring.vertex_range() {
            if ring.atom == hidden_atom {
                assert!(distance(mesh.positions()[v], ring.center) < 1e-6);
                collapsed += 1;
            } else {
                assert_eq!(mesh.positions()[v], mesh.rest_positions()[v]);
            }
        }
    }
    assert!(collapsed > 0);
    assert!(mesh.is_visible());

    // Idempotent
    mesh.set_visibility(&visible, None).unwrap();
    visible.fill(true);
    mesh.set_visibility(&visible, None).unwrap();
    assert_eq!(mesh.positions(), mesh.rest_positions());
}

#[test]
fn test_recolor_follows_atoms() {
    init_logging();
    let (mol, mut mesh) = build("LLEEEEELLHHHHHLL", &CartoonSettings::default());

    let colors: Vec<[f32; 4]> = (0..mol.atom_count())
        .map(|i| [i as f32 / mol.atom_count() as f32, 0.5, 0.25, 1.0])
        .collect();
    mesh.set_colors(&colors).unwrap();

    for (v, atom) in mesh.vertex_atoms().iter().enumerate() {
        assert_eq!(mesh.colors()[v], colors[atom.as_usize()]);
    }
    assert_eq!(mesh.vertices()[0].color, colors[mesh.vertex_atoms()[0].as_usize()]);
}

#[test]
fn test_sheet_runs_are_flat() {
    init_logging();
    let classes = "LLEEEEEEELLL";
    let mol = chain_from_classes(classes);
    let trace = trace_chain(&mol, 0, &CartoonSettings::default()).unwrap().unwrap();

    for run in sheet_runs(&trace.classes) {
        let points = &trace.points[run.start..=run.end];
        let normal = plane_normal(points).unwrap();
        let mut sum = Vec3::new(0.0, 0.0, 0.0);
        for p in points {
            sum = sum + *p;
        }
        let centroid = sum / points.len() as f32;
        for p in points {
            assert!((*p - centroid).dot(normal).abs() < 1e-3);
        }
    }
}

#[test]
fn test_guide_normals_are_unit_orthogonal_and_consistent() {
    init_logging();
    let mol = chain_from_classes("LLLHHHHHHHHLLEEEEEELLHHHHLL");
    let trace = trace_chain(&mol, 0, &CartoonSettings::default()).unwrap().unwrap();
    let tangents = compute_tangents(&trace.points);

    for (i, n) in trace.normals.iter().enumerate() {
        assert!((n.magnitude() - 1.0).abs() < 1e-4);
        assert!(n.dot(tangents[i]).abs() < 1e-4);
        if i > 0 {
            assert!(n.dot(trace.normals[i - 1]) >= 0.0);
        }
    }
}

#[test]
fn test_multi_chain_build() {
    init_logging();
    let mut builder = MoleculeBuilder::new("dimer");
    for (c, id) in ["A", "B"].iter().enumerate() {
        builder.begin_chain(*id);
        for i in 0..6 {
            let ca = builder.add_atom("C", Vec3::new(i as f32 * 3.8, c as f32 * 15.0, 0.0));
            builder.add_residue("GLY", i + 1, SecondaryStructure::Coil, Some(ca), None);
        }
    }
    let mol = builder.build().unwrap();

    let meshes = build_cartoon(&mol, &CartoonSettings::default());
    assert_eq!(meshes.len(), 2);
    assert_eq!(meshes[0].chain_id, "A");
    assert_eq!(meshes[1].chain_id, "B");
    // Chain B only references its own atoms
    assert!(meshes[1].mesh.vertex_atoms().iter().all(|a| a.0 >= 6));
}

#[test]
fn test_broken_chain_does_not_stop_the_others() {
    init_logging();
    let mut mol = chain_from_classes("LLLLLL");
    let mut broken = Chain::new("B");
    for i in 0..4 {
        broken
            .residues
            .push(Residue::new("ALA", i + 1, SecondaryStructure::Coil).with_center(AtomIndex(99)));
    }
    mol.chains.push(broken);

    assert!(build_chain_mesh(&mol, 1, &CartoonSettings::default()).is_err());

    let meshes = build_cartoon(&mol, &CartoonSettings::default());
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].chain_id, "A");
    assert_eq!(meshes[0].chain_index, 0);
}

#[test]
fn test_end_caps_follow_terminal_residues() {
    init_logging();
    let (mol, mut mesh) = build("LLLHHHHHHLLL", &CartoonSettings::default());
    let residues = &mol.chains[0].residues;
    let first_atom = residues[0].center.unwrap();
    let last_atom = residues[residues.len() - 1].center.unwrap();

    let start_cap = mesh.rings()[0].clone();
    let end_cap = mesh.rings()[mesh.rings().len() - 1].clone();
    assert_eq!(start_cap.kind, ProfileKind::Cap);
    assert_eq!(end_cap.kind, ProfileKind::Cap);
    assert_eq!(start_cap.atom, first_atom);
    assert_eq!(end_cap.atom, last_atom);

    let mut visible = vec![true; mol.atom_count()];
    visible[first_atom.as_usize()] = false;
    mesh.set_visibility(&visible, None).unwrap();

    for v in start_cap.vertex_range() {
        assert!(distance(mesh.positions()[v], start_cap.center) < 1e-6);
    }
    for ring in mesh.rings().iter().filter(|r| r.atom != first_atom) {
        for v in ring.vertex_range() {
            assert_eq!(mesh.positions()[v], mesh.rest_positions()[v]);
        }
    }

    visible.fill(true);
    visible[last_atom.as_usize()] = false;
    mesh.set_visibility(&visible, None).unwrap();
    for v in end_cap.vertex_range() {
        assert!(distance(mesh.positions()[v], end_cap.center) < 1e-6);
    }
    for v in start_cap.vertex_range() {
        assert_eq!(mesh.positions()[v], mesh.rest_positions()[v]);
    }
}

/// Chain of `classes` with every residue at the same point
fn coincident_chain(classes: &str) -> Molecule {
    let mut builder = MoleculeBuilder::new("coincident");
    builder.begin_chain("A");
    for (i, c) in classes.chars().enumerate() {
        let ca = builder.add_atom("C", Vec3::new(1.0, 2.0, 3.0));
        builder.add_residue("ALA", i as i32 + 1, SecondaryStructure::from_char(c), Some(ca), None);
    }
    builder.build().unwrap()
}

#[test]
fn test_degenerate_geometry_stays_finite() {
    init_logging();
    let settings = CartoonSettings::default();

    let mut molecules: Vec<Molecule> = ["LLLL", "HHHH", "EEEE"].iter().map(|c| coincident_chain(c)).collect();

    // Straight line labelled as a helix
    let mut builder = MoleculeBuilder::new("collinear");
    builder.begin_chain("A");
    for i in 0..6 {
        let ca = builder.add_atom("C", Vec3::new(i as f32 * 1.5, 0.0, 0.0));
        builder.add_residue("ALA", i + 1, SecondaryStructure::Helix, Some(ca), None);
    }
    molecules.push(builder.build().unwrap());

    for mol in &molecules {
        let mesh = build_chain_mesh(mol, 0, &settings).unwrap().unwrap();
        assert!(mesh.triangle_count() > 0);
        assert_finite(&mesh);

        let trace = trace_chain(mol, 0, &settings).unwrap().unwrap();
        for n in &trace.normals {
            assert!((n.magnitude() - 1.0).abs() < 1e-4);
        }
    }
}
