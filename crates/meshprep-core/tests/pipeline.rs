use meshprep::engine::batch::MoleculeOutcome;
use meshprep::engine::cancel::CancellationToken;
use meshprep::engine::config::{
    BatchLayout, NamingConvention, RadiiConfig, ResolveConfigBuilder,
};
use meshprep::engine::error::EngineError;
use meshprep::engine::progress::ProgressReporter;
use meshprep::workflows::{mesh, radii, vdw};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const TABLE: &str = "AMBER General Force Field (GAFF)\n\
                     MASS\n\
                     c1 12.01 0.360\n\
                     \n\
                     MOD4      RE\n\
                     c1 1.908000 0.086000\n\
                     hc 1.487000 0.015700\n\
                     oh 1.721000 0.210400\n\
                     END\n";

const STRUCTURE: &str = "REMARK generated\n\
                         ATOM 1 C1 LIG 1 1.000 2.000 3.000 0.500 1.9080\n";

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn round_trip_writes_exact_match_line() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("gaff.dat");
    let structure = dir.path().join("lig.pqr");
    write(&table, "MOD4 RE\nc1 1.908000 0.086000\nEND\n");
    write(&structure, STRUCTURE);

    let config = ResolveConfigBuilder::new()
        .forcefield_path(table)
        .build()
        .unwrap();
    let job = vdw::VdwJob::new(&structure, dir.path().join("lig.vdw"));
    let summary = vdw::run(&config, &job).unwrap();

    assert_eq!(summary.resolved, 1);
    assert_eq!(
        fs::read_to_string(&job.output_path).unwrap(),
        "C1\tc1\t1.9080\t0.086000\n"
    );
}

#[test]
fn resolution_is_idempotent() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("gaff.dat");
    let structure = dir.path().join("lig.pqr");
    write(&table, TABLE);
    write(
        &structure,
        "ATOM 1 C1 LIG 1 1.000 2.000 3.000 0.500 1.9080\n\
         ATOM 2 H11 LIG 1 1.500-2.000-3.000 0.060 1.4870\n\
         ATOM 3 OH LIG 1 -1.500-2.300-3.100 -0.600 1.7210\n\
         HETATM 4 ZN ION 2 0.000 0.000 0.000 2.000 1.1000\n",
    );

    let config = ResolveConfigBuilder::new()
        .forcefield_path(table)
        .build()
        .unwrap();
    let first = dir.path().join("first.vdw");
    let second = dir.path().join("second.vdw");
    vdw::run(&config, &vdw::VdwJob::new(&structure, &first)).unwrap();
    vdw::run(&config, &vdw::VdwJob::new(&structure, &second)).unwrap();

    let first = fs::read(&first).unwrap();
    assert_eq!(first, fs::read(&second).unwrap());
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "C1\tc1\t1.9080\t0.086000\nH11\thc\t1.4870\t0.015700\nOH\toh\t1.7210\t0.210400\n"
    );
}

#[test]
fn batch_isolates_malformed_topology() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let table = root.join("gaff.dat");
    write(&table, TABLE);

    for mol in ["alpha", "beta", "gamma"] {
        write(&root.join(format!("{mol}/{mol}.pqr")), STRUCTURE);
    }
    let topology = "%FLAG TITLE\n%FORMAT(20a4)\nLIG\n%FLAG AMBER_ATOM_TYPE\n%FORMAT(20a4)\nc1\n%FLAG MASS\n";
    write(&root.join("alpha/alpha.prmtop"), topology);
    write(&root.join("beta/beta.prmtop"), "%FLAG TITLE\nLIG\n");
    write(&root.join("gamma/gamma.prmtop"), topology);

    let config = ResolveConfigBuilder::new()
        .forcefield_path(table)
        .build()
        .unwrap();
    let layout = BatchLayout::new(
        root,
        NamingConvention {
            topology: Some("{mol}/{mol}.prmtop".to_string()),
            ..NamingConvention::default()
        },
    );
    let molecules: Vec<String> = ["alpha", "beta", "gamma"].map(String::from).to_vec();

    let report = vdw::run_batch(
        &config,
        &layout,
        &molecules,
        &ProgressReporter::new(),
        &CancellationToken::new(),
    )
    .unwrap();

    assert_eq!(report.completed(), 2);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        &report.results[1].outcome,
        MoleculeOutcome::Failed(EngineError::Topology { .. })
    ));
    for mol in ["alpha", "gamma"] {
        assert_eq!(
            fs::read_to_string(root.join(format!("{mol}/{mol}.vdw"))).unwrap(),
            "C1\tc1\t1.9080\t0.086000\n"
        );
    }
    assert!(!root.join("beta/beta.vdw").exists());
}

#[test]
fn batch_reports_missing_molecule_files_per_molecule() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("one/test.xyzr"), "0.0 0.0 0.0 1.0\n");

    let layout = BatchLayout::new(root, NamingConvention::default());
    let molecules = vec!["one".to_string(), "two".to_string()];
    let report = radii::run_batch(
        &RadiiConfig::default(),
        &layout,
        &molecules,
        &ProgressReporter::new(),
        &CancellationToken::new(),
    );

    assert_eq!(report.completed(), 1);
    let failures: Vec<&str> = report.failures().map(|(mol, _)| mol).collect();
    assert_eq!(failures, vec!["two"]);
    assert_eq!(
        fs::read_to_string(root.join("one/radii_stern.xyzr")).unwrap(),
        "0.000 0.000 0.000 2.400\n"
    );
}

#[test]
fn mesh_batch_converts_each_surface() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("mol/surf_d02.vert"), "0 0 0\n1 0 0\n0 1 0\n");
    write(&root.join("mol/surf_d02.face"), "1 2 3\n");

    let layout = BatchLayout::new(root, NamingConvention::default());
    let report = mesh::run_batch(
        &layout,
        &["mol".to_string()],
        &ProgressReporter::new(),
        &CancellationToken::new(),
    );

    assert_eq!(report.completed(), 1);
    assert!(root.join("mol/surf_d02.off").exists());
}
