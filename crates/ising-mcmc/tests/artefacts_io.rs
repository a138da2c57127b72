use ising_mcmc::metrics::CSV_HEADER;
use ising_mcmc::{run_config, RunConfig, RunManifest, RunSummary};
use tempfile::tempdir;

fn small_config() -> RunConfig {
    RunConfig::from_yaml_str(
        r#"
lattice_size: 4
attempts:
  type: fixed
  attempts: 64
schedule:
  type: manual
  temperatures: [2.5, 1.5]
seed_policy:
  master_seed: 11
  label: smoke
"#,
    )
    .unwrap()
}

#[test]
fn run_writes_csv_summary_and_manifest() {
    let dir = tempdir().unwrap();
    let mut config = small_config();
    config.output.run_directory = Some(dir.path().join("run"));
    let summary = run_config(&config).unwrap();

    let csv_path = summary.observables_path.clone().unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2.5,"));
    assert!(lines[2].starts_with("1.5,"));

    let stored: RunSummary = serde_json::from_str(
        &std::fs::read_to_string(summary.summary_path.clone().unwrap()).unwrap(),
    )
    .unwrap();
    assert_eq!(stored.temperatures(), vec![2.5, 1.5]);
    assert_eq!(stored.final_lattice_hash, summary.final_lattice_hash);
    assert_eq!(stored.manifest_path, summary.manifest_path);

    let manifest = RunManifest::load(summary.manifest_path.as_ref().unwrap()).unwrap();
    assert_eq!(manifest.config, config);
    assert_eq!(manifest.provenance.seed, 11);
    assert_ne!(manifest.provenance.lattice_seed, manifest.provenance.dynamics_seed);
    assert_eq!(manifest.seed_label.as_deref(), Some("smoke"));
    assert_eq!(manifest.final_lattice_hash, summary.final_lattice_hash);
    assert_eq!(manifest.config_hash.len(), 64);
    assert_eq!(
        manifest.observables_file.as_deref(),
        Some(std::path::Path::new("observables.csv"))
    );
    assert!(manifest.elapsed_seconds >= 0.0);
}

#[test]
fn output_does_not_change_results() {
    let dir = tempdir().unwrap();
    let plain = run_config(&small_config()).unwrap();
    let mut config = small_config();
    config.output.run_directory = Some(dir.path().to_path_buf());
    let written = run_config(&config).unwrap();
    assert_eq!(plain.samples, written.samples);
    assert_eq!(plain.final_lattice_hash, written.final_lattice_hash);
}

#[test]
fn missing_config_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = RunConfig::load(&path).unwrap_err();
    assert_eq!(err.info().code, "config-read");
    assert!(err.info().context["path"].ends_with("absent.yaml"));
}
