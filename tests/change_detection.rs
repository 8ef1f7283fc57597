mod common;
use crate::common::{Project, init_tracing};

use std::error::Error;
use std::path::Path;

use reqwatch::detect::{ChangeDetector, Fingerprint, SnapshotLayout, environment_key};
use reqwatch::errors::ReqwatchError;
use reqwatch::fs::RealFileSystem;
use reqwatch::types::{DetectorSettings, HashAlgorithm};

type TestResult = Result<(), Box<dyn Error>>;

fn sha256_settings() -> DetectorSettings {
    DetectorSettings {
        algorithm: HashAlgorithm::Sha256,
        ..DetectorSettings::default()
    }
}

#[test]
fn missing_requirements_file_is_invalid_input() {
    init_tracing();

    let detector = ChangeDetector::new(&RealFileSystem, DetectorSettings::default());
    let missing = Path::new("nonexisting/requirements.txt");

    match detector.has_changed(missing, missing) {
        Err(ReqwatchError::MissingRequirementsFile(path)) => assert_eq!(path, missing),
        other => panic!("expected MissingRequirementsFile, got {other:?}"),
    }
}

#[test]
fn first_run_creates_work_dir_and_snapshot() -> TestResult {
    init_tracing();

    let project = Project::new()?;
    let req = project.write_file("requirements.txt", "pytest\nflake8\n")?;
    let snapshot = project.path(".tox/requirements.txt.key.previous");
    assert!(!project.path(".tox").exists());

    let detector = ChangeDetector::new(&RealFileSystem, sha256_settings());
    assert!(!detector.has_changed(&req, &snapshot)?);

    assert_eq!(
        project.read_file(".tox/requirements.txt.key.previous")?,
        "d6c41391f0f0983988c8d5625863625aaaecddcd0ea129d6f854ea344450afd2"
    );
    Ok(())
}

#[test]
fn requirements_are_compared_after_normalization() -> TestResult {
    init_tracing();

    let project = Project::new()?;
    let req = project.write_file("req1/requirements.txt", "pytest-xdist==1.13.0\npep8\n")?;
    let work_dir = project.path(".tox");
    let env_dir = project.path(".tox/python");
    let layout = SnapshotLayout::new(&work_dir, HashAlgorithm::Sha256).with_root(project.root());
    let snapshot = layout.path_for(&req, &env_dir);
    let detector = ChangeDetector::new(&RealFileSystem, sha256_settings());

    detector.has_changed(&req, &snapshot)?;

    project.write_file(
        "req1/requirements.txt",
        "pep8\npytest-xdist==1.13.0\n# ^ dependency for testing\n",
    )?;
    assert!(!detector.has_changed(&req, &snapshot)?);

    let previous = project.files_with_suffix(".tox", ".previous")?;
    let key = environment_key(HashAlgorithm::Sha256, &env_dir);
    assert_eq!(previous, vec![format!("req1-requirements.txt.{key}.previous")]);
    assert_eq!(
        project.read_file(Path::new(".tox").join(&previous[0]))?,
        "958a082b65ad7bce2d62e1ddc8d0a812c7fa110b529f20188b7108c8bde94645"
    );
    Ok(())
}

#[test]
fn version_change_is_detected_once() -> TestResult {
    init_tracing();

    let project = Project::new()?;
    let req = project.write_file("req1/requirements.txt", "pytest-xdist==1.13.0\n")?;
    let snapshot = project.path(".tox/req1-requirements.txt.key.previous");
    let detector = ChangeDetector::new(&RealFileSystem, sha256_settings());

    assert!(!detector.has_changed(&req, &snapshot)?);

    project.write_file("req1/requirements.txt", "pytest-xdist==1.13.1\n")?;
    assert!(detector.has_changed(&req, &snapshot)?);
    assert_eq!(
        project.read_file(".tox/req1-requirements.txt.key.previous")?,
        "72899a6842787792321f50eaea8d40699500ce6bff553ff7964c3bbea40f5966"
    );

    assert!(!detector.has_changed(&req, &snapshot)?);
    Ok(())
}

#[test]
fn snapshot_from_another_algorithm_counts_as_change() -> TestResult {
    init_tracing();

    let project = Project::new()?;
    let req = project.write_file("requirements.txt", "click\n")?;
    let snapshot = project.path(".tox/requirements.txt.key.previous");

    ChangeDetector::new(&RealFileSystem, sha256_settings()).has_changed(&req, &snapshot)?;
    let blake3 = ChangeDetector::new(&RealFileSystem, DetectorSettings::default());
    assert!(blake3.has_changed(&req, &snapshot)?);
    assert_eq!(
        project.read_file(".tox/requirements.txt.key.previous")?,
        Fingerprint::of_content(HashAlgorithm::Blake3, "click\n").as_str()
    );
    Ok(())
}
