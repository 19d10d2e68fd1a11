use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn ezextractor(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ezextractor").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn workspace_with_pdfs(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input");
    fs::create_dir(&input).unwrap();
    for (name, content) in files {
        fs::write(input.join(name), content).unwrap();
    }
    temp_dir
}

#[test]
fn missing_input_directory_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    ezextractor(temp_dir.path())
        .args(["--anchor", "Total:", "--no-preview"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!temp_dir.path().join("output").exists());
}

#[test]
fn input_directory_without_pdfs_exits_with_error() {
    let temp_dir = workspace_with_pdfs(&[("notes.txt", "hello")]);

    ezextractor(temp_dir.path())
        .args(["--anchor", "Total:"])
        .assert()
        .code(1);

    assert!(!temp_dir.path().join("output").join("output.json").exists());
}

#[test]
fn generate_config_writes_sample() {
    let temp_dir = TempDir::new().unwrap();

    ezextractor(temp_dir.path())
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("ezextractor.toml"));

    let content = fs::read_to_string(temp_dir.path().join("ezextractor.toml")).unwrap();
    assert!(content.contains("[input]"));
    assert!(content.contains("max_length = 6"));
}

#[test]
fn invalid_parameters_exit_before_reading_files() {
    let temp_dir = workspace_with_pdfs(&[("a.pdf", "not a pdf")]);

    ezextractor(temp_dir.path())
        .args(["--anchor", "Ref", "--characters", "custom"])
        .assert()
        .code(1);

    assert!(!temp_dir.path().join("output").exists());
}

#[test]
fn max_length_above_limit_is_rejected() {
    let temp_dir = workspace_with_pdfs(&[("a.pdf", "not a pdf")]);

    ezextractor(temp_dir.path())
        .args(["--anchor", "Total:", "--max-length", "5000", "--no-preview"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot exceed 1000"));

    assert!(!temp_dir.path().join("output").exists());
}

#[test]
fn corrupt_pdf_is_recorded_as_error_entry() {
    let temp_dir = workspace_with_pdfs(&[("broken.pdf", "this is not a pdf document")]);

    ezextractor(temp_dir.path())
        .args(["--anchor", "Total:", "--no-preview", "-q"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("output").join("output.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let entry = json["broken.pdf"].as_str().unwrap();
    assert!(entry.starts_with("Error:"), "unexpected entry: {}", entry);
}

#[test]
fn output_flag_overrides_destination() {
    let temp_dir = workspace_with_pdfs(&[("a.pdf", "garbage")]);

    ezextractor(temp_dir.path())
        .args(["--anchor", "Total:", "-q", "--output", "results/values.json"])
        .assert()
        .success();

    assert!(temp_dir.path().join("results").join("values.json").exists());
    assert!(!temp_dir.path().join("output").exists());
}

#[test]
fn identical_runs_produce_identical_output() {
    let temp_dir = workspace_with_pdfs(&[
        ("a.pdf", "first broken file"),
        ("b.pdf", "second broken file"),
    ]);
    let output_file = temp_dir.path().join("output").join("output.json");

    ezextractor(temp_dir.path())
        .args(["--anchor", "Total:", "-q"])
        .assert()
        .success();
    let first = fs::read(&output_file).unwrap();

    ezextractor(temp_dir.path())
        .args(["--anchor", "Total:", "-q"])
        .assert()
        .success();
    let second = fs::read(&output_file).unwrap();

    assert_eq!(first, second);
    assert!(!first.ends_with(b"\n"));
}

#[test]
fn quiet_and_verbose_conflict() {
    let temp_dir = TempDir::new().unwrap();

    ezextractor(temp_dir.path())
        .args(["-q", "-v"])
        .assert()
        .failure();
}
