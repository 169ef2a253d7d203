use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn copy_fixtures(destination: &Path) {
    fs::create_dir_all(destination).unwrap();
    for entry in fs::read_dir("tests/fixtures").unwrap() {
        let path = entry.unwrap().path();
        fs::copy(&path, destination.join(path.file_name().unwrap())).unwrap();
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_idfm2metro() {
    let work_dir = TempDir::new().expect("create temp dir failed");
    copy_fixtures(&work_dir.path().join("source_data_files"));
    Command::cargo_bin("idfm2metro")
        .expect("Failed to find binary 'idfm2metro'")
        .current_dir(work_dir.path())
        .assert()
        .success();

    let generated = work_dir.path().join("generated_data_files");
    for file in &[
        "zones.json",
        "accesses.json",
        "zones_accesses_rel.json",
        "zones_lines_rel.json",
        "lines.json",
        "zones_metro.json",
    ] {
        assert!(generated.join(file).is_file(), "{} not generated", file);
    }
    assert!(generated.join("icons").is_dir());

    let zones_metro = read_json(&generated.join("zones_metro.json"));
    let zones_metro = zones_metro.as_array().unwrap();
    assert_eq!(1, zones_metro.len());
    assert_eq!("71264", zones_metro[0]["id"]);
    assert_eq!("1001", zones_metro[0]["accesses"][0]["id"]);
    assert_eq!("C01371", zones_metro[0]["lines"][0]["id"]);
    assert_eq!(1, zones_metro[0]["lines"].as_array().unwrap().len());
}

#[test]
fn test_idfm2metro_with_config_file() {
    let work_dir = TempDir::new().expect("create temp dir failed");
    copy_fixtures(&work_dir.path().join("exports"));
    fs::write(
        work_dir.path().join("idfm2metro.json"),
        r#"{"source_dir": "exports", "generated_dir": "public/data"}"#,
    )
    .unwrap();
    Command::cargo_bin("idfm2metro")
        .expect("Failed to find binary 'idfm2metro'")
        .current_dir(work_dir.path())
        .assert()
        .success();
    assert!(work_dir
        .path()
        .join("public/data/zones_metro.json")
        .is_file());
}

#[test]
fn test_idfm2metro_without_sources() {
    let work_dir = TempDir::new().expect("create temp dir failed");
    Command::cargo_bin("idfm2metro")
        .expect("Failed to find binary 'idfm2metro'")
        .current_dir(work_dir.path())
        .assert()
        .failure()
        .code(1);
    assert!(!work_dir
        .path()
        .join("generated_data_files/zones_metro.json")
        .exists());
}
