//! Binary-level tests for the batchresize CLI

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn make_image(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 150, 100]));
    img.save(path).unwrap();
}

fn batchresize() -> Command {
    Command::cargo_bin("batchresize").unwrap()
}

#[test]
fn missing_required_flags_is_a_usage_error() {
    batchresize()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--folder"));
}

#[test]
fn missing_output_flag_is_a_usage_error() {
    batchresize()
        .args(["--folder", "somewhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--resized_imgs"));
}

#[test]
fn nonexistent_input_folder_exits_with_one() {
    let dir = TempDir::new().unwrap();
    batchresize()
        .args(["-f", "/no/such/folder", "-r"])
        .arg(dir.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn file_as_input_folder_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("plain.txt");
    std::fs::write(&file, b"x").unwrap();

    batchresize()
        .arg("-f")
        .arg(&file)
        .arg("-r")
        .arg(dir.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn resizes_a_folder_and_prints_a_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");
    std::fs::create_dir(&input).unwrap();
    make_image(&input.join("bear.jpg"), 800, 600);

    batchresize()
        .arg("-f")
        .arg(&input)
        .arg("-r")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("Processed"));

    assert!(output.join("bear_resized.jpg").is_file());
}

#[test]
fn empty_input_folder_exits_zero_with_warning() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    std::fs::create_dir(&input).unwrap();

    batchresize()
        .arg("-f")
        .arg(&input)
        .arg("-r")
        .arg(dir.path().join("out"))
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("no supported image files"));
}

#[test]
fn json_summary_goes_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    std::fs::create_dir(&input).unwrap();
    make_image(&input.join("bear.png"), 400, 200);

    let assert = batchresize()
        .arg("-f")
        .arg(&input)
        .arg("-r")
        .arg(dir.path().join("out"))
        .args(["--json", "--quiet"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["processed"], 1);
    assert_eq!(summary["skipped"], 0);
    assert_eq!(summary["failed"], 0);
}

#[test]
fn width_flag_overrides_default() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");
    std::fs::create_dir(&input).unwrap();
    make_image(&input.join("bear.png"), 800, 600);

    batchresize()
        .arg("-f")
        .arg(&input)
        .arg("-r")
        .arg(&output)
        .args(["--width", "400", "--quiet"])
        .assert()
        .success();

    let (w, h) = image::image_dimensions(output.join("bear_resized.png")).unwrap();
    assert_eq!((w, h), (400, 300));
}

#[test]
fn invalid_width_is_rejected() {
    let dir = TempDir::new().unwrap();
    batchresize()
        .args(["-f", "in", "-r", "out", "--width", "0"])
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Target width"));
}
