mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::{write_bytes, write_zip};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SUMMARY_ONE_FILE: &str =
    "Compressed File Properties\nTotal Size: 24 bytes\nFile Count: 1\n----------\n\n";

fn zipfinder() -> Result<Command> {
    let mut cmd = Command::cargo_bin("zipfinder")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_missing_flags_print_hint() -> Result<()> {
    zipfinder()?
        .assert()
        .success()
        .stdout("Please run the -help command to use the Finder tool.\n");

    zipfinder()?
        .args(["-file", "archive.zip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-help"));
    Ok(())
}

#[test]
fn test_help_exits_without_scanning() -> Result<()> {
    zipfinder()?
        .arg("-help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--case-sensitive"))
        .stdout(predicate::str::contains("Compressed File Properties").not());
    Ok(())
}

#[test]
fn test_console_output() -> Result<()> {
    let dir = tempdir()?;
    let archive = write_zip(
        dir.path(),
        "a.zip",
        &[("docs/", ""), ("docs/greeting.txt", "Hello\nworld\nHELLO again\n")],
    )?;

    let expected = format!(
        "{SUMMARY_ONE_FILE}\
         File: docs/greeting.txt\nLine Number: 1\nLine: Hello\n----------\n\n\
         File: docs/greeting.txt\nLine Number: 3\nLine: HELLO again\n----------\n\n"
    );
    zipfinder()?
        .args(["-file", archive.to_str().unwrap(), "-text", "hello"])
        .assert()
        .success()
        .stdout(expected);
    Ok(())
}

#[test]
fn test_case_sensitive_flag() -> Result<()> {
    let dir = tempdir()?;
    let archive = write_zip(
        dir.path(),
        "a.zip",
        &[("greeting.txt", "Hello\nworld\nHELLO again\n")],
    )?;
    let archive = archive.to_str().unwrap();

    zipfinder()?
        .args(["-file", archive, "-text", "hello", "-case-sensitive"])
        .assert()
        .success()
        .stdout(format!(
            "{SUMMARY_ONE_FILE}The searched text was not found.\n"
        ));

    zipfinder()?
        .args(["--file", archive, "--text", "HELLO", "--case-sensitive=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Line Number: 3"))
        .stdout(predicate::str::contains("Line Number: 1").not());
    Ok(())
}

#[test]
fn test_output_file() -> Result<()> {
    let dir = tempdir()?;
    let archive = write_zip(
        dir.path(),
        "a.zip",
        &[("greeting.txt", "Hello\nworld\nHELLO again\n")],
    )?;
    let results = dir.path().join("results.txt");
    fs::write(&results, "previous run\n".repeat(100))?;

    zipfinder()?
        .args([
            "-file",
            archive.to_str().unwrap(),
            "-text",
            "world,hello",
            "-output",
            results.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(format!(
            "{SUMMARY_ONE_FILE}Search results were saved to {}\n",
            results.display()
        ));

    assert_eq!(
        fs::read_to_string(&results)?,
        "File: greeting.txt\nLine Number: 1\nLine: Hello\n----------\n\
         File: greeting.txt\nLine Number: 2\nLine: world\n----------\n\
         File: greeting.txt\nLine Number: 3\nLine: HELLO again\n----------\n"
    );
    Ok(())
}

#[test]
fn test_no_output_file_without_matches() -> Result<()> {
    let dir = tempdir()?;
    let archive = write_zip(dir.path(), "a.zip", &[("a.txt", "nothing here\n")])?;
    let results = dir.path().join("results.txt");

    zipfinder()?
        .args([
            "-file",
            archive.to_str().unwrap(),
            "-text",
            "absent",
            "-output",
            results.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("The searched text was not found.\n"));

    assert!(!results.exists());
    Ok(())
}

#[test]
fn test_missing_archive_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("missing.zip");

    zipfinder()?
        .args(["-file", missing.to_str().unwrap(), "-text", "x"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("cannot open archive"));
    Ok(())
}

#[test]
fn test_corrupt_archive_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let bogus = write_bytes(dir.path(), "bogus.zip", &[0u8; 64])?;

    zipfinder()?
        .args(["-file", bogus.to_str().unwrap(), "-text", "x"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Not a valid ZIP file"));
    Ok(())
}

#[test]
fn test_unwritable_output_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let archive = write_zip(dir.path(), "a.zip", &[("a.txt", "key\n")])?;
    let results = dir.path().join("no-such-dir").join("results.txt");

    zipfinder()?
        .args([
            "-file",
            archive.to_str().unwrap(),
            "-text",
            "key",
            "-output",
            results.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write results"));
    Ok(())
}
