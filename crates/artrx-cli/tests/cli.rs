use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("artrx"))
}

fn artdmx(universe: u16, channels: &[u8]) -> Vec<u8> {
    let mut datagram = Vec::with_capacity(18 + channels.len());
    datagram.extend_from_slice(b"Art-Net\0");
    datagram.extend_from_slice(&0x5000u16.to_be_bytes());
    datagram.extend_from_slice(&14u16.to_be_bytes());
    datagram.extend_from_slice(&[1, 0]);
    datagram.extend_from_slice(&universe.to_be_bytes());
    datagram.extend_from_slice(&(channels.len() as u16).to_be_bytes());
    datagram.extend_from_slice(channels);
    datagram
}

fn write_datagram(temp: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, bytes).expect("write datagram file");
    path
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("listen").and(contains("decode")));
    cmd().arg("listen").arg("--help").assert().success();
    cmd().arg("decode").arg("--help").assert().success();
}

#[test]
fn decode_outputs_packet_json() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_datagram(&temp, "datagram.bin", &artdmx(3, &[10, 20, 30]));

    let assert = cmd().arg("decode").arg(input).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(value["header"]["universe"], 3);
    assert_eq!(value["header"]["length"], 3);
    assert_eq!(value["channels"], serde_json::json!([10, 20, 30]));
}

#[test]
fn decode_pretty_outputs_multiline_json() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_datagram(&temp, "datagram.bin", &artdmx(0, &[1, 2]));

    let assert = cmd()
        .arg("decode")
        .arg(input)
        .arg("--pretty")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.lines().count() > 1);
    let _: Value = serde_json::from_str(&stdout).expect("valid json");
}

#[test]
fn decode_malformed_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_datagram(&temp, "short.bin", &[0u8; 10]);

    cmd()
        .arg("decode")
        .arg(input)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn decode_truncated_names_the_failure() {
    let temp = TempDir::new().expect("tempdir");
    let mut datagram = artdmx(0, &[0u8; 8]);
    datagram[16..18].copy_from_slice(&512u16.to_be_bytes());
    let input = write_datagram(&temp, "truncated.bin", &datagram);

    cmd()
        .arg("decode")
        .arg(input)
        .assert()
        .failure()
        .stderr(contains("truncated payload"));
}

#[test]
fn decode_missing_file_fails() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .arg("decode")
        .arg(missing)
        .assert()
        .failure()
        .stderr(contains("error:"));
}
