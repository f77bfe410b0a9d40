// tests/test_cli.rs
//
// End-to-end checks of the datamap-bench binary

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_datamap-bench"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_run_bounded_iterations() {
    let output = cli()
        .args(["run", "-n", "1000", "-s", "1024", "--fill", "random"])
        .output()
        .expect("run binary");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1000 iterations in "), "{stdout}");
    assert!(stdout.contains("ns/op"));
}

#[test]
fn test_show_prints_records() {
    let output = cli().args(["show", "--value", "-3"]).output().expect("run binary");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), r#"{"record":{"int":-3}}"#);
}

#[test]
fn test_schema_prints_bar() {
    let output = cli().args(["schema", "bar"]).output().expect("run binary");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "Bar");
    assert_eq!(json["fields"][0]["type"], "int");
}

#[test]
fn test_closed_stdout_exits_cleanly() {
    let mut child = cli()
        .args(["schema", "foo"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn binary");
    drop(child.stdout.take());
    let status = child.wait().expect("wait for binary");
    assert!(status.success(), "{status}");
}

#[test]
fn test_validate_valid_and_invalid_files() {
    let good = json_file(r#"{ "record": { "int": 54 } }"#);
    let output = cli().arg("validate").arg(good.path()).output().expect("run binary");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).ends_with("valid\n"));

    let extra = json_file(r#"{ "record": { "int": 54, "more": true } }"#);
    let output = cli().arg("validate").arg(extra.path()).output().expect("run binary");
    assert!(output.status.success());
    let output = cli()
        .arg("validate")
        .arg(extra.path())
        .arg("--strict")
        .output()
        .expect("run binary");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("/record/more"));

    let bad = json_file(r#"{ "record": { "int": "x" } }"#);
    let output = cli().arg("validate").arg(bad.path()).output().expect("run binary");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("/record/int :: string is not backed by a int"));
}
