use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serial_test::serial;

const CSV: &str = r#"apiVersion: operators.coreos.com/v1alpha1
kind: ClusterServiceVersion
metadata:
  name: memcached-operator.v0.0.1
  annotations:
    alm-examples: |-
      [{"apiVersion": "cache.example.com/v1alpha1", "kind": "Memcached", "metadata": {"name": "memcached-sample"}}]
"#;

const CSV_WITHOUT_EXAMPLES: &str = r#"apiVersion: operators.coreos.com/v1alpha1
kind: ClusterServiceVersion
metadata:
  name: memcached-operator.v0.0.1
"#;

const LEVELS: [&str; 5] = [
    "capability-level-one",
    "capability-level-two",
    "capability-level-three",
    "capability-level-four",
    "capability-level-five",
];

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new(csv: &str, sdk_script: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let manifests = dir.path().join("bundle/manifests");
        fs::create_dir_all(&manifests).unwrap();
        fs::write(manifests.join("memcached.clusterserviceversion.yaml"), csv).unwrap();

        let sdk = dir.path().join("operator-sdk");
        fs::write(&sdk, format!("#!/bin/sh\n{}\n", sdk_script)).unwrap();
        fs::set_permissions(&sdk, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    fn bundle(&self) -> PathBuf {
        self.dir.path().join("bundle")
    }

    fn sdk(&self) -> PathBuf {
        self.dir.path().join("operator-sdk")
    }

    fn run(&self, args: &[&str]) -> Output {
        run_binary(&self.bundle(), &self.sdk(), args)
    }
}

fn run_binary(bundle: &Path, sdk: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_capability-tests"))
        .arg("--bundle")
        .arg(bundle)
        .arg("--operator-sdk")
        .arg(sdk)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute process")
}

fn working_sdk() -> &'static str {
    r#"[ "$1" = "version" ] || exit 2
echo 'operator-sdk version: "v1.3.0", commit: "1abf57985b43bf6a59dcd18147b3c574fa57d3f6"'"#
}

fn parse(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not json")
}

#[test]
#[serial]
fn every_level_passes() {
    let ws = Workspace::new(CSV, working_sdk());
    for level in LEVELS {
        let output = ws.run(&[level]);
        assert!(output.status.success(), "{:?}", output);

        let value = parse(&output);
        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["name"], level);
        assert_eq!(results[0]["state"], "pass");
        assert_eq!(results[0]["errors"], serde_json::json!([]));
        assert_eq!(results[0]["suggestions"], serde_json::json!([]));
        assert!(String::from_utf8_lossy(&output.stderr).contains("v1.3.0"));
    }
}

#[test]
#[serial]
fn output_is_indented_with_four_spaces() {
    let ws = Workspace::new(CSV, working_sdk());
    let output = ws.run(&["capability-level-one"]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("{\n    \"results\": [\n        {\n"));
    assert!(stdout.ends_with("}\n"));
}

#[test]
#[serial]
fn missing_alm_examples_still_passes() {
    let ws = Workspace::new(CSV_WITHOUT_EXAMPLES, working_sdk());
    let output = ws.run(&["capability-level-four"]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(parse(&output)["results"][0]["state"], "pass");
    assert!(String::from_utf8_lossy(&output.stderr).contains("no alm-examples in the bundle CSV"));
}

#[test]
#[serial]
fn unknown_test_lists_valid_tests() {
    let ws = Workspace::new(CSV, working_sdk());
    let output = ws.run(&["capability-level-six"]);
    assert!(output.status.success(), "{:?}", output);

    let value = parse(&output);
    let result = &value["results"][0];
    assert_eq!(result["state"], "fail");
    assert!(result.get("name").is_none());
    assert_eq!(
        result["errors"],
        serde_json::json!([format!(
            "Valid tests for this image include: {}",
            LEVELS.join(" ")
        )])
    );
    assert_eq!(result["suggestions"], serde_json::json!([]));
}

#[test]
#[serial]
fn missing_test_name_is_fatal() {
    let ws = Workspace::new(CSV, working_sdk());
    let output = ws.run(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
#[serial]
fn missing_bundle_is_fatal() {
    let ws = Workspace::new(CSV, working_sdk());
    let output = run_binary(
        &ws.dir.path().join("no-bundle"),
        &ws.sdk(),
        &["capability-level-one"],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
#[serial]
fn failing_operator_sdk_is_fatal() {
    let ws = Workspace::new(CSV, "echo 'cannot start' >&2\nexit 1");
    let output = ws.run(&["capability-level-two"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot start"));
}

#[test]
#[serial]
fn missing_operator_sdk_is_fatal() {
    let ws = Workspace::new(CSV, working_sdk());
    let output = run_binary(
        &ws.bundle(),
        &ws.dir.path().join("missing-operator-sdk"),
        &["capability-level-three"],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
#[serial]
fn list_prints_test_names() {
    let ws = Workspace::new(CSV, "exit 1");
    let output = ws.run(&["--list"]);
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), LEVELS);
}
