//! Runs one capability test against the mounted bundle and prints the result
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use manifests::Bundle;
use test_framework::TestStatus;

use crate::capability::get_capability_tests;
use crate::sdk::OperatorSdk;

/// Where the scorecard mounts the untarred bundle inside the test pod
pub const POD_BUNDLE_ROOT: &str = "/bundle";

pub fn exec<W: Write>(
    test_name: &str,
    bundle_root: &Path,
    sdk: Rc<dyn OperatorSdk>,
    out: &mut W,
) -> Result<()> {
    let status = run_test(test_name, bundle_root, sdk)?;
    write_status(out, &status)
}

pub fn run_test(
    test_name: &str,
    bundle_root: &Path,
    sdk: Rc<dyn OperatorSdk>,
) -> Result<TestStatus> {
    let bundle = Bundle::load_from_dir(bundle_root)
        .with_context(|| format!("failed to read bundle from {}", bundle_root.display()))?;
    log::debug!(
        "loaded bundle {} ({} crds, {} other objects)",
        bundle.name,
        bundle.crds.len(),
        bundle.objects.len()
    );

    let tm = get_capability_tests(sdk);
    tm.run(test_name, &bundle)
        .with_context(|| format!("failed to run {}", test_name))
}

pub fn write_status<W: Write>(out: &mut W, status: &TestStatus) -> Result<()> {
    let json = status.to_pretty_json().context("failed to generate json")?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::test::TestHelperSdk;
    use std::fs;
    use test_framework::State;

    fn write_bundle(dir: &Path, csv_annotations: &str) -> Result<()> {
        fs::create_dir_all(dir.join("manifests"))?;
        fs::write(
            dir.join("manifests/csv.yaml"),
            format!(
                "apiVersion: operators.coreos.com/v1alpha1\nkind: ClusterServiceVersion\nmetadata:\n  name: memcached-operator.v0.0.1\n{}",
                csv_annotations
            ),
        )?;
        Ok(())
    }

    #[test]
    fn test_exec_prints_result() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        write_bundle(
            tmp.path(),
            "  annotations:\n    alm-examples: '[{\"apiVersion\": \"cache.example.com/v1alpha1\", \"kind\": \"Memcached\"}]'\n",
        )?;

        let mut out = Vec::new();
        exec(
            "capability-level-two",
            tmp.path(),
            Rc::new(TestHelperSdk::default()),
            &mut out,
        )?;

        let out = String::from_utf8(out)?;
        assert!(out.ends_with("}\n"));
        let status: TestStatus = serde_json::from_str(&out)?;
        assert_eq!(status.results.len(), 1);
        assert_eq!(status.results[0].name, "capability-level-two");
        assert_eq!(status.results[0].state, State::Pass);

        let value: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(value["results"][0]["errors"], serde_json::json!([]));
        assert_eq!(value["results"][0]["suggestions"], serde_json::json!([]));
        Ok(())
    }

    #[test]
    fn test_unknown_test_name() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        write_bundle(tmp.path(), "")?;

        let status = run_test(
            "capability-level-zero",
            tmp.path(),
            Rc::new(TestHelperSdk::broken()),
        )?;
        assert_eq!(status.results.len(), 1);
        assert_eq!(status.results[0].state, State::Fail);
        assert_eq!(status.results[0].errors.len(), 1);
        for level in crate::capability::CapabilityLevel::ALL {
            assert!(status.results[0].errors[0].contains(level.test_name()));
        }
        Ok(())
    }

    #[test]
    fn test_unreadable_bundle_is_fatal() {
        let mut out = Vec::new();
        let err = exec(
            "capability-level-one",
            Path::new("/nonexistent/bundle"),
            Rc::new(TestHelperSdk::default()),
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read bundle"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_sdk_failure_is_fatal() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        write_bundle(tmp.path(), "")?;

        let mut out = Vec::new();
        let result = exec(
            "capability-level-five",
            tmp.path(),
            Rc::new(TestHelperSdk::broken()),
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
        Ok(())
    }
}
