///! Result types understood by the operator scorecard (v1alpha3 schema)
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Outcome of a single test
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Pass,
    Fail,
    Error,
}

/// Result of one test. `errors` and `suggestions` are always serialized,
/// as empty arrays when there is nothing to report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TestResult {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log: String,
    pub state: State,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl TestResult {
    pub fn new(name: &str, state: State) -> Self {
        TestResult {
            name: name.to_owned(),
            log: String::new(),
            state,
            errors: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn passed(name: &str) -> Self {
        Self::new(name, State::Pass)
    }

    pub fn failed(name: &str, error: impl Into<String>) -> Self {
        let mut result = Self::new(name, State::Fail);
        result.errors.push(error.into());
        result
    }
}

/// Everything a test image reports back for one invocation
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TestStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<TestResult>,
}

impl From<TestResult> for TestStatus {
    fn from(result: TestResult) -> Self {
        TestStatus {
            results: vec![result],
        }
    }
}

impl TestStatus {
    /// JSON indented by four spaces, the layout the scorecard prints
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }
}
