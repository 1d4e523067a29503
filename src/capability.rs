//! Capability level tests. The five levels share one implementation: each
//! checks that the operator-sdk is usable and looks at the example custom
//! resources of the CSV. Validating the levels against a cluster is not done
//! yet, so every level passes once the checks ran.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use manifests::Bundle;
use test_framework::{TestManager, TestResult, Testable};

use crate::sdk::OperatorSdk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityLevel {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl CapabilityLevel {
    pub const ALL: [CapabilityLevel; 5] = [
        CapabilityLevel::One,
        CapabilityLevel::Two,
        CapabilityLevel::Three,
        CapabilityLevel::Four,
        CapabilityLevel::Five,
    ];

    /// Name the scorecard passes to select the test
    pub fn test_name(&self) -> &'static str {
        match self {
            CapabilityLevel::One => "capability-level-one",
            CapabilityLevel::Two => "capability-level-two",
            CapabilityLevel::Three => "capability-level-three",
            CapabilityLevel::Four => "capability-level-four",
            CapabilityLevel::Five => "capability-level-five",
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.test_name())
    }
}

impl FromStr for CapabilityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::ALL.iter().find(|level| level.test_name() == s) {
            Some(level) => Ok(*level),
            None => bail!("unknown capability level test: {}", s),
        }
    }
}

/// Verifies that an operator meets the given capability level
pub struct CapabilityLevelTest {
    level: CapabilityLevel,
    sdk: Rc<dyn OperatorSdk>,
}

impl CapabilityLevelTest {
    pub fn new(level: CapabilityLevel, sdk: Rc<dyn OperatorSdk>) -> Self {
        Self { level, sdk }
    }
}

impl Testable<Bundle> for CapabilityLevelTest {
    fn get_name(&self) -> &str {
        self.level.test_name()
    }

    fn run(&self, bundle: &Bundle) -> Result<TestResult> {
        let result = TestResult::passed(self.get_name());

        let version = self
            .sdk
            .version()
            .with_context(|| format!("{}: unable to run operator-sdk", self.level))?;
        log::info!("{}", version.trim_end());

        // the custom resource to install is the first entry of alm-examples
        match bundle.first_alm_example() {
            Ok(Some(example)) => log::debug!(
                "{}: using example {} {}/{} from {}",
                self.level,
                example.api_version,
                example.kind,
                example.name(),
                bundle.name
            ),
            Ok(None) => log::warn!("no alm-examples in the bundle CSV"),
            Err(e) => log::warn!("alm-examples of {} is not valid: {}", bundle.name, e),
        }

        Ok(result)
    }
}

/// Registers one test per capability level, in level order
pub fn get_capability_tests(sdk: Rc<dyn OperatorSdk>) -> TestManager<Bundle> {
    let mut tm = TestManager::new();
    for level in CapabilityLevel::ALL {
        tm.add_test(Box::new(CapabilityLevelTest::new(level, sdk.clone())));
    }
    tm
}
