///! This exposes the main control wrapper to select and run a test
use crate::result::{TestResult, TestStatus};
use crate::testable::Testable;
use anyhow::Result;

/// This manages all tests of an image. Tests keep their registration order,
/// which is also the order they are listed in.
pub struct TestManager<C> {
    tests: Vec<Box<dyn Testable<C>>>,
}

impl<C> Default for TestManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TestManager<C> {
    /// Create new TestManager
    pub fn new() -> Self {
        TestManager { tests: Vec::new() }
    }

    /// add a test to the test manager
    pub fn add_test(&mut self, test: Box<dyn Testable<C>>) {
        self.tests.push(test);
    }

    /// names of all registered tests
    pub fn test_names(&self) -> Vec<&str> {
        self.tests.iter().map(|t| t.get_name()).collect()
    }

    /// Run the test whose name matches exactly. An unknown name is reported
    /// as a failed result listing the valid names.
    pub fn run(&self, name: &str, context: &C) -> Result<TestStatus> {
        match self.tests.iter().find(|t| t.get_name() == name) {
            Some(test) => Ok(test.run(context)?.into()),
            None => Ok(self.valid_tests_status()),
        }
    }

    fn valid_tests_status(&self) -> TestStatus {
        let msg = format!(
            "Valid tests for this image include: {}",
            self.test_names().join(" ")
        );
        TestResult::failed("", msg).into()
    }
}
