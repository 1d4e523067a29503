///! Contains the testable trait every test of the image implements
use crate::result::TestResult;
use anyhow::Result;

/// This trait indicates that something can be run as a test, or is 'testable'.
/// `C` is whatever the test inspects, e.g. a parsed bundle.
///
/// An `Err` is not a failed test: it means the test could not be carried out
/// at all, and it aborts the whole run. Failures belong in the returned
/// [`TestResult`].
pub trait Testable<C> {
    fn get_name(&self) -> &str;
    fn run(&self, context: &C) -> Result<TestResult>;
}
