//! Small framework for container test images: tests are registered by name,
//! a single one is selected per invocation, and its outcome is reported in the
//! scorecard result schema.

mod result;
mod test_manager;
mod testable;

pub use result::{State, TestResult, TestStatus};
pub use test_manager::TestManager;
pub use testable::Testable;
