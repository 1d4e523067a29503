//! Contains a wrapper around the operator-sdk command line tool.
//! The test image reaches the tool only through this interface so unit
//! tests can substitute a recording fake.

pub mod cli;
#[allow(clippy::module_inception)]
pub mod sdk;

pub use sdk::{create_sdk, OperatorSdk, DEFAULT_OPERATOR_SDK_PATH};
