//! An interface trait so that the capability tests can call
//! the operator-sdk without having to worry about how it is run
use std::{any::Any, path::PathBuf, rc::Rc};

use anyhow::Result;

use crate::sdk::cli::OperatorSdkCli;

/// Where the scorecard test image installs the operator-sdk
pub const DEFAULT_OPERATOR_SDK_PATH: &str = "/usr/local/bin/operator-sdk";

pub trait OperatorSdk {
    fn as_any(&self) -> &dyn Any;
    /// Runs `operator-sdk version` and returns what it printed
    fn version(&self) -> Result<String>;
}

pub fn create_sdk(path: PathBuf) -> Rc<dyn OperatorSdk> {
    Rc::new(OperatorSdkCli::new(path))
}
