use std::{
    any::Any,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{bail, Context, Result};

use super::OperatorSdk;

/// Runs the real operator-sdk binary
#[derive(Debug, Clone)]
pub struct OperatorSdkCli {
    path: PathBuf,
}

impl OperatorSdkCli {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OperatorSdk for OperatorSdkCli {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn version(&self) -> Result<String> {
        let path = resolve_path(&self.path)?;
        log::debug!("running {} version", path.display());
        let output = Command::new(&path)
            .arg("version")
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("unable to run {}", path.display()))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        if !output.status.success() {
            bail!(
                "{} version exited with {}: {}",
                path.display(),
                output.status,
                combined.trim()
            );
        }

        Ok(combined)
    }
}

/// Resolves the operator-sdk location. A path that exists is used as is,
/// anything else is looked up in $PATH.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(path) => Ok(path),
        Err(_) => which::which(path)
            .with_context(|| format!("failed to find operator-sdk at {}", path.display())),
    }
}
