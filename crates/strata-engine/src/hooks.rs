//! Shell hooks run around migrations

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Interpreter used by [`BashRunner`]
pub const BASH: &str = "/bin/bash";

/// Hook script failures
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The interpreter could not be started (S001)
    #[error("[S001] Failed to run script {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script exited unsuccessfully (S002)
    #[error("[S002] Script {} exited with {status}\n{output}", .path.display())]
    Failed {
        path: PathBuf,
        status: String,
        output: String,
    },
}

/// Exit code and combined output of a finished script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    /// stdout followed by stderr
    pub output: String,
}

impl ScriptOutput {
    /// Whether the script exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The captured output on success, [`ScriptError::Failed`] otherwise
    pub fn into_result(self, path: &Path) -> Result<String, ScriptError> {
        if self.success() {
            return Ok(self.output);
        }
        let status = match self.code {
            Some(code) => format!("exit code {code}"),
            None => "a signal".to_string(),
        };
        Err(ScriptError::Failed {
            path: path.to_path_buf(),
            status,
            output: self.output,
        })
    }
}

/// Runs a hook script and reports how it finished
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run the script at `path` to completion
    async fn run(&self, path: &Path) -> Result<ScriptOutput, ScriptError>;
}

/// Runs scripts with `/bin/bash <path>` in the caller's working directory
/// and environment
#[derive(Debug, Clone, Default)]
pub struct BashRunner;

#[async_trait]
impl ScriptRunner for BashRunner {
    async fn run(&self, path: &Path) -> Result<ScriptOutput, ScriptError> {
        log::debug!("Running script {}", path.display());
        let out = tokio::process::Command::new(BASH)
            .arg(path)
            .output()
            .await
            .map_err(|source| ScriptError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;

        let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&out.stderr));
        Ok(ScriptOutput {
            code: out.status.code(),
            output,
        })
    }
}

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
