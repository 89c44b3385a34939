//! External process invocation
//!
//! The checker shells out to two collaborators: the coverage generator under
//! test and the `xmllint` DTD validator. Both go through the narrow
//! [`CommandRunner`] seam so tests can substitute canned output instead of
//! depending on installed binaries.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Captured output of a finished child process
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, if the process terminated normally
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Command + arguments in, exit status + captured output back.
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to finish.
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;

    /// Whether `program` can be found on `PATH`.
    fn available(&self, program: &str) -> bool;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::ProcessError {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn available(&self, program: &str) -> bool {
        // An explicit path is probed directly, a bare name against PATH.
        if program.contains(std::path::MAIN_SEPARATOR) {
            return Path::new(program).is_file();
        }
        let Some(path) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&path).any(|dir| dir.join(program).is_file())
    }
}
