//! External process execution.
//!
//! Two launch modes:
//! - `run` waits for the command and captures its output (theme switching)
//! - `spawn_detached` starts a process and forgets it (wallpaper renderer)

use crate::error::ThemeError;
use async_trait::async_trait;
use log::debug;
use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::process::Stdio;

/// Captured result of an awaited command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Display form of the exit status (e.g. "exit status: 1").
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Trait that all process launchers must implement.
/// Activation only talks to external tools through this.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion. Only a failure to launch is an `Err`;
    /// a non-zero exit is reported through `CommandOutput::success`.
    async fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, ThemeError>;

    /// Launch a command without waiting for it. Its output is discarded.
    async fn spawn_detached(&self, program: &str, args: &[OsString]) -> Result<(), ThemeError>;
}

/// Runs real processes on the host.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, ThemeError> {
        debug!("Running: {}", command_line(program, args));

        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ThemeError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(output.into())
    }

    async fn spawn_detached(&self, program: &str, args: &[OsString]) -> Result<(), ThemeError> {
        debug!("Launching detached: {}", command_line(program, args));

        // Own process group so the renderer outlives our terminal session.
        let child = std::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map_err(|source| ThemeError::Spawn {
                program: program.to_string(),
                source,
            })?;

        debug!("{} running as pid {}", program, child.id());
        Ok(())
    }
}

/// Human-readable command line, used in logs and error messages.
pub fn command_line(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}
