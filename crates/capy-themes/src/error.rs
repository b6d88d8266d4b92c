//! Error types for capy-themes

use serde::Serialize;
use std::path::PathBuf;

/// Hard failures. These abort the requested action and are reported to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command} ({status}){}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Unknown background: {0}")]
    UnknownBackground(String),

    #[error("No active theme")]
    NoActiveTheme,

    #[error("Config error: {0}")]
    Config(String),
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

/// Contained failures. Recorded next to a result, never propagated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SoftFailure {
    #[error("theme root {} unreadable: {reason}", .root.display())]
    RootUnreadable { root: PathBuf, reason: String },

    #[error("backgrounds directory {} unreadable: {reason}", .dir.display())]
    BackgroundsUnreadable { dir: PathBuf, reason: String },

    #[error("current theme link {} unresolved: {reason}", .link.display())]
    LinkUnresolved { link: PathBuf, reason: String },

    #[error("cleanup `{action}` failed: {reason}")]
    CleanupFailed { action: String, reason: String },
}

/// A result that always carries a value, plus whatever went wrong on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scan<T> {
    pub value: T,
    pub soft_failures: Vec<SoftFailure>,
}

impl<T> Scan<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            soft_failures: Vec::new(),
        }
    }

    pub fn push_failure(&mut self, failure: SoftFailure) {
        self.soft_failures.push(failure);
    }

    pub fn into_parts(self) -> (T, Vec<SoftFailure>) {
        (self.value, self.soft_failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_includes_stderr_verbatim() {
        let err = ThemeError::CommandFailed {
            command: "theme nord".into(),
            status: "exit status: 1".into(),
            stderr: "theme: no such theme 'nord'\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "Command failed: theme nord (exit status: 1)\ntheme: no such theme 'nord'"
        );
    }

    #[test]
    fn test_command_failed_without_stderr() {
        let err = ThemeError::CommandFailed {
            command: "theme nord".into(),
            status: "exit status: 2".into(),
            stderr: "  ".into(),
        };
        assert_eq!(err.to_string(), "Command failed: theme nord (exit status: 2)");
    }
}
