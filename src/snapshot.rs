//! OS snapshot collaborator.
//!
//! Fetches a real process or memory listing from the host to show next to
//! simulated metrics. The call is synchronous, made at most once per
//! comparison, and never retried. Failures are turned into informational
//! text at this boundary and never reach simulation results.

use std::fmt;
use std::process::Command;

use log::warn;
use serde::{Deserialize, Serialize};

/// Why a snapshot could not be taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The command could not be started (not found, not permitted).
    Spawn { command: String, message: String },
    /// The command ran but exited unsuccessfully.
    ExitStatus {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    /// The command's output was not UTF-8.
    InvalidUtf8 { command: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { command, message } => {
                write!(f, "could not run '{command}': {message}")
            }
            Self::ExitStatus {
                command,
                code,
                stderr,
            } => {
                match code {
                    Some(code) => write!(f, "'{command}' exited with status {code}")?,
                    None => write!(f, "'{command}' was terminated by a signal")?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
            Self::InvalidUtf8 { command } => write!(f, "'{command}' produced non-UTF-8 output"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Source of a host listing.
pub trait SnapshotProvider {
    /// Short label for logs (e.g., "ps aux").
    fn label(&self) -> &str;

    /// Takes one snapshot.
    fn capture(&self) -> Result<String, SnapshotError>;
}

/// Snapshot taken by running a fixed system command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSnapshot {
    program: String,
    args: Vec<String>,
    label: String,
    line_limit: Option<usize>,
}

impl CommandSnapshot {
    /// Creates a provider for `program args...`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = program.into();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let label = std::iter::once(program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            program,
            args,
            label,
            line_limit: None,
        }
    }

    /// Running-process listing (`ps aux`).
    pub fn processes() -> Self {
        Self::new("ps", ["aux"])
    }

    /// Memory usage listing (`free -m`).
    pub fn memory() -> Self {
        Self::new("free", ["-m"])
    }

    /// Keeps the header line plus at most `rows` following lines.
    pub fn with_line_limit(mut self, rows: usize) -> Self {
        self.line_limit = Some(rows);
        self
    }
}

impl SnapshotProvider for CommandSnapshot {
    fn label(&self) -> &str {
        &self.label
    }

    fn capture(&self) -> Result<String, SnapshotError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| SnapshotError::Spawn {
                command: self.label.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SnapshotError::ExitStatus {
                command: self.label.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|_| SnapshotError::InvalidUtf8 {
            command: self.label.clone(),
        })?;

        Ok(match self.line_limit {
            Some(rows) => truncate_listing(&text, rows),
            None => text,
        })
    }
}

/// Header plus the first `rows` lines, with a count of what was dropped.
fn truncate_listing(text: &str, rows: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some((header, body)) = lines.split_first() else {
        return String::new();
    };
    if body.len() <= rows {
        return lines.join("\n");
    }

    let mut kept: Vec<&str> = Vec::with_capacity(rows + 1);
    kept.push(header);
    kept.extend(&body[..rows]);
    format!(
        "{}\n... (showing first {rows} of {} entries)",
        kept.join("\n"),
        body.len()
    )
}

/// Result of asking a provider for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotOutcome {
    /// Listing text.
    Captured(String),
    /// Why no listing is available, as display text.
    Unavailable(String),
}

impl SnapshotOutcome {
    /// Takes one snapshot, converting failure into informational text.
    pub fn capture(provider: &dyn SnapshotProvider) -> Self {
        match provider.capture() {
            Ok(text) => Self::Captured(text),
            Err(e) => {
                warn!("snapshot '{}' unavailable: {e}", provider.label());
                Self::Unavailable(format!("snapshot unavailable: {e}"))
            }
        }
    }

    /// The listing or the failure message.
    pub fn text(&self) -> &str {
        match self {
            Self::Captured(text) | Self::Unavailable(text) => text,
        }
    }

    /// Whether a listing was captured.
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured(_))
    }
}
