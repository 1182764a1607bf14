//! Copying text to the system clipboard through the platform's command.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use thiserror::Error;
use wait_timeout::ChildExt;

/// How long the clipboard command may take before it is killed.
pub const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard command is known for this platform")]
    Unsupported,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Command `{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("Command `{0}` failed with status {1}")]
    CommandFailed(String, std::process::ExitStatus),
}

/// The shell command that reads stdin into the clipboard.
#[cfg(target_os = "macos")]
pub fn clipboard_command() -> Option<&'static str> {
    Some("pbcopy")
}

#[cfg(target_os = "linux")]
pub fn clipboard_command() -> Option<&'static str> {
    Some("xclip -selection clipboard")
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub fn clipboard_command() -> Option<&'static str> {
    None
}

/// Copies `text` to the clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let command = clipboard_command().ok_or(ClipboardError::Unsupported)?;
    pipe_to(command, text, CLIPBOARD_TIMEOUT)
}

/// Runs `command_str` through `sh -c` with `input` on its stdin.
///
/// Stdin is closed before waiting so commands that read to EOF finish. The
/// child is always waited on, even when it stops reading early.
pub fn pipe_to(command_str: &str, input: &str, timeout: Duration) -> Result<(), ClipboardError> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command_str)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // Commands may exit without reading; the exit status decides.
        if let Err(err) = stdin.write_all(input.as_bytes()) {
            tracing::debug!(error = %err, command = command_str, "stdin not fully consumed");
        }
    }

    match child.wait_timeout(timeout)? {
        Some(status) if status.success() => Ok(()),
        Some(status) => Err(ClipboardError::CommandFailed(command_str.to_string(), status)),
        None => {
            child.kill()?;
            Err(ClipboardError::Timeout(command_str.to_string(), timeout))
        }
    }
}
