use std::ffi::OsStr;
use std::io;
use std::process::{Output, Stdio};
use tokio::process::Command;

/// Longest stderr excerpt carried into error details
const MAX_STDERR_CHARS: usize = 2000;

/// Runs `program` to completion and captures stdout/stderr.
///
/// The child is killed when the returned future is dropped, so a caller
/// that times out or is cancelled never leaves the process running.
pub(super) async fn run_captured<I, S>(program: &str, args: I) -> io::Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
}

/// Trimmed, length-capped stderr text for error details
pub(super) fn stderr_excerpt(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.chars().count() <= MAX_STDERR_CHARS {
        return trimmed.to_string();
    }
    let mut excerpt: String = trimmed.chars().take(MAX_STDERR_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

/// "exit status N" or "terminated by signal" for error details
pub(super) fn describe_status(output: &Output) -> String {
    match output.status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}
