//! Bounded invocation of external programs.
//!
//! Every call runs with stdin closed, captures stdout/stderr, and is wrapped in
//! a timeout. The child is spawned with `kill_on_drop` so an expired timeout
//! also terminates the process.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::OcrError;

/// An external program plus the time budget for each of its invocations.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: String,
    timeout: Duration,
}

impl ExternalTool {
    #[must_use]
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program and require a successful exit status.
    ///
    /// # Errors
    ///
    /// [`OcrError::ToolNotFound`] when the program cannot be found,
    /// [`OcrError::Timeout`] when it runs too long, and
    /// [`OcrError::ToolFailed`] for a non-zero exit.
    pub async fn run<I, S>(&self, args: I) -> Result<Output, OcrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.output(args).await?;
        if !output.status.success() {
            return Err(OcrError::ToolFailed {
                tool: self.program.clone(),
                status: describe_status(&output),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }

    /// First non-empty line the program prints for `flag`.
    ///
    /// Some tools print their version on stderr or exit non-zero for a
    /// version query, so the exit status is ignored here.
    ///
    /// # Errors
    ///
    /// Fails when the program cannot be run or prints nothing.
    pub async fn version(&self, flag: &str) -> Result<String, OcrError> {
        let output = self.output([flag]).await?;
        first_line(&output.stdout)
            .or_else(|| first_line(&output.stderr))
            .ok_or_else(|| OcrError::ToolFailed {
                tool: self.program.clone(),
                status: describe_status(&output),
                stderr: "no version output".to_string(),
            })
    }

    async fn output<I, S>(&self, args: I) -> Result<Output, OcrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::trace!(program = %self.program, "spawning external tool");

        match timeout(self.timeout, command.output()).await {
            Err(_) => Err(OcrError::Timeout {
                tool: self.program.clone(),
                secs: self.timeout.as_secs(),
            }),
            Ok(Err(error)) if error.kind() == ErrorKind::NotFound => {
                Err(OcrError::ToolNotFound {
                    tool: self.program.clone(),
                })
            }
            Ok(Err(error)) => Err(OcrError::ToolFailed {
                tool: self.program.clone(),
                status: "spawn failed".to_string(),
                stderr: error.to_string(),
            }),
            Ok(Ok(output)) => Ok(output),
        }
    }
}

fn describe_status(output: &Output) -> String {
    output.status.code().map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit status {code}"),
    )
}

fn first_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ToString::to_string)
}

#[cfg(all(test, unix))]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sh() -> ExternalTool {
        ExternalTool::new("sh", Duration::from_secs(10))
    }

    #[tokio::test]
    async fn run_captures_stdout() {
        let output = sh().run(["-c", "printf 'page text'"]).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), "page text");
    }

    #[tokio::test]
    async fn missing_program_is_tool_not_found() {
        let tool = ExternalTool::new("vetrec-definitely-not-installed", Duration::from_secs(1));
        let error = tool.run(["--help"]).await.unwrap_err();
        assert!(matches!(error, OcrError::ToolNotFound { tool } if tool == "vetrec-definitely-not-installed"));
    }

    #[tokio::test]
    async fn non_zero_exit_is_tool_failed() {
        let error = sh()
            .run(["-c", "echo 'bad input' >&2; exit 3"])
            .await
            .unwrap_err();
        match error {
            OcrError::ToolFailed { status, stderr, .. } => {
                assert_eq!(status, "exit status 3");
                assert_eq!(stderr, "bad input");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_program_times_out() {
        let tool = ExternalTool::new("sh", Duration::from_millis(100));
        let error = tool.run(["-c", "sleep 5"]).await.unwrap_err();
        assert!(matches!(error, OcrError::Timeout { .. }));
    }

    #[tokio::test]
    async fn version_falls_back_to_stderr() {
        // `sh -c` with no script complains on stderr and exits non-zero.
        let line = sh().version("-c").await.unwrap();
        assert!(line.contains("requires an argument"), "got: {line}");
    }

    #[test]
    fn first_line_skips_blank_lines() {
        assert_eq!(
            first_line(b"\n\n  tesseract 5.3.0\n leptonica-1.82"),
            Some("tesseract 5.3.0".to_string())
        );
        assert_eq!(first_line(b"   \n"), None);
    }
}
