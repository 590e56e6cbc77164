use anyhow::{Context, Result};
use std::process::{Command, Output};

/// Trait for executing system commands, allowing for mocking in tests
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with arguments, capturing stdout, stderr and exit status.
    ///
    /// A non-zero exit status is not an error; only a failure to spawn is.
    fn execute(&self, command: &str, args: &[&str]) -> Result<Output>;
}

/// Real command executor using std::process::Command
pub struct RealCommandExecutor;

impl RealCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for RealCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> Result<Output> {
        Command::new(command)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run '{}'", command))
    }
}

/// Render a command and its arguments as a single line
pub fn command_line(command: &str, args: &[&str]) -> String {
    std::iter::once(command)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mock command executor for testing
#[cfg(test)]
pub struct MockCommandExecutor {
    /// Pre-configured outputs for commands
    outputs: std::sync::Mutex<Vec<MockCommandResult>>,
    /// Every command line executed, in order
    calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub struct MockCommandResult {
    /// Full command line (command and arguments joined by spaces)
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
impl MockCommandResult {
    /// A successful invocation printing `stdout`
    pub fn ok(command: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed invocation printing `stderr`
    pub fn failed(command: impl Into<String>, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn new() -> Self {
        Self {
            outputs: std::sync::Mutex::new(Vec::new()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_outputs(outputs: Vec<MockCommandResult>) -> Self {
        Self {
            outputs: std::sync::Mutex::new(outputs),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Command lines executed so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Default for MockCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl CommandExecutor for MockCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> Result<Output> {
        let line = command_line(command, args);
        self.calls.lock().unwrap().push(line.clone());

        let mut outputs = self.outputs.lock().unwrap();

        if let Some(result) = outputs.iter().position(|r| r.command == line) {
            let mock_result = outputs.remove(result);
            return Ok(Output {
                status: create_exit_status(mock_result.exit_code),
                stdout: mock_result.stdout.into_bytes(),
                stderr: mock_result.stderr.into_bytes(),
            });
        }

        // Unscripted commands behave like a CLI that is not logged in
        Ok(Output {
            status: create_exit_status(1),
            stdout: Vec::new(),
            stderr: b"ERROR: (mock) no scripted output".to_vec(),
        })
    }
}

#[cfg(test)]
fn create_exit_status(code: i32) -> std::process::ExitStatus {
    // ExitStatus can't be constructed directly
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        // Raw wait status: the exit code lives in the second byte
        std::process::ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_joins_arguments() {
        assert_eq!(
            command_line("gcloud", &["maps", "list", "--format=json"]),
            "gcloud maps list --format=json"
        );
        assert_eq!(command_line("gcloud", &[]), "gcloud");
    }

    #[test]
    fn test_mock_executor_returns_configured_output() {
        let executor = MockCommandExecutor::with_outputs(vec![MockCommandResult::ok(
            "gcloud list",
            "[]",
        )]);

        let output = executor.execute("gcloud", &["list"]).unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "[]");
        assert_eq!(executor.calls(), vec!["gcloud list".to_string()]);
    }

    #[test]
    fn test_mock_executor_reports_exit_code() {
        let executor = MockCommandExecutor::with_outputs(vec![MockCommandResult::failed(
            "gcloud list",
            2,
            "denied",
        )]);

        let output = executor.execute("gcloud", &["list"]).unwrap();
        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_mock_executor_unscripted_command_fails() {
        let executor = MockCommandExecutor::new();
        let output = executor.execute("unknown", &[]).unwrap();
        assert!(!output.status.success());
    }
}
