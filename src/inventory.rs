//! Synchronous access to the cloud inventory through the `gcloud` CLI.

use anyhow::Result;
use serde_json::Value;

use crate::context::Context;
use crate::traits::command::command_line;

/// Default binary used to list resources
pub const DEFAULT_GCLOUD: &str = "gcloud";

/// Lists cloud resources by running the inventory CLI with `--format=json`.
pub struct InventoryClient<'a> {
    ctx: &'a Context,
    binary: String,
}

impl<'a> InventoryClient<'a> {
    pub fn new(ctx: &'a Context, binary: impl Into<String>) -> Self {
        Self {
            ctx,
            binary: binary.into(),
        }
    }

    /// Run the CLI with `args` and return its JSON output as records.
    ///
    /// Returns `Ok(None)` when the command exits non-zero or prints something
    /// that is not JSON. A top-level JSON array yields its elements, `null`
    /// yields no records and any other value is a single record. Only a
    /// failure to start the binary is an error.
    pub fn fetch(&self, args: &[String]) -> Result<Option<Vec<Value>>> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self.ctx.command.execute(&self.binary, &args)?;

        if !output.status.success() {
            self.ctx.output.dimmed(&format!(
                "'{}' exited with {}",
                command_line(&self.binary, &args),
                output.status
            ));
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                self.ctx.output.dimmed(stderr.trim());
            }
            return Ok(None);
        }

        let parsed: Value = match serde_json::from_slice(&output.stdout) {
            Ok(value) => value,
            Err(_) => return Ok(None),
        };

        Ok(Some(match parsed {
            Value::Array(records) => records,
            Value::Null => Vec::new(),
            record => vec![record],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockCommandExecutor, MockCommandResult, MockFileSystem, MockOutput};
    use std::sync::Arc;

    fn context(executor: MockCommandExecutor) -> Context {
        Context::test_with(
            Arc::new(MockFileSystem::new()),
            Arc::new(MockOutput::new()),
            Arc::new(executor),
        )
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fetch_parses_array() {
        let ctx = context(MockCommandExecutor::with_outputs(vec![MockCommandResult::ok(
            "gcloud maps list --format=json",
            r#"[{"name": "a"}, {"name": "b"}]"#,
        )]));
        let client = InventoryClient::new(&ctx, DEFAULT_GCLOUD);

        let records = client
            .fetch(&args(&["maps", "list", "--format=json"]))
            .unwrap()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["name"], "b");
    }

    #[test]
    fn test_fetch_empty_array_is_some_empty() {
        let ctx = context(MockCommandExecutor::with_outputs(vec![MockCommandResult::ok(
            "gcloud list",
            "[]",
        )]));
        let client = InventoryClient::new(&ctx, DEFAULT_GCLOUD);

        assert_eq!(client.fetch(&args(&["list"])).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_fetch_non_zero_exit_is_none() {
        let ctx = context(MockCommandExecutor::with_outputs(vec![MockCommandResult {
            command: "gcloud list".to_string(),
            exit_code: 1,
            stdout: "[{\"name\": \"ignored\"}]".to_string(),
            stderr: "ERROR: not logged in".to_string(),
        }]));
        let client = InventoryClient::new(&ctx, DEFAULT_GCLOUD);

        assert_eq!(client.fetch(&args(&["list"])).unwrap(), None);
    }

    #[test]
    fn test_fetch_unparseable_output_is_none() {
        let ctx = context(MockCommandExecutor::with_outputs(vec![MockCommandResult::ok(
            "gcloud list",
            "Listed 0 items.",
        )]));
        let client = InventoryClient::new(&ctx, DEFAULT_GCLOUD);

        assert_eq!(client.fetch(&args(&["list"])).unwrap(), None);
    }

    #[test]
    fn test_fetch_uses_configured_binary() {
        let executor = Arc::new(MockCommandExecutor::with_outputs(vec![
            MockCommandResult::ok("/opt/gcloud list", "null"),
        ]));
        let ctx = Context::test_with(
            Arc::new(MockFileSystem::new()),
            Arc::new(MockOutput::new()),
            executor.clone(),
        );
        let client = InventoryClient::new(&ctx, "/opt/gcloud");

        assert_eq!(client.fetch(&args(&["list"])).unwrap(), Some(vec![]));
        assert_eq!(executor.calls(), vec!["/opt/gcloud list".to_string()]);
    }
}
