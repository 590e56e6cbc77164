use crate::traits::{
    CommandExecutor, FileSystem, Output, RealCommandExecutor, RealFileSystem, TerminalOutput,
};
use std::sync::Arc;

/// Application context that holds all dependencies for dependency injection
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub output: Arc<dyn Output>,
    pub command: Arc<dyn CommandExecutor>,
}

impl Context {
    /// Create a new context with real implementations (for production use)
    pub fn new() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            output: Arc::new(TerminalOutput),
            command: Arc::new(RealCommandExecutor::new()),
        }
    }

    /// Create a test context with specific mock implementations
    #[cfg(test)]
    pub fn test_with(
        fs: Arc<dyn FileSystem>,
        output: Arc<dyn Output>,
        command: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self { fs, output, command }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Context {
    fn clone(&self) -> Self {
        Self {
            fs: Arc::clone(&self.fs),
            output: Arc::clone(&self.output),
            command: Arc::clone(&self.command),
        }
    }
}
