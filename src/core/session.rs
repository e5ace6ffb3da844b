use std::env;
use std::path::{Path, PathBuf};

use crate::error::ShellError;
use crate::path::PathExpander;

/// Per-session state. The working directory lives here, not in the
/// process environment: every path-relative builtin resolves against
/// this field and only `cd` replaces it.
pub struct SessionState {
    cwd: PathBuf,
    expander: PathExpander,
}

impl SessionState {
    pub fn new() -> Result<Self, ShellError> {
        Ok(SessionState {
            cwd: env::current_dir()?,
            expander: PathExpander::new(),
        })
    }

    pub fn with_cwd(cwd: PathBuf) -> Self {
        SessionState {
            cwd,
            expander: PathExpander::new(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    pub fn home_dir(&self) -> Result<PathBuf, ShellError> {
        self.expander.get_home_dir()
    }

    /// Resolves a command operand: tilde expansion first, then relative
    /// paths are anchored at the session working directory.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, ShellError> {
        self.expander.resolve(&self.cwd, raw)
    }
}
