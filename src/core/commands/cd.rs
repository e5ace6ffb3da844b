use super::{Command, CommandError};
use crate::core::session::SessionState;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        let target = match args.first() {
            Some(raw) => session
                .resolve(raw)
                .map_err(|e| CommandError::Failed(format!("cd: {}", e)))?,
            None => session
                .home_dir()
                .map_err(|e| CommandError::Failed(format!("cd: {}", e)))?,
        };

        let shown = args.first().map(String::as_str).unwrap_or("~");

        // Canonicalize so `..` and symlinks settle before the check
        let canonical = target
            .canonicalize()
            .map_err(|e| CommandError::Failed(format!("cd: {}: {}", shown, e)))?;

        if !canonical.is_dir() {
            return Err(CommandError::Failed(format!(
                "cd: {}: Not a directory",
                shown
            )));
        }

        session.set_cwd(canonical);
        Ok(())
    }
}
