use std::fs;

use super::{report_failures, Command, CommandError};
use crate::core::session::SessionState;

#[derive(Clone)]
pub struct CatCommand;

impl Default for CatCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CatCommand {
    pub fn new() -> Self {
        Self
    }

    /// Reads one operand as lossy UTF-8.
    pub fn contents(&self, session: &SessionState, raw: &str) -> Result<String, CommandError> {
        let path = session
            .resolve(raw)
            .map_err(|e| CommandError::Failed(format!("cat: {}: {}", raw, e)))?;

        let bytes = fs::read(&path)
            .map_err(|e| CommandError::Failed(format!("cat: {}: {}", raw, e)))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Command for CatCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("cat: missing operand".to_string()));
        }

        let mut failures = Vec::new();
        for raw in args {
            match self.contents(session, raw) {
                Ok(text) => print!("{}", text),
                Err(CommandError::Failed(msg)) => failures.push(msg),
                Err(other) => return Err(other),
            }
        }
        report_failures(failures)
    }
}
