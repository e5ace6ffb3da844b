use std::fs;

use super::{report_failures, Command, CommandError};
use crate::core::session::SessionState;

#[derive(Clone)]
pub struct MkdirCommand;

impl Default for MkdirCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MkdirCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for MkdirCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("mkdir: missing operand".to_string()));
        }

        let mut failures = Vec::new();
        for raw in args {
            match session.resolve(raw) {
                Ok(path) if path.exists() => {
                    failures.push(format!(
                        "mkdir: cannot create directory '{}': File exists",
                        raw
                    ));
                }
                Ok(path) => {
                    if let Err(e) = fs::create_dir_all(&path) {
                        failures.push(format!("mkdir: {}: {}", raw, e));
                    }
                }
                Err(e) => failures.push(format!("mkdir: {}: {}", raw, e)),
            }
        }
        report_failures(failures)
    }
}

#[derive(Clone)]
pub struct RmdirCommand;

impl Default for RmdirCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RmdirCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for RmdirCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("rmdir: missing operand".to_string()));
        }

        let mut failures = Vec::new();
        for raw in args {
            match session.resolve(raw) {
                Ok(path) => {
                    if let Err(e) = fs::remove_dir(&path) {
                        failures.push(format!("rmdir: {}: {}", raw, e));
                    }
                }
                Err(e) => failures.push(format!("rmdir: {}: {}", raw, e)),
            }
        }
        report_failures(failures)
    }
}
