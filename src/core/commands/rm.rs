use std::fs;

use super::{report_failures, Command, CommandError};
use crate::core::session::SessionState;

/// Removes files and empty directories. A non-empty directory is left in
/// place and reported, matching the cautious behavior of the `rm`
/// surface this terminal exposes.
#[derive(Clone)]
pub struct RmCommand;

impl Default for RmCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RmCommand {
    pub fn new() -> Self {
        Self
    }

    fn remove_one(&self, session: &SessionState, raw: &str) -> Option<String> {
        let path = match session.resolve(raw) {
            Ok(path) => path,
            Err(e) => return Some(format!("rm: {}: {}", raw, e)),
        };

        let meta = match path.symlink_metadata() {
            Ok(meta) => meta,
            Err(_) => {
                return Some(format!(
                    "rm: cannot remove '{}': No such file or directory",
                    raw
                ))
            }
        };

        if meta.is_dir() {
            if fs::remove_dir(&path).is_err() {
                return Some(format!("rm: cannot remove '{}': Directory not empty", raw));
            }
        } else if let Err(e) = fs::remove_file(&path) {
            return Some(format!("rm: {}: {}", raw, e));
        }

        None
    }
}

impl Command for RmCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("rm: missing operand".to_string()));
        }

        let failures = args
            .iter()
            .filter_map(|raw| self.remove_one(session, raw))
            .collect();
        report_failures(failures)
    }
}
