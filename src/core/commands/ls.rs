use std::fs;

use super::{Command, CommandError};
use crate::core::session::SessionState;

#[derive(Clone)]
pub struct LsCommand;

impl Default for LsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl LsCommand {
    pub fn new() -> Self {
        Self
    }

    /// Sorted entry names: directories suffixed with `/`, symlinks with `@`.
    pub fn entries(&self, session: &SessionState, raw: &str) -> Result<Vec<String>, CommandError> {
        let path = session
            .resolve(raw)
            .map_err(|e| CommandError::Failed(format!("ls: cannot access '{}': {}", raw, e)))?;

        let dir = fs::read_dir(&path)
            .map_err(|e| CommandError::Failed(format!("ls: cannot access '{}': {}", raw, e)))?;

        let mut names = Vec::new();
        for entry in dir.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            let entry_path = entry.path();

            // is_dir() follows symlinks, so a link to a directory lists as one
            if entry_path.is_dir() {
                names.push(format!("{}/", name));
            } else if entry_path
                .symlink_metadata()
                .map(|m| m.file_type().is_symlink())
                .unwrap_or(false)
            {
                names.push(format!("{}@", name));
            } else {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

impl Command for LsCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        let raw = args.first().map(String::as_str).unwrap_or(".");
        for name in self.entries(session, raw)? {
            println!("{}", name);
        }
        Ok(())
    }
}
