use super::{Command, CommandError};
use crate::core::session::SessionState;

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _session: &mut SessionState, _args: &[String]) -> Result<(), CommandError> {
        std::process::exit(0);
    }
}
