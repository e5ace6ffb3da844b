use super::{Command, CommandError};
use crate::core::session::SessionState;

#[derive(Clone)]
pub struct PwdCommand;

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(&self, session: &mut SessionState, _args: &[String]) -> Result<(), CommandError> {
        println!("{}", session.cwd().display());
        Ok(())
    }
}
