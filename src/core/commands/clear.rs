use std::io::{self, Write};

use super::{Command, CommandError};
use crate::core::session::SessionState;

#[derive(Clone)]
pub struct ClearCommand;

impl Default for ClearCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ClearCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ClearCommand {
    fn execute(&self, _session: &mut SessionState, _args: &[String]) -> Result<(), CommandError> {
        // Erase display, then park the cursor at the top-left corner
        print!("\x1B[2J\x1B[1;1H");
        io::stdout().flush()?;
        Ok(())
    }
}
