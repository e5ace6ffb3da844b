use std::sync::{Arc, Mutex};

use super::{Command, CommandError};
use crate::core::session::SessionState;
use crate::input::History;

/// Prints the session history numbered from 1, oldest first.
#[derive(Clone)]
pub struct HistoryCommand {
    history: Arc<Mutex<History>>,
}

impl HistoryCommand {
    pub fn new(history: Arc<Mutex<History>>) -> Self {
        Self { history }
    }
}

impl Command for HistoryCommand {
    fn execute(&self, _session: &mut SessionState, _args: &[String]) -> Result<(), CommandError> {
        let history = self
            .history
            .lock()
            .map_err(|_| CommandError::Failed("history: unavailable".to_string()))?;

        if history.is_empty() {
            println!("(no history)");
            return Ok(());
        }

        for (index, entry) in history.entries().iter().enumerate() {
            println!("{}: {}", index + 1, entry);
        }
        Ok(())
    }
}
