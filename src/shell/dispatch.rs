use crate::error::ShellError;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<(), ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> Result<(), ShellError> {
        if line.trim().is_empty() {
            return Ok(());
        }

        self.record_history(line);

        // Whitespace split: first token picks the command, the rest are
        // its arguments
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (command, rest) = match tokens.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        let args: Vec<String> = rest.iter().map(|s| s.to_string()).collect();

        let mut session = self
            .session
            .lock()
            .map_err(|_| ShellError::Internal("session state unavailable".to_string()))?;

        self.registry
            .execute(&mut session, command, &args)
            .map_err(ShellError::from)
    }
}

impl super::Shell {
    fn record_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);

        let added = match self.history.lock() {
            Ok(mut history) => history.add(line),
            Err(_) => Ok(()),
        };
        if let Err(e) = added {
            if !self.flags.is_set("quiet") {
                eprintln!("Warning: couldn't append to history: {}", e);
            }
        }
    }
}
