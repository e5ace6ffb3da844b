use super::{Command, CommandError};
use crate::core::session::SessionState;

const HELP_TEXT: &str = "\
Built-in commands:
  ls [path]        - list directory contents
  cd [dir]         - change directory
  pwd              - print current working directory
  mkdir NAME...    - create directories
  rm NAME...       - remove files (won't remove non-empty dirs)
  rmdir NAME...    - remove empty directories
  cat FILE...      - print file contents
  touch FILE...    - create or update timestamp
  mv SRC... DEST   - move files or directories
  cp SRC... DEST   - copy files or directories
  clear            - clear the screen
  sysinfo          - show system information & resource usage
  ps               - list processes
  top              - show top CPU-consuming processes
  history          - show command history
  help             - show this help
  exit/quit        - quit the terminal

Anything else is run as a system command in the current directory.";

#[derive(Clone)]
pub struct HelpCommand;

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HelpCommand {
    fn execute(&self, _session: &mut SessionState, _args: &[String]) -> Result<(), CommandError> {
        println!("{}", HELP_TEXT);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_mentions_every_builtin() {
        for name in [
            "ls", "cd", "pwd", "mkdir", "rm", "rmdir", "cat", "touch", "mv", "cp", "clear",
            "sysinfo", "ps", "top", "history", "help", "exit",
        ] {
            assert!(HELP_TEXT.contains(name), "help text lacks {}", name);
        }
    }
}
