use std::path::Path;
use std::process::{Command, Stdio};

use super::{signal, ProcessError};
use crate::flags::Flags;
use crate::path::PathExpander;

/// Runs unrecognized input as an operating-system command: spawn, wait,
/// surface the exit status. Stdio is inherited so the child talks to the
/// terminal directly.
#[derive(Clone)]
pub struct ProcessExecutor {
    quiet_mode: bool,
    path_expander: PathExpander,
}

impl ProcessExecutor {
    pub fn new(flags: &Flags) -> Self {
        ProcessExecutor {
            quiet_mode: flags.is_set("quiet"),
            path_expander: PathExpander::new(),
        }
    }

    /// Spawns `argv` with the session working directory as the child's
    /// cwd and blocks until it exits. Returns the child's exit code
    /// (`None` when it died to a signal).
    pub fn spawn(&self, cwd: &Path, argv: &[&str]) -> Result<Option<i32>, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;

        let expanded_args: Vec<String> = args
            .iter()
            .map(|&arg| {
                if arg.starts_with('~') {
                    self.path_expander
                        .expand(arg)
                        .map(|p| p.to_string_lossy().into_owned())
                        .unwrap_or_else(|_| arg.to_owned())
                } else {
                    arg.to_owned()
                }
            })
            .collect();

        let mut command = Command::new(program);
        command
            .args(&expanded_args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(std::env::vars());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProcessError::CommandNotFound(program.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let guard = signal::ignore_sigint()?;
        let waited = child.wait();
        signal::restore_sigint(guard);

        let status = waited?;
        if !status.success() && !self.quiet_mode {
            println!("Process exited with status: {}", status);
        }
        Ok(status.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn executor() -> ProcessExecutor {
        let mut flags = Flags::new();
        flags.parse(&["-q".to_string()]).unwrap();
        ProcessExecutor::new(&flags)
    }

    #[test]
    fn test_spawn_surfaces_zero_exit() {
        let code = executor().spawn(&env::temp_dir(), &["true"]).unwrap();
        assert_eq!(code, Some(0));
    }

    #[test]
    fn test_spawn_surfaces_nonzero_exit() {
        let code = executor().spawn(&env::temp_dir(), &["false"]).unwrap();
        assert_eq!(code, Some(1));
    }

    #[test]
    fn test_spawn_runs_in_given_cwd() {
        let dir = env::temp_dir();
        let code = executor()
            .spawn(&dir, &["ls", "-a"])
            .unwrap();
        assert_eq!(code, Some(0));
    }

    #[test]
    fn test_spawn_unknown_command() {
        let result = executor().spawn(&env::temp_dir(), &["definitely_not_a_command_xyz"]);
        assert!(matches!(result, Err(ProcessError::CommandNotFound(_))));
    }

    #[test]
    fn test_spawn_empty_argv() {
        let result = executor().spawn(&env::temp_dir(), &[]);
        assert!(matches!(result, Err(ProcessError::EmptyCommand)));
    }
}
