use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

mod cat;
mod cd;
mod clear;
mod exit;
mod help;
mod history;
mod ls;
mod mkdir;
mod monitor;
mod pwd;
mod rm;
mod touch;
mod transfer;

pub use cat::CatCommand;
pub use cd::CdCommand;
pub use clear::ClearCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;
pub use ls::LsCommand;
pub use mkdir::{MkdirCommand, RmdirCommand};
pub use monitor::{PsCommand, SysinfoCommand, TopCommand};
pub use pwd::PwdCommand;
pub use rm::RmCommand;
pub use touch::TouchCommand;
pub use transfer::{CpCommand, MvCommand};

use crate::core::session::SessionState;
use crate::flags::Flags;
use crate::input::History;
use crate::metrics::{MetricsError, SharedMetrics};
use crate::process::{ProcessError, ProcessExecutor};

#[derive(Debug)]
pub enum CommandError {
    /// Wrong or missing operands, e.g. "mkdir: missing operand".
    Usage(String),
    /// The operation itself failed; the message is already user-facing.
    Failed(String),
    Io(std::io::Error),
    Metrics(MetricsError),
    Process(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Usage(msg) => write!(f, "{}", msg),
            CommandError::Failed(msg) => write!(f, "{}", msg),
            CommandError::Io(err) => write!(f, "IO error: {}", err),
            CommandError::Metrics(err) => write!(f, "Metrics error: {}", err),
            CommandError::Process(err) => write!(f, "{}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::Io(err)
    }
}

impl From<MetricsError> for CommandError {
    fn from(err: MetricsError) -> Self {
        CommandError::Metrics(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

pub trait Command {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError>;
}

/// Joins per-operand failure messages into one error, or succeeds when
/// every operand went through. Commands taking several operands keep
/// processing after a failure, like their system counterparts.
pub(crate) fn report_failures(failures: Vec<String>) -> Result<(), CommandError> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CommandError::Failed(failures.join("\n")))
    }
}

#[derive(Clone)]
enum CommandType {
    Ls(LsCommand),
    Cd(CdCommand),
    Pwd(PwdCommand),
    Mkdir(MkdirCommand),
    Rmdir(RmdirCommand),
    Rm(RmCommand),
    Touch(TouchCommand),
    Cat(CatCommand),
    Mv(MvCommand),
    Cp(CpCommand),
    Clear(ClearCommand),
    Help(HelpCommand),
    Sysinfo(SysinfoCommand),
    Ps(PsCommand),
    Top(TopCommand),
    History(HistoryCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        match self {
            CommandType::Ls(cmd) => cmd.execute(session, args),
            CommandType::Cd(cmd) => cmd.execute(session, args),
            CommandType::Pwd(cmd) => cmd.execute(session, args),
            CommandType::Mkdir(cmd) => cmd.execute(session, args),
            CommandType::Rmdir(cmd) => cmd.execute(session, args),
            CommandType::Rm(cmd) => cmd.execute(session, args),
            CommandType::Touch(cmd) => cmd.execute(session, args),
            CommandType::Cat(cmd) => cmd.execute(session, args),
            CommandType::Mv(cmd) => cmd.execute(session, args),
            CommandType::Cp(cmd) => cmd.execute(session, args),
            CommandType::Clear(cmd) => cmd.execute(session, args),
            CommandType::Help(cmd) => cmd.execute(session, args),
            CommandType::Sysinfo(cmd) => cmd.execute(session, args),
            CommandType::Ps(cmd) => cmd.execute(session, args),
            CommandType::Top(cmd) => cmd.execute(session, args),
            CommandType::History(cmd) => cmd.execute(session, args),
            CommandType::Exit(cmd) => cmd.execute(session, args),
        }
    }
}

/// Maps the first token of a line to its builtin, or falls through to
/// the process executor for anything unrecognized. Matching is exact
/// and case-sensitive.
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandType>,
    process_executor: ProcessExecutor,
}

impl CommandRegistry {
    pub fn new(flags: &Flags, history: Arc<Mutex<History>>, metrics: SharedMetrics) -> Self {
        let mut commands = BTreeMap::new();

        commands.insert("ls".to_string(), CommandType::Ls(LsCommand::new()));
        commands.insert("cd".to_string(), CommandType::Cd(CdCommand::new()));
        commands.insert("pwd".to_string(), CommandType::Pwd(PwdCommand::new()));
        commands.insert("mkdir".to_string(), CommandType::Mkdir(MkdirCommand::new()));
        commands.insert("rmdir".to_string(), CommandType::Rmdir(RmdirCommand::new()));
        commands.insert("rm".to_string(), CommandType::Rm(RmCommand::new()));
        commands.insert("touch".to_string(), CommandType::Touch(TouchCommand::new()));
        commands.insert("cat".to_string(), CommandType::Cat(CatCommand::new()));
        commands.insert("mv".to_string(), CommandType::Mv(MvCommand::new()));
        commands.insert("cp".to_string(), CommandType::Cp(CpCommand::new()));
        commands.insert("clear".to_string(), CommandType::Clear(ClearCommand::new()));
        commands.insert("help".to_string(), CommandType::Help(HelpCommand::new()));
        commands.insert(
            "sysinfo".to_string(),
            CommandType::Sysinfo(SysinfoCommand::new(metrics.clone())),
        );
        commands.insert("ps".to_string(), CommandType::Ps(PsCommand::new(metrics.clone())));
        commands.insert("top".to_string(), CommandType::Top(TopCommand::new(metrics)));
        commands.insert(
            "history".to_string(),
            CommandType::History(HistoryCommand::new(history)),
        );
        commands.insert("exit".to_string(), CommandType::Exit(ExitCommand::new()));
        commands.insert("quit".to_string(), CommandType::Exit(ExitCommand::new()));

        CommandRegistry {
            commands,
            process_executor: ProcessExecutor::new(flags),
        }
    }

    pub fn execute(
        &self,
        session: &mut SessionState,
        command: &str,
        args: &[String],
    ) -> Result<(), CommandError> {
        if let Some(cmd) = self.commands.get(command) {
            cmd.execute(session, args)
        } else {
            let mut argv: Vec<&str> = vec![command];
            argv.extend(args.iter().map(String::as_str));
            self.process_executor.spawn(session.cwd(), &argv)?;
            Ok(())
        }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::select_provider;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir()
            .canonicalize()
            .unwrap()
            .join(format!("ostium_registry_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_registry(name: &str) -> CommandRegistry {
        let mut flags = Flags::new();
        flags.parse(&["-q".to_string()]).unwrap();

        let history_file = env::temp_dir().join(format!(
            "ostium_registry_hist_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&history_file);
        let history = Arc::new(Mutex::new(History::new(history_file).unwrap()));
        let metrics: SharedMetrics = Arc::new(Mutex::new(select_provider(true)));

        CommandRegistry::new(&flags, history, metrics)
    }

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtin_detection_is_exact() {
        let registry = test_registry("exact");

        for name in ["ls", "cd", "pwd", "mkdir", "rm", "touch", "cat", "mv", "cp"] {
            assert!(registry.is_builtin(name));
        }
        for name in ["sysinfo", "ps", "top", "history", "help", "clear", "exit", "quit"] {
            assert!(registry.is_builtin(name));
        }

        assert!(!registry.is_builtin("LS"));
        assert!(!registry.is_builtin("l"));
        assert!(!registry.is_builtin(""));
    }

    #[test]
    fn test_unknown_command_reaches_process_executor() {
        let registry = test_registry("unknown");
        let mut session = SessionState::with_cwd(env::temp_dir());

        let result = registry.execute(&mut session, "no_such_command_zzz", &[]);
        assert!(matches!(
            result,
            Err(CommandError::Process(ProcessError::CommandNotFound(_)))
        ));
    }

    #[test]
    fn test_external_exit_status_surfaced() {
        let registry = test_registry("external");
        let mut session = SessionState::with_cwd(env::temp_dir());

        // `true` is not a builtin; it must run as a child process
        assert!(!registry.is_builtin("true"));
        assert!(registry.execute(&mut session, "true", &[]).is_ok());
    }

    #[test]
    fn test_scenario_mkdir_cd_touch_rm() {
        let registry = test_registry("scenario");
        let root = scratch_dir("scenario");
        let mut session = SessionState::with_cwd(root.clone());

        registry.execute(&mut session, "mkdir", &args(&["sub"])).unwrap();
        registry.execute(&mut session, "cd", &args(&["sub"])).unwrap();
        assert_eq!(session.cwd(), root.join("sub"));

        registry
            .execute(&mut session, "touch", &args(&["f.txt"]))
            .unwrap();
        let created = root.join("sub").join("f.txt");
        assert!(created.is_file());
        assert_eq!(fs::read(&created).unwrap(), b"");

        registry.execute(&mut session, "rm", &args(&["f.txt"])).unwrap();
        assert!(!created.exists());

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_cd_failure_leaves_session_cwd() {
        let registry = test_registry("cdfail");
        let root = scratch_dir("cdfail");
        let mut session = SessionState::with_cwd(root.clone());

        let result = registry.execute(&mut session, "cd", &args(&["missing_dir"]));
        assert!(result.is_err());
        assert_eq!(session.cwd(), root);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_command_error_display_is_nonempty() {
        let errors = vec![
            CommandError::Usage("mkdir: missing operand".to_string()),
            CommandError::Failed("ls: cannot access 'x': gone".to_string()),
            CommandError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "io")),
            CommandError::Process(ProcessError::CommandNotFound("x".to_string())),
        ];
        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
