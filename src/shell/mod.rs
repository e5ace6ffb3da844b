use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rustyline::{history::FileHistory, Editor};

mod dispatch;

use crate::{
    core::{commands::CommandRegistry, session::SessionState},
    error::ShellError,
    flags::Flags,
    input::{History, ShellCompleter},
    metrics::{select_provider, SharedMetrics},
};

use dispatch::CommandHandler;

const HISTORY_FILE_NAME: &str = ".ostium_history";

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) session: Arc<Mutex<SessionState>>,
    pub(crate) history: Arc<Mutex<History>>,
    pub(crate) registry: CommandRegistry,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let session = Arc::new(Mutex::new(SessionState::new()?));

        let history_file = match flags.get_value("history") {
            Some(path) => PathBuf::from(path),
            None => dirs::home_dir()
                .ok_or(ShellError::HomeDirNotFound)?
                .join(HISTORY_FILE_NAME),
        };
        let history = Arc::new(Mutex::new(History::new(history_file)?));

        let metrics: SharedMetrics = Arc::new(Mutex::new(select_provider(
            flags.is_set("proc-metrics"),
        )));
        let registry = CommandRegistry::new(&flags, history.clone(), metrics);

        // The completer must know the builtin names before the editor
        // clones it as its helper
        let mut completer = ShellCompleter::new(session.clone());
        completer.set_builtins(registry.names());

        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));

        // Make prior sessions' commands recallable
        if let Ok(entries) = history.lock() {
            for entry in entries.entries() {
                let _ = editor.add_history_entry(entry);
            }
        }

        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to leave the terminal");
        })?;

        Ok(Shell {
            editor,
            session,
            history,
            registry,
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            self.print_banner();
        }

        loop {
            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Err(e) = self.execute_command(&line) {
                        eprintln!("{}", e);
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    // The prompt survives Ctrl-C; only EOF or exit ends it
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-D");
                    }
                    break;
                }
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        match self.session.lock() {
            Ok(session) => format!("ostium:{}$ ", session.cwd().display()),
            Err(_) => "ostium$ ".to_string(),
        }
    }

    fn print_banner(&self) {
        println!(
            "ostium {} — type 'help' for commands, 'exit' to quit",
            env!("CARGO_PKG_VERSION")
        );
        if let Ok(history) = self.history.lock() {
            println!("History file: {}", history.file_path().display());
        }
    }
}
