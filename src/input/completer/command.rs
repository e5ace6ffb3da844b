use std::{borrow::Cow, collections::BTreeSet, env, fs};

use rustyline::completion::Pair;

#[derive(Clone)]
pub struct CommandCompleter {
    builtins: BTreeSet<Cow<'static, str>>,
    path_commands: BTreeSet<Cow<'static, str>>,
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self {
            builtins: BTreeSet::new(),
            path_commands: BTreeSet::new(),
        };
        completer.refresh_path_commands();
        completer
    }

    /// Replaces the builtin name set; called once the command registry
    /// knows its names.
    pub fn set_builtins<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.builtins = names.into_iter().map(Cow::Owned).collect();
    }

    pub fn refresh_path_commands(&mut self) {
        self.path_commands.clear();

        if let Some(path_var) = env::var_os("PATH") {
            for dir in env::split_paths(&path_var) {
                if let Ok(entries) = fs::read_dir(dir) {
                    for entry in entries.filter_map(Result::ok) {
                        if let Ok(file_type) = entry.file_type() {
                            if file_type.is_file() || file_type.is_symlink() {
                                if let Some(name) = entry.file_name().to_str() {
                                    self.path_commands.insert(Cow::Owned(name.to_string()));
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let input = input.trim();
        let mut matches = Vec::new();

        // Builtins come first, then everything on PATH
        for name in self.builtins.iter().filter(|n| n.starts_with(input)) {
            matches.push(Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            });
        }

        for name in self.path_commands.iter().filter(|n| n.starts_with(input)) {
            if !self.builtins.contains(name.as_ref()) {
                matches.push(Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                });
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer_with_builtins() -> CommandCompleter {
        let mut completer = CommandCompleter {
            builtins: BTreeSet::new(),
            path_commands: BTreeSet::new(),
        };
        completer.set_builtins(["ls", "cd", "cat", "clear"].map(String::from));
        completer
    }

    #[test]
    fn test_complete_builtin_prefix() {
        let completer = completer_with_builtins();
        let matches = completer.complete_command("c");
        let names: Vec<&str> = matches.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(names, vec!["cat", "cd", "clear"]);
    }

    #[test]
    fn test_complete_exact_match_only() {
        let completer = completer_with_builtins();
        let matches = completer.complete_command("ls");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].replacement, "ls");
    }

    #[test]
    fn test_builtins_not_duplicated_by_path() {
        let mut completer = completer_with_builtins();
        completer.path_commands.insert(Cow::Borrowed("ls"));
        let matches = completer.complete_command("ls");
        assert_eq!(matches.len(), 1);
    }
}
