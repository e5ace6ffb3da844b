mod file_ops;

use std::path::{Path, PathBuf};

use self::file_ops::FileOps;
use crate::error::ShellError;

/// Append-only command history mirrored to a plain-text file, one entry
/// per line. Entries are never deduplicated; consecutive repeats of the
/// same command are all kept.
pub struct History {
    entries: Vec<String>,
    file_ops: FileOps,
}

impl History {
    pub fn new(history_file: PathBuf) -> Result<Self, ShellError> {
        let file_ops = FileOps::new(history_file);
        let entries = file_ops.load_entries()?;

        Ok(History { entries, file_ops })
    }

    pub fn add(&mut self, entry: &str) -> Result<(), ShellError> {
        if entry.trim().is_empty() {
            return Ok(());
        }

        self.entries.push(entry.to_owned());
        self.file_ops.append_entry(entry)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_path(&self) -> &Path {
        self.file_ops.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn scratch_file(name: &str) -> PathBuf {
        env::temp_dir().join(format!("ostium_history_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let path = scratch_file("fresh");
        let _ = fs::remove_file(&path);

        let history = History::new(path).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_add_keeps_consecutive_duplicates() {
        let path = scratch_file("dup");
        let _ = fs::remove_file(&path);

        let mut history = History::new(path.clone()).unwrap();
        history.add("ls").unwrap();
        history.add("ls").unwrap();
        assert_eq!(history.entries(), ["ls", "ls"]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_blank_entries_ignored() {
        let path = scratch_file("blank");
        let _ = fs::remove_file(&path);

        let mut history = History::new(path.clone()).unwrap();
        history.add("   ").unwrap();
        assert!(history.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_entries_survive_reload() {
        let path = scratch_file("reload");
        let _ = fs::remove_file(&path);

        {
            let mut history = History::new(path.clone()).unwrap();
            history.add("mkdir sub").unwrap();
            history.add("cd sub").unwrap();
        }

        let reloaded = History::new(path.clone()).unwrap();
        assert_eq!(reloaded.entries(), ["mkdir sub", "cd sub"]);

        fs::remove_file(path).unwrap();
    }
}
