use std::fs;
use std::io;
use std::path::Path;

use super::{report_failures, Command, CommandError};
use crate::core::session::SessionState;

/// `mv` and `cp` share the same operand shape: one or more sources and a
/// final destination. With several sources the destination is created as
/// a directory and sources land inside it.

#[derive(Clone)]
pub struct MvCommand;

impl Default for MvCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MvCommand {
    pub fn new() -> Self {
        Self
    }

    fn move_one(&self, src: &Path, dest: &Path, shown: &str) -> Option<String> {
        let target = resolve_into_dir(src, dest);

        match fs::rename(src, &target) {
            Ok(()) => None,
            // rename cannot cross filesystems; copy-and-delete covers files
            Err(_) if src.is_file() => fs::copy(src, &target)
                .and_then(|_| fs::remove_file(src))
                .err()
                .map(|e| format!("mv: {}: {}", shown, e)),
            Err(e) => Some(format!("mv: {}: {}", shown, e)),
        }
    }
}

impl Command for MvCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        let (dest_raw, sources) = match args.split_last() {
            Some(split) if !split.1.is_empty() => split,
            _ => return Err(CommandError::Usage("mv: missing operand".to_string())),
        };

        let dest = session
            .resolve(dest_raw)
            .map_err(|e| CommandError::Failed(format!("mv: {}: {}", dest_raw, e)))?;

        if sources.len() > 1 {
            fs::create_dir_all(&dest)
                .map_err(|e| CommandError::Failed(format!("mv: {}: {}", dest_raw, e)))?;
        }

        let mut failures = Vec::new();
        for raw in sources {
            match session.resolve(raw) {
                Ok(src) => {
                    if let Some(msg) = self.move_one(&src, &dest, raw) {
                        failures.push(msg);
                    }
                }
                Err(e) => failures.push(format!("mv: {}: {}", raw, e)),
            }
        }
        report_failures(failures)
    }
}

#[derive(Clone)]
pub struct CpCommand;

impl Default for CpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CpCommand {
    pub fn new() -> Self {
        Self
    }

    fn copy_one(&self, src: &Path, dest: &Path, shown: &str) -> Option<String> {
        let target = resolve_into_dir(src, dest);

        let result = if src.is_dir() {
            copy_tree(src, &target)
        } else {
            fs::copy(src, &target).map(|_| ())
        };

        result.err().map(|e| format!("cp: {}: {}", shown, e))
    }
}

impl Command for CpCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        let (dest_raw, sources) = match args.split_last() {
            Some(split) if !split.1.is_empty() => split,
            _ => return Err(CommandError::Usage("cp: missing operand".to_string())),
        };

        let dest = session
            .resolve(dest_raw)
            .map_err(|e| CommandError::Failed(format!("cp: {}: {}", dest_raw, e)))?;

        if sources.len() > 1 {
            fs::create_dir_all(&dest)
                .map_err(|e| CommandError::Failed(format!("cp: {}: {}", dest_raw, e)))?;
        }

        let mut failures = Vec::new();
        for raw in sources {
            match session.resolve(raw) {
                Ok(src) => {
                    if let Some(msg) = self.copy_one(&src, &dest, raw) {
                        failures.push(msg);
                    }
                }
                Err(e) => failures.push(format!("cp: {}: {}", raw, e)),
            }
        }
        report_failures(failures)
    }
}

/// A source moved or copied onto an existing directory lands inside it
/// under its own name.
fn resolve_into_dir(src: &Path, dest: &Path) -> std::path::PathBuf {
    if dest.is_dir() {
        match src.file_name() {
            Some(name) => dest.join(name),
            None => dest.to_path_buf(),
        }
    } else {
        dest.to_path_buf()
    }
}

/// Recursive directory copy; the destination must not exist yet.
fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("ostium_transfer_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_mv_renames_file() {
        let root = scratch_dir("mv_rename");
        fs::write(root.join("a"), "data").unwrap();
        let mut session = SessionState::with_cwd(root.clone());

        MvCommand::new()
            .execute(&mut session, &["a".to_string(), "b".to_string()])
            .unwrap();
        assert!(!root.join("a").exists());
        assert_eq!(fs::read_to_string(root.join("b")).unwrap(), "data");

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_mv_into_existing_directory() {
        let root = scratch_dir("mv_into");
        fs::write(root.join("a"), "data").unwrap();
        fs::create_dir(root.join("dir")).unwrap();
        let mut session = SessionState::with_cwd(root.clone());

        MvCommand::new()
            .execute(&mut session, &["a".to_string(), "dir".to_string()])
            .unwrap();
        assert!(root.join("dir").join("a").is_file());

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_mv_many_sources_creates_dest_dir() {
        let root = scratch_dir("mv_many");
        fs::write(root.join("a"), "").unwrap();
        fs::write(root.join("b"), "").unwrap();
        let mut session = SessionState::with_cwd(root.clone());

        MvCommand::new()
            .execute(
                &mut session,
                &["a".to_string(), "b".to_string(), "bucket".to_string()],
            )
            .unwrap();
        assert!(root.join("bucket").join("a").is_file());
        assert!(root.join("bucket").join("b").is_file());

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_mv_missing_source_reported() {
        let root = scratch_dir("mv_missing");
        let mut session = SessionState::with_cwd(root.clone());

        let result =
            MvCommand::new().execute(&mut session, &["ghost".to_string(), "b".to_string()]);
        assert!(matches!(result, Err(CommandError::Failed(_))));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_cp_copies_file_keeping_source() {
        let root = scratch_dir("cp_file");
        fs::write(root.join("a"), "data").unwrap();
        let mut session = SessionState::with_cwd(root.clone());

        CpCommand::new()
            .execute(&mut session, &["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(fs::read_to_string(root.join("a")).unwrap(), "data");
        assert_eq!(fs::read_to_string(root.join("b")).unwrap(), "data");

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_cp_copies_directory_recursively() {
        let root = scratch_dir("cp_tree");
        fs::create_dir_all(root.join("src").join("inner")).unwrap();
        fs::write(root.join("src").join("inner").join("f"), "deep").unwrap();
        let mut session = SessionState::with_cwd(root.clone());

        CpCommand::new()
            .execute(&mut session, &["src".to_string(), "dup".to_string()])
            .unwrap();
        assert_eq!(
            fs::read_to_string(root.join("dup").join("inner").join("f")).unwrap(),
            "deep"
        );

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_cp_single_operand_is_usage_error() {
        let root = scratch_dir("cp_usage");
        let mut session = SessionState::with_cwd(root);

        let result = CpCommand::new().execute(&mut session, &["only".to_string()]);
        assert!(matches!(result, Err(CommandError::Usage(_))));
    }
}
