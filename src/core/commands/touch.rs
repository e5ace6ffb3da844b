use std::fs::{self, File, FileTimes};
use std::time::SystemTime;

use super::{report_failures, Command, CommandError};
use crate::core::session::SessionState;

/// Creates missing files empty and refreshes the timestamps of existing
/// ones. Parent directories are created as needed.
#[derive(Clone)]
pub struct TouchCommand;

impl Default for TouchCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchCommand {
    pub fn new() -> Self {
        Self
    }

    fn touch_one(&self, session: &SessionState, raw: &str) -> Option<String> {
        let path = match session.resolve(raw) {
            Ok(path) => path,
            Err(e) => return Some(format!("touch: {}: {}", raw, e)),
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return Some(format!("touch: {}: {}", raw, e));
            }
        }

        let result = if path.exists() {
            let now = SystemTime::now();
            File::options()
                .append(true)
                .open(&path)
                .and_then(|f| f.set_times(FileTimes::new().set_accessed(now).set_modified(now)))
        } else {
            fs::write(&path, "")
        };

        result
            .err()
            .map(|e| format!("touch: {}: {}", raw, e))
    }
}

impl Command for TouchCommand {
    fn execute(&self, session: &mut SessionState, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("touch: missing operand".to_string()));
        }

        let failures = args
            .iter()
            .filter_map(|raw| self.touch_one(session, raw))
            .collect();
        report_failures(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("ostium_touch_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_touch_creates_empty_file() {
        let root = scratch_dir("create");
        let mut session = SessionState::with_cwd(root.clone());

        TouchCommand::new()
            .execute(&mut session, &["f.txt".to_string()])
            .unwrap();

        let created = root.join("f.txt");
        assert!(created.is_file());
        assert_eq!(fs::read(created).unwrap(), b"");

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_touch_creates_missing_parents() {
        let root = scratch_dir("parents");
        let mut session = SessionState::with_cwd(root.clone());

        TouchCommand::new()
            .execute(&mut session, &["deep/nested/f".to_string()])
            .unwrap();
        assert!(root.join("deep").join("nested").join("f").is_file());

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_touch_existing_keeps_content() {
        let root = scratch_dir("existing");
        fs::write(root.join("f"), "keep me").unwrap();
        let mut session = SessionState::with_cwd(root.clone());

        TouchCommand::new()
            .execute(&mut session, &["f".to_string()])
            .unwrap();
        assert_eq!(fs::read_to_string(root.join("f")).unwrap(), "keep me");

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_touch_existing_bumps_mtime() {
        let root = scratch_dir("mtime");
        fs::write(root.join("f"), "x").unwrap();
        let old = fs::metadata(root.join("f")).unwrap().modified().unwrap();

        std::thread::sleep(std::time::Duration::from_millis(20));

        let mut session = SessionState::with_cwd(root.clone());
        TouchCommand::new()
            .execute(&mut session, &["f".to_string()])
            .unwrap();

        let new = fs::metadata(root.join("f")).unwrap().modified().unwrap();
        assert!(new > old);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_touch_without_operand() {
        let root = scratch_dir("noop");
        let mut session = SessionState::with_cwd(root);
        let result = TouchCommand::new().execute(&mut session, &[]);
        assert!(matches!(result, Err(CommandError::Usage(_))));
    }
}
