use std::{fs, path::Path};

use rustyline::completion::Pair;

use crate::path::PathExpander;

#[derive(Clone)]
pub struct PathCompleter {
    expander: PathExpander,
}

impl Default for PathCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl PathCompleter {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }

    /// Completes a path operand relative to `base` (the session working
    /// directory). Directories gain a trailing `/`, files a trailing
    /// space. Completion is best-effort: unreadable directories simply
    /// yield no matches.
    pub fn complete_path(&self, incomplete: &str, base: &Path) -> Vec<Pair> {
        let (typed_dir, file_prefix) = split_input(incomplete);

        let search_dir = if typed_dir.is_empty() {
            base.to_path_buf()
        } else {
            match self.expander.resolve(base, &typed_dir) {
                Ok(dir) => dir,
                Err(_) => return Vec::new(),
            }
        };

        let mut matches = self.read_matches(&search_dir, &typed_dir, &file_prefix);
        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn read_matches(&self, search_dir: &Path, typed_dir: &str, file_prefix: &str) -> Vec<Pair> {
        let mut matches = Vec::new();

        if let Ok(entries) = fs::read_dir(search_dir) {
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(file_prefix) {
                        matches.push(make_pair(typed_dir, name, &entry.path()));
                    }
                }
            }
        }

        matches
    }
}

/// Splits the typed operand into the directory part (everything up to and
/// including the last `/`) and the name prefix being completed.
fn split_input(incomplete: &str) -> (String, String) {
    match incomplete.rfind('/') {
        Some(idx) => (
            incomplete[..=idx].to_string(),
            incomplete[idx + 1..].to_string(),
        ),
        None => (String::new(), incomplete.to_string()),
    }
}

fn make_pair(typed_dir: &str, name: &str, path: &Path) -> Pair {
    let completed = format!("{}{}", typed_dir, name);
    if path.is_dir() {
        Pair {
            display: format!("{}/", completed),
            replacement: format!("{}/", completed),
        }
    } else {
        Pair {
            display: completed.clone(),
            replacement: format!("{} ", completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("ostium_pathcomp_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_split_input() {
        assert_eq!(split_input("sub/fi"), ("sub/".to_string(), "fi".to_string()));
        assert_eq!(split_input("fi"), (String::new(), "fi".to_string()));
        assert_eq!(split_input("a/b/"), ("a/b/".to_string(), String::new()));
    }

    #[test]
    fn test_completes_relative_to_base() {
        let base = scratch_dir("base");
        fs::write(base.join("alpha.txt"), "").unwrap();
        fs::create_dir(base.join("albums")).unwrap();

        let completer = PathCompleter::new();
        let matches = completer.complete_path("al", &base);
        let names: Vec<&str> = matches.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(names, vec!["albums/", "alpha.txt"]);

        fs::remove_dir_all(base).unwrap();
    }

    #[test]
    fn test_directory_replacement_keeps_typed_prefix() {
        let base = scratch_dir("typed");
        fs::create_dir_all(base.join("sub").join("inner")).unwrap();

        let completer = PathCompleter::new();
        let matches = completer.complete_path("sub/in", &base);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].replacement, "sub/inner/");

        fs::remove_dir_all(base).unwrap();
    }

    #[test]
    fn test_unreadable_dir_yields_nothing() {
        let completer = PathCompleter::new();
        let matches = completer.complete_path("does_not_exist/x", Path::new("/nonexistent_base"));
        assert!(matches.is_empty());
    }
}
