use crate::error::ShellError;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expands a leading tilde; any other input passes through untouched.
    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    /// Expands `raw` and anchors relative results at `base`. Absolute and
    /// tilde-prefixed inputs ignore `base`.
    pub fn resolve(&self, base: &Path, raw: &str) -> Result<PathBuf, ShellError> {
        let expanded = self.expand(raw)?;
        if expanded.is_absolute() {
            Ok(expanded)
        } else {
            Ok(base.join(expanded))
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.len() == 1 {
            return dirs::home_dir().ok_or(ShellError::HomeDirNotFound);
        }

        match path[1..].strip_prefix('/') {
            Some(rest) => {
                let mut home = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
                for part in rest.split('/').filter(|p| !p.is_empty()) {
                    home.push(part);
                }
                Ok(home)
            }
            // "~user/path" is not supported
            None => Ok(Path::new(path).to_path_buf()),
        }
    }

    pub fn get_home_dir(&self) -> Result<PathBuf, ShellError> {
        dirs::home_dir().ok_or(ShellError::HomeDirNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_path() {
        let expander = PathExpander::new();
        assert_eq!(
            expander.expand("some/dir").unwrap(),
            PathBuf::from("some/dir")
        );
    }

    #[test]
    fn test_expand_bare_tilde() {
        let expander = PathExpander::new();
        assert_eq!(expander.expand("~").unwrap(), dirs::home_dir().unwrap());
    }

    #[test]
    fn test_expand_tilde_subpath() {
        let expander = PathExpander::new();
        let expected = dirs::home_dir().unwrap().join("notes").join("todo.txt");
        assert_eq!(expander.expand("~/notes/todo.txt").unwrap(), expected);
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let expander = PathExpander::new();
        let base = Path::new("/srv/work");
        assert_eq!(
            expander.resolve(base, "sub/file").unwrap(),
            PathBuf::from("/srv/work/sub/file")
        );
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let expander = PathExpander::new();
        let base = Path::new("/srv/work");
        assert_eq!(
            expander.resolve(base, "/etc/hosts").unwrap(),
            PathBuf::from("/etc/hosts")
        );
    }

    #[test]
    fn test_resolve_tilde_ignores_base() {
        let expander = PathExpander::new();
        let base = Path::new("/srv/work");
        let expected = dirs::home_dir().unwrap().join("x");
        assert_eq!(expander.resolve(base, "~/x").unwrap(), expected);
    }
}
