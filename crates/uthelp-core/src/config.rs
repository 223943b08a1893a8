use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_ROOT_DIR_NAME: &str = "uthelp";

/// Start parameters for a menu session. There is no config file; the root
/// comes from the command line, the environment or the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    pub root: PathBuf,
    /// How many leading lines of a script are scanned for its description.
    pub description_lines: usize,
    /// Comment lines of this length or shorter are skipped.
    pub min_comment_len: usize,
    /// Upper bound for the description panel width, in columns.
    pub description_width: u16,
}

impl MenuConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            description_lines: 6,
            min_comment_len: 3,
            description_width: 50,
        }
    }

    /// Explicit root wins, otherwise `<cwd>/uthelp`.
    pub fn resolve(explicit_root: Option<PathBuf>, cwd: &Path) -> Self {
        let root = match explicit_root {
            Some(root) if root.is_absolute() => root,
            Some(root) => cwd.join(root),
            None => cwd.join(DEFAULT_ROOT_DIR_NAME),
        };
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_root_is_uthelp_under_cwd() {
        let config = MenuConfig::resolve(None, Path::new("/work"));
        assert_eq!(config.root, PathBuf::from("/work/uthelp"));
        assert_eq!(config.description_lines, 6);
    }

    #[test]
    fn relative_root_is_joined_to_cwd() {
        let config = MenuConfig::resolve(Some(PathBuf::from("tools/menu")), Path::new("/work"));
        assert_eq!(config.root, PathBuf::from("/work/tools/menu"));
    }

    #[test]
    fn absolute_root_is_kept() {
        let config = MenuConfig::resolve(Some(PathBuf::from("/opt/scripts")), Path::new("/work"));
        assert_eq!(config.root, PathBuf::from("/opt/scripts"));
    }
}
