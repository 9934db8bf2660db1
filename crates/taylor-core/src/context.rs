//! Context types for per-file analysis.

use std::path::{Path, PathBuf};

/// Context of the file being analysed.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the file as discovered.
    pub path: &'a Path,
    /// Path relative to the analysis root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        Self {
            path,
            relative_path,
        }
    }

    /// Path written into violations.
    #[must_use]
    pub fn report_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let ctx = FileContext::new(Path::new("/project/Sources/App.swift"), Path::new("/project"));
        assert_eq!(ctx.relative_path, PathBuf::from("Sources/App.swift"));
        assert_eq!(ctx.report_path(), "/project/Sources/App.swift");
    }

    #[test]
    fn test_path_outside_root_is_kept() {
        let ctx = FileContext::new(Path::new("/elsewhere/App.swift"), Path::new("/project"));
        assert_eq!(ctx.relative_path, PathBuf::from("/elsewhere/App.swift"));
    }
}
