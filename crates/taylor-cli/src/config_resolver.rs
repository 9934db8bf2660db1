//! Locating and loading the configuration file.
//!
//! Lookup order:
//!
//! 1. `--config` flag
//! 2. `taylor.toml`, then `.taylor.toml`, in the project directory
//! 3. `config.toml` in `$TAYLOR_CONFIG_DIR`, or in `~/.taylor/`
//! 4. built-in defaults

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use taylor_core::Config;
use tracing::{debug, info};

const PROJECT_FILES: &[&str] = &["taylor.toml", ".taylor.toml"];
const GLOBAL_FILE: &str = "config.toml";
const GLOBAL_DIR_VAR: &str = "TAYLOR_CONFIG_DIR";

/// Origin of the configuration in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; not checked for existence.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the user's global directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// File backing this source, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            debug!("No configuration file, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Finds the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    find(project_dir, explicit, global_config_dir().as_deref())
}

fn find(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let project = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file());
    if let Some(path) = project {
        debug!("Found project config: {}", path.display());
        return ConfigSource::Project(path);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_FILE)) {
        Some(path) if path.is_file() => {
            debug!("Found global config: {}", path.display());
            ConfigSource::Global(path)
        }
        _ => ConfigSource::Default,
    }
}

/// Directory holding the global configuration.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(GLOBAL_DIR_VAR)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".taylor")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        fs::write(path, content).expect("write config");
    }

    #[test]
    fn explicit_path_is_used_even_if_missing() {
        let project = TempDir::new().expect("tempdir");
        touch(&project.path().join("taylor.toml"), "");

        let source = find(project.path(), Some(Path::new("/nope/taylor.toml")), None);
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/nope/taylor.toml")));
        assert!(source.load().is_err());
    }

    #[test]
    fn plain_name_wins_over_dotfile() {
        let project = TempDir::new().expect("tempdir");
        touch(&project.path().join(".taylor.toml"), "");
        assert_eq!(
            find(project.path(), None, None),
            ConfigSource::Project(project.path().join(".taylor.toml"))
        );

        touch(&project.path().join("taylor.toml"), "");
        assert_eq!(
            find(project.path(), None, None),
            ConfigSource::Project(project.path().join("taylor.toml"))
        );
    }

    #[test]
    fn global_is_a_fallback() {
        let project = TempDir::new().expect("tempdir");
        let global = TempDir::new().expect("tempdir");

        assert_eq!(find(project.path(), None, Some(global.path())), ConfigSource::Default);

        touch(&global.path().join("config.toml"), "");
        assert_eq!(
            find(project.path(), None, Some(global.path())),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        touch(&project.path().join("taylor.toml"), "");
        assert!(matches!(
            find(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn a_directory_named_like_the_config_is_ignored() {
        let project = TempDir::new().expect("tempdir");
        fs::create_dir(project.path().join("taylor.toml")).expect("mkdir");
        assert_eq!(find(project.path(), None, None), ConfigSource::Default);
    }

    #[test]
    fn load_reads_rules() {
        let project = TempDir::new().expect("tempdir");
        touch(
            &project.path().join("taylor.toml"),
            "[rules.NPathComplexity]\nlimit = 50\n",
        );

        let config = find(project.path(), None, None).load().expect("config loads");
        assert_eq!(config.rule_config("NPathComplexity").and_then(|c| c.limit), Some(50));
    }

    #[test]
    fn default_loads_defaults() {
        let config = ConfigSource::Default.load().expect("defaults");
        assert!(config.rules.is_empty());
        assert_eq!(ConfigSource::Default.path(), None);
    }
}
