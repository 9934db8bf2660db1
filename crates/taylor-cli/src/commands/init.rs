//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "taylor.toml";

const DEFAULT_CONFIG: &str = r#"# taylor configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./Sources"

# Glob patterns to exclude from analysis
exclude = [
    "**/Pods/**",
    "**/Carthage/**",
]

# Respect .gitignore files
respect_gitignore = true

# Number of worker threads (default: one per core)
# parallelism = 4

# Rule configurations
# Each rule can be disabled and have its limit and priority (1-4) overridden

[rules.ExcessiveMethodLength]
limit = 20

[rules.ExcessiveClassLength]
limit = 400

[rules.TooManyMethods]
limit = 10

[rules.CyclomaticComplexity]
limit = 5
priority = 2

[rules.NestedBlockDepth]
limit = 3

[rules.NPathComplexity]
limit = 100
priority = 2

[rules.ExcessiveParameterList]
limit = 3
# enabled = false
"#;

/// Runs the init command in the current directory.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or on write failure.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to adjust rule limits");
    println!("  2. Generate structure dumps: sourcekitten structure --file <file> > <file>.structure.json");
    println!("  3. Run: taylor check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
