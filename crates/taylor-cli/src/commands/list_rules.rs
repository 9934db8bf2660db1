//! List rules command implementation.

use anyhow::Result;
use taylor_rules::{all_rules, configured_rules};

use crate::config_resolver::ConfigSource;

/// Runs the list-rules command, showing the limits in effect.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let active = configured_rules(&config);

    println!("Available rules:\n");
    println!("{:<24} {:>6} {:>8}  Description", "Name", "Limit", "Priority");
    println!("{}", "-".repeat(90));

    for rule in all_rules() {
        match active.iter().find(|r| r.name() == rule.name()) {
            Some(configured) => println!(
                "{:<24} {:>6} {:>8}  {}",
                configured.name(),
                configured.limit(),
                format!("P{}", configured.priority()),
                configured.description()
            ),
            None => println!(
                "{:<24} {:>6} {:>8}  {}",
                rule.name(),
                "-",
                "off",
                rule.description()
            ),
        }
    }

    if let Some(path) = source.path() {
        println!("\nConfiguration: {}", path.display());
    }
    println!("\nOverride a limit for one run, e.g.:");
    println!("  taylor check --rc NPathComplexity=200 --rc ExcessiveMethodLength=40");

    Ok(())
}
