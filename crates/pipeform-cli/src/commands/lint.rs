//! Configuration linting command.

use anyhow::Result;

use super::load_file;

/// Validate a configuration file, reporting every problem found in one pass.
pub fn lint(path: &str, inputs: &[String], env: &[String]) -> Result<()> {
    let outcome = load_file(path, inputs, env)?;

    if outcome.is_valid() {
        println!("Configuration is valid");
        Ok(())
    } else {
        println!("Configuration is invalid:");
        for error in outcome.errors() {
            println!("  - {error}");
        }
        std::process::exit(1);
    }
}
