//! Rendering command: print the fully interpolated configuration.

use anyhow::Result;

use super::{Format, load_file};

pub fn render(path: &str, inputs: &[String], env: &[String], format: Format) -> Result<()> {
    let outcome = load_file(path, inputs, env)?;

    if !outcome.is_valid() {
        println!("Configuration is invalid:");
        for error in outcome.errors() {
            println!("  - {error}");
        }
        std::process::exit(1);
    }

    if let Some(content) = outcome.into_content() {
        match format {
            Format::Yaml => print!("{}", serde_yaml::to_string(&content.into_yaml())?),
            Format::Json => println!("{}", serde_json::to_string_pretty(&content.to_json())?),
        }
    }
    Ok(())
}
