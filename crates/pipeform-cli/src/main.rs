//! pipeform CLI tool.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Format;

#[derive(Parser)]
#[command(name = "pipeform")]
#[command(about = "Parameterized pipeline configuration tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Lint {
        /// Path to the configuration file
        path: String,
        /// Input argument as NAME=VALUE (repeatable)
        #[arg(long = "input", value_name = "NAME=VALUE")]
        inputs: Vec<String>,
        /// Environment variable as NAME=VALUE (repeatable)
        #[arg(long = "env", value_name = "NAME=VALUE")]
        env: Vec<String>,
    },
    /// Render the interpolated configuration
    Render {
        /// Path to the configuration file
        path: String,
        /// Input argument as NAME=VALUE (repeatable)
        #[arg(long = "input", value_name = "NAME=VALUE")]
        inputs: Vec<String>,
        /// Environment variable as NAME=VALUE (repeatable)
        #[arg(long = "env", value_name = "NAME=VALUE")]
        env: Vec<String>,
        /// Output format
        #[arg(long, env = "PIPEFORM_FORMAT", value_enum, default_value = "yaml")]
        format: Format,
    },
    /// List the inputs declared by a configuration file
    Inputs {
        /// Path to the configuration file
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lint { path, inputs, env } => {
            commands::lint(&path, &inputs, &env)?;
        }
        Commands::Render {
            path,
            inputs,
            env,
            format,
        } => {
            commands::render(&path, &inputs, &env, format)?;
        }
        Commands::Inputs { path } => {
            commands::inputs(&path)?;
        }
    }

    Ok(())
}
