//! BlendMath CLI
//!
//! Command-line interface for the BlendMath compiler.

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use blendmath::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("BlendMath v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("BlendMath v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Compile {
            description,
            output,
            pretty,
        } => commands::compile(&description, output.as_deref(), pretty)
            .with_context(|| format!("compiling {}", description.display())),
        Commands::Check { description } => commands::check(&description)
            .with_context(|| format!("checking {}", description.display())),
        Commands::Preview { description, set } => commands::preview(&description, &set)
            .with_context(|| format!("previewing {}", description.display())),
        Commands::Kinds { locale } => Ok(commands::kinds(locale.into())?),
    }
}
