//! CLI Module
//!
//! Command-line interface for the BlendMath compiler.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::Locale;

/// BlendMath - compile parameter arithmetic into blend graphs
#[derive(Parser, Debug)]
#[command(name = "blendmath")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a build description into controller assets
    #[command(name = "compile")]
    Compile {
        /// Path to the build description (JSON)
        description: PathBuf,

        /// Write assets here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a build description without emitting anything
    #[command(name = "check")]
    Check {
        /// Path to the build description (JSON)
        description: PathBuf,
    },

    /// Evaluate the compiled layers for given parameter values
    #[command(name = "preview")]
    Preview {
        /// Path to the build description (JSON)
        description: PathBuf,

        /// Parameter value as NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_parser = parse_assignment)]
        set: Vec<(String, f32)>,
    },

    /// List the supported operation kinds
    #[command(name = "kinds")]
    Kinds {
        /// Label language
        #[arg(long, value_enum, default_value_t = LocaleArg::En)]
        locale: LocaleArg,
    },
}

/// Label language as accepted on the command line
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleArg {
    En,
    Ja,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::Ja => Locale::Ja,
        }
    }
}

/// Parse `NAME=VALUE`
pub fn parse_assignment(raw: &str) -> std::result::Result<(String, f32), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{}'", raw));
    }
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value in '{}': {}", raw, e))?;
    Ok((name.to_string(), value))
}
