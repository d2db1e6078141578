//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::BuildDescription;
use crate::error::{BlendMathError, Result};
use crate::model::{Locale, OperationKind};
use crate::pipeline;
use crate::simulate::{run_frame, ParameterValues};

/// Compile a description and write the controller assets as JSON.
pub fn compile(description_path: &Path, output: Option<&Path>, pretty: bool) -> Result<()> {
    info!("Compiling: {}", description_path.display());

    let description = BuildDescription::load(description_path)?;
    let controllers = pipeline::build(&description)?;

    let json = if pretty {
        serde_json::to_string_pretty(&controllers)?
    } else {
        serde_json::to_string(&controllers)?
    };

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!(
                "Wrote {} controller(s) to {}",
                controllers.len(),
                path.display()
            );
            for controller in &controllers {
                println!(
                    "  {}: {} layer(s), {} parameter(s), sha256 {}",
                    controller.target_layer,
                    controller.layers.len(),
                    controller.parameters.len(),
                    controller.fingerprint
                );
            }
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Validate a description.
pub fn check(description_path: &Path) -> Result<()> {
    info!("Checking: {}", description_path.display());

    let description = BuildDescription::load(description_path)?;
    match pipeline::check(&description) {
        Ok(()) => {
            println!(
                "OK: {} operation(s) in {} rule set(s)",
                description.operation_count(),
                description.rule_sets.len()
            );
            Ok(())
        }
        Err(err) => {
            print_error(&err);
            Err(err)
        }
    }
}

/// Evaluate one frame of every target with the given parameter values.
pub fn preview(description_path: &Path, assignments: &[(String, f32)]) -> Result<()> {
    info!("Previewing: {}", description_path.display());

    let description = BuildDescription::load(description_path)?;
    let inputs: ParameterValues = assignments.iter().cloned().collect();

    for target in pipeline::assemble(&description)? {
        println!("[{}]", target.target);
        let state = run_frame(&target, &inputs, &description.options.one_parameter);
        for name in &target.parameters {
            if *name == description.options.one_parameter {
                continue;
            }
            if let Some(value) = state.get(name) {
                println!("  {} = {}", name, value);
            }
        }
    }

    Ok(())
}

/// Print the operation kind table.
pub fn kinds(locale: Locale) -> Result<()> {
    for kind in OperationKind::ALL {
        let mode = if kind.supports_1d() { "1d, weighted" } else { "weighted" };
        let operands = if kind.requires_input2() { 2 } else { 1 };
        println!(
            "{:<6} {:<20} inputs: {}  modes: {}",
            kind,
            kind.label(locale),
            operands,
            mode
        );
    }
    Ok(())
}

/// Print an error with its code and recovery suggestions.
pub fn print_error(err: &BlendMathError) {
    eprintln!("error[{}]: {}", err.error_code(), err);
    for suggestion in err.recovery_suggestions() {
        eprintln!("  hint: {}", suggestion);
    }
}
