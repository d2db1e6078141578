//! Error handling for BlendMath
//!
//! Configuration errors identify the offending operation by its position
//! within the target layer so a caller can fix the input and re-run the pass.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{OperationKind, TargetLayer};

/// Result type alias for BlendMath operations
pub type Result<T> = std::result::Result<T, BlendMathError>;

/// Which parameter slot of an operation an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSlot {
    Input1,
    Input2,
    Output,
}

impl std::fmt::Display for ParameterSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterSlot::Input1 => write!(f, "input1"),
            ParameterSlot::Input2 => write!(f, "input2"),
            ParameterSlot::Output => write!(f, "output"),
        }
    }
}

/// Main error type for BlendMath operations
#[derive(Error, Debug)]
pub enum BlendMathError {
    // Configuration Errors
    #[error("{target} operation #{index} ({kind}) writing '{output}' requires input2")]
    MissingInput {
        target: TargetLayer,
        index: usize,
        kind: OperationKind,
        output: String,
    },

    #[error("{target} operation #{index}: parameter '{parameter}' has min {min} greater than max {max}")]
    InvertedRange {
        target: TargetLayer,
        index: usize,
        parameter: String,
        min: f32,
        max: f32,
    },

    #[error("{target} operation #{index}: parameter '{parameter}' has non-finite range {min}..{max}")]
    NonFiniteRange {
        target: TargetLayer,
        index: usize,
        parameter: String,
        min: f32,
        max: f32,
    },

    #[error("{target} operation #{index} ({kind}) would write non-finite constant {value} to '{parameter}'")]
    NonFiniteConstant {
        target: TargetLayer,
        index: usize,
        kind: OperationKind,
        parameter: String,
        value: f32,
    },

    #[error("{target} operation #{index}: {slot} has an empty parameter name")]
    EmptyParameterName {
        target: TargetLayer,
        index: usize,
        slot: ParameterSlot,
    },

    // Description Errors
    #[error("Failed to read build description {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlendMathError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            BlendMathError::MissingInput { .. } => "MISSING_INPUT",
            BlendMathError::InvertedRange { .. } => "INVERTED_RANGE",
            BlendMathError::NonFiniteRange { .. } => "NON_FINITE_RANGE",
            BlendMathError::NonFiniteConstant { .. } => "NON_FINITE_CONSTANT",
            BlendMathError::EmptyParameterName { .. } => "EMPTY_PARAMETER_NAME",
            BlendMathError::ConfigRead { .. } => "CONFIG_READ",
            BlendMathError::Io(_) => "IO_ERROR",
            BlendMathError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error was caused by the operation records themselves
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BlendMathError::MissingInput { .. }
                | BlendMathError::InvertedRange { .. }
                | BlendMathError::NonFiniteRange { .. }
                | BlendMathError::NonFiniteConstant { .. }
                | BlendMathError::EmptyParameterName { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            BlendMathError::MissingInput { .. } => vec![
                "Add, Sub and Mul need both input1 and input2",
                "Use Remap if only one input is intended",
            ],
            BlendMathError::InvertedRange { .. } => vec![
                "Swap the min and max values of the parameter",
                "Ranges must be finite numbers",
            ],
            BlendMathError::NonFiniteRange { .. } => vec![
                "Ranges must be finite numbers",
                "Replace infinite or NaN bounds with the real limits of the parameter",
            ],
            BlendMathError::NonFiniteConstant { .. } => vec![
                "The product of both input maxima must fit in a 32-bit float",
                "Narrow the input ranges or use the weighted Mul strategy",
            ],
            BlendMathError::EmptyParameterName { .. } => {
                vec!["Give every used parameter a name"]
            }
            BlendMathError::ConfigRead { .. } => vec![
                "Check the description path is correct",
                "Verify the file is readable",
            ],
            BlendMathError::Serialization(_) => vec![
                "Check the description is valid JSON",
                "Operation kinds are: remap, add, sub, mul, div",
            ],
            BlendMathError::Io(_) => vec![],
        }
    }
}
