//! BlendMath - Parameter Arithmetic Compiler
//!
//! Compiles simple arithmetic between named float parameters
//! (`output = f(input1, input2)` for remap, add, sub, mul and div) into
//! graphs built from the only two primitives the target substrate offers:
//! weighted mixing and threshold-driven 1D interpolation.
//!
//! # Architecture
//!
//! - `model`: parameters, operation records, target layers
//! - `compiler`: per-kind lowering into node subtrees
//! - `assembler`: shared additive root vs dedicated layers
//! - `emit`: serializable controller assets for the host
//! - `pipeline`: one complete build pass
//! - `simulate`: reference model of the substrate for verification

pub mod assembler;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod model;
pub mod pipeline;
pub mod simulate;

pub use config::{BuildDescription, CompilerOptions, RuleSet};
pub use error::{BlendMathError, Result};
