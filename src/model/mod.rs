//! Compiler Inputs
//!
//! Read-only records collected once per build pass:
//! - Parameters: named scalar channels with advisory ranges
//! - Operations: one arithmetic instruction each
//! - Target layers: the grouping key for emitted controllers

mod operation;
mod parameter;
mod target;

pub use operation::{Locale, Operation, OperationKind};
pub use parameter::Parameter;
pub use target::TargetLayer;
