//! Operation Compiler
//!
//! Lowers one operation record into a node subtree plus the set of
//! parameters it reads or writes. One strategy per kind and mode; see
//! `strategies` for the shapes.
//!
//! No strategy clamps live values. The weighted-sum strategies treat their
//! inputs as weights, so inputs outside the declared range produce outputs
//! outside the declared range. Only 1D interpolation clamps, at its
//! thresholds.

mod strategies;
mod validate;

use std::rc::Rc;

use indexmap::IndexSet;
use tracing::debug;

use crate::config::CompilerOptions;
use crate::error::{BlendMathError, Result};
use crate::graph::{LeafCache, Node};
use crate::model::{Operation, OperationKind, TargetLayer};
use strategies::Sign;

pub use validate::{validate_all, validate_operation};

/// Result of compiling one operation
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub node: Rc<Node>,
    /// Every parameter the subtree depends on, in first-use order
    pub required: IndexSet<String>,
}

/// Compiles operations for one target layer within one pass
///
/// Owns the pass's leaf cache, so constant leaves are shared between all
/// operations compiled by the same instance.
#[derive(Debug)]
pub struct OperationCompiler<'a> {
    options: &'a CompilerOptions,
    leaves: LeafCache,
}

impl<'a> OperationCompiler<'a> {
    pub fn new(options: &'a CompilerOptions) -> Self {
        Self {
            options,
            leaves: LeafCache::new(options.name_prefix.clone()),
        }
    }

    /// Compile one operation after checking it
    pub fn compile(&mut self, target: TargetLayer, index: usize, op: &Operation) -> Result<Compiled> {
        validate_operation(target, index, op)?;

        let use_1d = op.use_1d_effective();
        let compiled = match (op.kind, op.input2.as_ref()) {
            (OperationKind::Remap, _) => self.remap(op, use_1d),
            (OperationKind::Add, Some(input2)) => self.add_sub(op, input2, Sign::Plus, use_1d),
            (OperationKind::Sub, Some(input2)) => self.add_sub(op, input2, Sign::Minus, use_1d),
            (OperationKind::Mul, Some(input2)) => self.mul(op, input2, use_1d),
            (OperationKind::Div, _) => self.div(op),
            (kind @ (OperationKind::Add | OperationKind::Sub | OperationKind::Mul), None) => {
                return Err(BlendMathError::MissingInput {
                    target,
                    index,
                    kind,
                    output: op.output.name().to_string(),
                })
            }
        };

        debug!(
            layer = %target,
            index,
            kind = %op.kind,
            use_1d,
            output = op.output.name(),
            "compiled {}",
            compiled.node.name()
        );
        Ok(compiled)
    }

    /// The leaf cache of this pass
    pub fn leaves(&self) -> &LeafCache {
        &self.leaves
    }

    /// Name for a non-leaf node
    fn node_name(&self, label: &str) -> String {
        format!("{} {}", self.options.name_prefix, label)
    }
}
