//! Graph Assembler
//!
//! Turns the operations of one target layer into runtime layers:
//! - Unnormalized mix results fold into one shared additive root
//! - Interpolation roots and normalized mixes each get a dedicated layer
//!
//! The shared layer, when present, comes first. Constant leaves on disjoint
//! output channels sum without interfering, which is what makes the shared
//! root sound.

mod layer;

pub use layer::{AssembledTarget, Layer, LayerBuilder, LayerKind};

use tracing::info;

use crate::compiler::{validate_all, OperationCompiler};
use crate::config::CompilerOptions;
use crate::error::Result;
use crate::model::{Operation, TargetLayer};

/// Compile and assemble every operation of one target layer
///
/// All operations are checked before any node is built, so a failure
/// yields no partial result. An empty operation list yields no layers.
pub fn assemble_target(
    target: TargetLayer,
    operations: &[Operation],
    options: &CompilerOptions,
) -> Result<AssembledTarget> {
    validate_all(target, operations)?;

    let mut compiler = OperationCompiler::new(options);
    let mut builder = LayerBuilder::new(target, options);
    for (index, op) in operations.iter().enumerate() {
        let compiled = compiler.compile(target, index, op)?;
        builder.push(compiled);
    }
    let assembled = builder.finish(compiler.leaves().len());

    info!(
        layer = %target,
        operations = operations.len(),
        layers = assembled.layers.len(),
        parameters = assembled.parameters.len(),
        leaves = assembled.leaf_count,
        "assembled target layer"
    );
    Ok(assembled)
}
