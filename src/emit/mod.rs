//! Emission Adapter
//!
//! Structural mapping from assembled layers to the host's controller
//! format. Shared nodes (by `Rc` identity) are emitted once.

mod asset;

pub use asset::{
    ControllerAsset, CurveAsset, DirectChild, LayerAsset, MotionAsset, MotionRef, ParameterDecl,
    StateAsset, ThresholdChild,
};

use std::collections::HashMap;
use std::rc::Rc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::assembler::AssembledTarget;
use crate::config::CompilerOptions;
use crate::error::Result;
use crate::graph::Node;

/// Builds the motion table, one entry per distinct node
struct MotionTable {
    motions: Vec<MotionAsset>,
    index: HashMap<*const Node, MotionRef>,
}

impl MotionTable {
    fn new() -> Self {
        Self {
            motions: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Emit `node` after its children and return its index
    fn insert(&mut self, node: &Rc<Node>) -> MotionRef {
        let key = Rc::as_ptr(node);
        if let Some(&existing) = self.index.get(&key) {
            return existing;
        }

        let motion = match node.as_ref() {
            Node::Constant {
                name,
                parameter,
                value,
            } => MotionAsset::Clip {
                name: name.clone(),
                curves: vec![CurveAsset {
                    parameter: parameter.clone(),
                    value: *value,
                }],
            },
            Node::Empty { name } => MotionAsset::Clip {
                name: name.clone(),
                curves: Vec::new(),
            },
            Node::Interpolate1D {
                name,
                driver,
                t0,
                start,
                t1,
                end,
            } => {
                let start = self.insert(start);
                let end = self.insert(end);
                MotionAsset::Simple1D {
                    name: name.clone(),
                    parameter: driver.clone(),
                    children: vec![
                        ThresholdChild {
                            threshold: *t0,
                            motion: start,
                        },
                        ThresholdChild {
                            threshold: *t1,
                            motion: end,
                        },
                    ],
                }
            }
            Node::Mix {
                name,
                children,
                normalized,
            } => {
                let children = children
                    .iter()
                    .map(|child| DirectChild {
                        parameter: child.weight.clone(),
                        motion: self.insert(&child.node),
                    })
                    .collect();
                MotionAsset::Direct {
                    name: name.clone(),
                    normalized: *normalized,
                    children,
                }
            }
        };

        let index = self.motions.len();
        self.motions.push(motion);
        self.index.insert(key, index);
        index
    }
}

/// Translate one assembled target into a controller asset
///
/// Parameters are declared with default 0, except the unit parameter,
/// which defaults to 1.
pub fn emit_target(assembled: &AssembledTarget, options: &CompilerOptions) -> Result<ControllerAsset> {
    let mut table = MotionTable::new();
    let layers = assembled
        .layers
        .iter()
        .map(|layer| LayerAsset {
            name: layer.name.clone(),
            default_weight: 1.0,
            state: StateAsset {
                name: layer.name.clone(),
                motion: table.insert(&layer.tree),
                write_defaults: options.write_defaults,
            },
        })
        .collect();

    let parameters = assembled
        .parameters
        .iter()
        .map(|name| ParameterDecl {
            name: name.clone(),
            default_value: if *name == options.one_parameter { 1.0 } else { 0.0 },
        })
        .collect();

    let mut asset = ControllerAsset {
        name: options.name_prefix.clone(),
        target_layer: assembled.target,
        match_write_defaults: options.match_write_defaults,
        parameters,
        layers,
        motions: table.motions,
        fingerprint: String::new(),
    };
    debug_assert!(asset.is_well_formed(), "{} emitted a malformed controller", assembled.target);
    asset.fingerprint = fingerprint(&asset)?;

    debug!(
        layer = %assembled.target,
        motions = asset.motions.len(),
        fingerprint = %asset.fingerprint,
        "emitted controller"
    );
    Ok(asset)
}

/// SHA-256 over the canonical JSON form with the fingerprint blanked
pub fn fingerprint(asset: &ControllerAsset) -> Result<String> {
    let mut canonical = asset.clone();
    canonical.fingerprint.clear();
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
