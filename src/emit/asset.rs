//! Serializable controller asset handed to the host runtime
//!
//! Motions live in one table and are referenced by index. A motion only
//! references motions with a lower index, so the table is acyclic by
//! construction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::TargetLayer;

/// Index into `ControllerAsset::motions`
pub type MotionRef = usize;

/// A declared float parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    pub default_value: f32,
}

/// One animated curve of a clip, held at a constant value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveAsset {
    pub parameter: String,
    pub value: f32,
}

/// A child of a 1D blend tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdChild {
    pub threshold: f32,
    pub motion: MotionRef,
}

/// A child of a direct blend tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectChild {
    pub parameter: String,
    pub motion: MotionRef,
}

/// A motion: constant clip or blend tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionAsset {
    Clip {
        name: String,
        curves: Vec<CurveAsset>,
    },
    Simple1D {
        name: String,
        parameter: String,
        children: Vec<ThresholdChild>,
    },
    Direct {
        name: String,
        normalized: bool,
        children: Vec<DirectChild>,
    },
}

impl MotionAsset {
    pub fn name(&self) -> &str {
        match self {
            MotionAsset::Clip { name, .. }
            | MotionAsset::Simple1D { name, .. }
            | MotionAsset::Direct { name, .. } => name,
        }
    }

    fn references(&self) -> Vec<MotionRef> {
        match self {
            MotionAsset::Clip { .. } => Vec::new(),
            MotionAsset::Simple1D { children, .. } => children.iter().map(|c| c.motion).collect(),
            MotionAsset::Direct { children, .. } => children.iter().map(|c| c.motion).collect(),
        }
    }

    fn parameters(&self) -> Vec<&str> {
        match self {
            MotionAsset::Clip { curves, .. } => curves.iter().map(|c| c.parameter.as_str()).collect(),
            MotionAsset::Simple1D { parameter, .. } => vec![parameter.as_str()],
            MotionAsset::Direct { children, .. } => {
                children.iter().map(|c| c.parameter.as_str()).collect()
            }
        }
    }
}

/// The single state of a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAsset {
    pub name: String,
    pub motion: MotionRef,
    pub write_defaults: bool,
}

/// One emitted layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerAsset {
    pub name: String,
    pub default_weight: f32,
    pub state: StateAsset,
}

/// Everything emitted for one target layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerAsset {
    pub name: String,
    pub target_layer: TargetLayer,
    pub match_write_defaults: bool,
    pub parameters: Vec<ParameterDecl>,
    pub layers: Vec<LayerAsset>,
    pub motions: Vec<MotionAsset>,
    /// SHA-256 of the asset serialized with an empty fingerprint
    pub fingerprint: String,
}

impl ControllerAsset {
    /// Look up a declared parameter
    pub fn parameter(&self, name: &str) -> Option<&ParameterDecl> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Check the structural guarantees of the asset: every reference points
    /// to an earlier motion (hence acyclic and finite), every state points
    /// into the table, and every parameter used is declared.
    pub fn is_well_formed(&self) -> bool {
        let declared: HashSet<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();

        let motions_ok = self.motions.iter().enumerate().all(|(index, motion)| {
            motion.references().into_iter().all(|r| r < index)
                && motion.parameters().into_iter().all(|p| declared.contains(p))
        });
        let states_ok = self
            .layers
            .iter()
            .all(|layer| layer.state.motion < self.motions.len());

        motions_ok && states_ok
    }
}
