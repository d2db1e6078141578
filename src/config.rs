//! Build configuration
//!
//! A build description is a JSON document holding compiler options and an
//! ordered list of rule sets, each attached to one target layer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BlendMathError, Result};
use crate::model::{Operation, TargetLayer};

/// Default prefix for node and controller names
pub const DEFAULT_NAME_PREFIX: &str = "BlendMath";

/// Default name of the synthetic always-1 parameter
pub const DEFAULT_ONE_PARAMETER: &str = "__BlendMath__One__";

/// Options shared by every target layer of a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Prefix for every node name and the controller name
    pub name_prefix: String,
    /// Name of the unit-weight parameter (declared with default 1)
    pub one_parameter: String,
    /// Written on every emitted state
    pub write_defaults: bool,
    /// Forwarded to the host merge step
    pub match_write_defaults: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            one_parameter: DEFAULT_ONE_PARAMETER.to_string(),
            write_defaults: true,
            match_write_defaults: false,
        }
    }
}

/// Operations attached to one target layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Optional label, for diagnostics only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub target_layer: TargetLayer,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl RuleSet {
    pub fn new(target_layer: TargetLayer, operations: Vec<Operation>) -> Self {
        Self {
            name: None,
            target_layer,
            operations,
        }
    }
}

/// A complete build input
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildDescription {
    #[serde(default)]
    pub options: CompilerOptions,
    #[serde(default)]
    pub rule_sets: Vec<RuleSet>,
}

impl BuildDescription {
    /// Parse a description from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a description file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BlendMathError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Total number of operations across all rule sets
    pub fn operation_count(&self) -> usize {
        self.rule_sets.iter().map(|r| r.operations.len()).sum()
    }
}
