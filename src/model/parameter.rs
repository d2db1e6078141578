//! Parameter declarations
//!
//! A parameter is identified by its name. The range is advisory: it only
//! feeds interpolation thresholds and clip constants and is never enforced
//! on the live value.

use serde::{Deserialize, Serialize};

fn default_max() -> f32 {
    1.0
}

/// A named float parameter with a declared range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    #[serde(default)]
    min: f32,
    #[serde(default = "default_max")]
    max: f32,
}

impl Parameter {
    /// Create a parameter with an explicit range
    pub fn new(name: impl Into<String>, min: f32, max: f32) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// Create a parameter declared over `0..=1`
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, 1.0)
    }

    /// Get the parameter name (its identity)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared lower bound
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Get the declared upper bound
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Check that `min <= max`. NaN bounds fail this check.
    pub fn has_ordered_range(&self) -> bool {
        self.min <= self.max
    }

    /// Check that both bounds are finite
    pub fn has_finite_range(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}
