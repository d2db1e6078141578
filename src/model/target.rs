//! Target layer identifiers

use serde::{Deserialize, Serialize};

/// Host evaluation layer an operation's graph is attached to
///
/// Operations are grouped by this key only; each distinct value yields
/// its own emitted controller.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TargetLayer {
    Base,
    Additive,
    Gesture,
    Action,
    #[default]
    Fx,
}

impl std::fmt::Display for TargetLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TargetLayer::Base => "Base",
            TargetLayer::Additive => "Additive",
            TargetLayer::Gesture => "Gesture",
            TargetLayer::Action => "Action",
            TargetLayer::Fx => "FX",
        };
        f.pad(name)
    }
}
