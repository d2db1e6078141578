//! Build Pass
//!
//! Groups rule sets by target layer, checks every operation, then compiles,
//! assembles and emits one controller per non-empty target. Nothing is
//! emitted if any operation is invalid.

use indexmap::IndexMap;
use tracing::info;

use crate::assembler::{assemble_target, AssembledTarget};
use crate::compiler::validate_all;
use crate::config::{BuildDescription, RuleSet};
use crate::emit::{emit_target, ControllerAsset};
use crate::error::Result;
use crate::model::{Operation, TargetLayer};

/// Concatenate operations per target layer, targets in first-appearance order
pub fn group_by_target(rule_sets: &[RuleSet]) -> IndexMap<TargetLayer, Vec<Operation>> {
    let mut groups: IndexMap<TargetLayer, Vec<Operation>> = IndexMap::new();
    for rule_set in rule_sets {
        groups
            .entry(rule_set.target_layer)
            .or_default()
            .extend(rule_set.operations.iter().cloned());
    }
    groups
}

/// Check every operation of the description without building anything
pub fn check(description: &BuildDescription) -> Result<()> {
    group_by_target(&description.rule_sets)
        .iter()
        .try_for_each(|(target, operations)| validate_all(*target, operations))
}

/// Compile and assemble every target; empty targets are skipped
pub fn assemble(description: &BuildDescription) -> Result<Vec<AssembledTarget>> {
    check(description)?;

    let mut assembled = Vec::new();
    for (target, operations) in group_by_target(&description.rule_sets) {
        let result = assemble_target(target, &operations, &description.options)?;
        if !result.is_empty() {
            assembled.push(result);
        }
    }
    Ok(assembled)
}

/// Run a complete build pass
pub fn build(description: &BuildDescription) -> Result<Vec<ControllerAsset>> {
    let controllers = assemble(description)?
        .iter()
        .map(|target| emit_target(target, &description.options))
        .collect::<Result<Vec<_>>>()?;

    info!(
        rule_sets = description.rule_sets.len(),
        operations = description.operation_count(),
        controllers = controllers.len(),
        "build pass complete"
    );
    Ok(controllers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Parameter;

    fn remap(a: &str, b: &str) -> Operation {
        Operation::remap(Parameter::unit(a), Parameter::unit(b))
    }

    #[test]
    fn test_group_by_target_merges_rule_sets() {
        let rule_sets = vec![
            RuleSet::new(TargetLayer::Fx, vec![remap("A", "B")]),
            RuleSet::new(TargetLayer::Gesture, vec![remap("C", "D")]),
            RuleSet::new(TargetLayer::Fx, vec![remap("E", "F")]),
        ];
        let groups = group_by_target(&rule_sets);

        let targets: Vec<_> = groups.keys().copied().collect();
        assert_eq!(targets, vec![TargetLayer::Fx, TargetLayer::Gesture]);
        assert_eq!(groups[&TargetLayer::Fx].len(), 2);
        assert_eq!(groups[&TargetLayer::Fx][1].input1.name(), "E");
    }

    #[test]
    fn test_build_one_controller_per_target() {
        let description = BuildDescription {
            rule_sets: vec![
                RuleSet::new(TargetLayer::Fx, vec![remap("A", "B")]),
                RuleSet::new(TargetLayer::Action, vec![remap("C", "D")]),
                RuleSet::new(TargetLayer::Base, Vec::new()),
            ],
            ..Default::default()
        };
        let controllers = build(&description).unwrap();
        assert_eq!(controllers.len(), 2);
        assert_eq!(controllers[0].target_layer, TargetLayer::Fx);
        assert_eq!(controllers[1].target_layer, TargetLayer::Action);
    }

    #[test]
    fn test_invalid_target_blocks_whole_build() {
        let mut broken = Operation::add(Parameter::unit("A"), Parameter::unit("B"), Parameter::unit("C"));
        broken.input2 = None;
        let description = BuildDescription {
            rule_sets: vec![
                RuleSet::new(TargetLayer::Fx, vec![remap("A", "B")]),
                RuleSet::new(TargetLayer::Gesture, vec![broken]),
            ],
            ..Default::default()
        };
        assert!(check(&description).is_err());
        assert!(build(&description).is_err());
    }
}
