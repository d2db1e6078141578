//! Configuration checks run before any node is built

use crate::error::{BlendMathError, ParameterSlot, Result};
use crate::model::{Operation, OperationKind, Parameter, TargetLayer};

/// Check one operation record
///
/// `index` is the operation's position within its target layer and ends up
/// in the error so the caller can find the record.
pub fn validate_operation(target: TargetLayer, index: usize, op: &Operation) -> Result<()> {
    let input2 = if op.kind.requires_input2() {
        let input2 = op.input2.as_ref().ok_or_else(|| BlendMathError::MissingInput {
            target,
            index,
            kind: op.kind,
            output: op.output.name().to_string(),
        })?;
        Some(input2)
    } else {
        None
    };

    let mut used: Vec<(ParameterSlot, &Parameter)> = vec![
        (ParameterSlot::Input1, &op.input1),
        (ParameterSlot::Output, &op.output),
    ];
    if let Some(input2) = input2 {
        used.push((ParameterSlot::Input2, input2));
    }

    for (slot, parameter) in &used {
        if parameter.name().is_empty() {
            return Err(BlendMathError::EmptyParameterName {
                target,
                index,
                slot: *slot,
            });
        }
    }

    for (_, parameter) in &used {
        if !parameter.has_finite_range() {
            return Err(BlendMathError::NonFiniteRange {
                target,
                index,
                parameter: parameter.name().to_string(),
                min: parameter.min(),
                max: parameter.max(),
            });
        }
        if !parameter.has_ordered_range() {
            return Err(BlendMathError::InvertedRange {
                target,
                index,
                parameter: parameter.name().to_string(),
                min: parameter.min(),
                max: parameter.max(),
            });
        }
    }

    // 1D Mul writes input1.max * input2.max; every other constant is a bound
    if let (OperationKind::Mul, Some(input2)) = (op.kind, input2) {
        let product = op.input1.max() * input2.max();
        if op.use_1d_effective() && !product.is_finite() {
            return Err(BlendMathError::NonFiniteConstant {
                target,
                index,
                kind: op.kind,
                parameter: op.output.name().to_string(),
                value: product,
            });
        }
    }

    Ok(())
}

/// Check every operation of a target layer, stopping at the first failure
pub fn validate_all(target: TargetLayer, operations: &[Operation]) -> Result<()> {
    operations
        .iter()
        .enumerate()
        .try_for_each(|(index, op)| validate_operation(target, index, op))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str) -> Parameter {
        Parameter::unit(name)
    }

    #[test]
    fn test_valid_operations_pass() {
        let ops = vec![
            Operation::remap(unit("A"), Parameter::new("B", -1.0, 1.0)),
            Operation::add(unit("A"), unit("B"), unit("C")).with_1d(true),
            Operation::div(unit("A"), Parameter::new("D", 0.0, 10.0)),
        ];
        assert!(validate_all(TargetLayer::Fx, &ops).is_ok());
    }

    #[test]
    fn test_missing_input2_identifies_operation() {
        let mut broken = Operation::add(unit("A"), unit("B"), unit("Sum"));
        broken.input2 = None;
        let ops = vec![Operation::remap(unit("A"), unit("B")), broken];

        match validate_all(TargetLayer::Fx, &ops) {
            Err(BlendMathError::MissingInput {
                index, kind, output, ..
            }) => {
                assert_eq!(index, 1);
                assert_eq!(kind, OperationKind::Add);
                assert_eq!(output, "Sum");
            }
            other => panic!("expected MissingInput, got {:?}", other),
        }
    }

    #[test]
    fn test_input2_not_needed_for_remap_and_div() {
        let mut remap = Operation::remap(unit("A"), unit("B"));
        remap.input2 = Some(Parameter::new("Ignored", 5.0, 1.0));
        assert!(validate_operation(TargetLayer::Fx, 0, &remap).is_ok());
        assert!(validate_operation(TargetLayer::Fx, 0, &Operation::div(unit("A"), unit("B"))).is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let op = Operation::mul(unit("A"), Parameter::new("B", 2.0, 1.0), unit("C"));
        let err = validate_operation(TargetLayer::Action, 3, &op).unwrap_err();
        assert_eq!(err.error_code(), "INVERTED_RANGE");
        assert!(err.to_string().contains("'B'"));
    }

    #[test]
    fn test_nan_range_rejected() {
        let op = Operation::remap(Parameter::new("A", f32::NAN, 1.0), unit("B"));
        assert!(validate_operation(TargetLayer::Fx, 0, &op).is_err());
    }

    #[test]
    fn test_infinite_range_rejected() {
        let op = Operation::remap(
            Parameter::new("A", f32::NEG_INFINITY, f32::INFINITY),
            unit("B"),
        );
        let err = validate_operation(TargetLayer::Fx, 0, &op).unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_RANGE");
        assert!(err.to_string().contains("'A'"));
    }

    #[test]
    fn test_overflowing_mul_product_rejected() {
        let big = |name: &str| Parameter::new(name, 0.0, 1e20);
        let op = Operation::mul(big("A"), big("B"), unit("P")).with_1d(true);
        match validate_operation(TargetLayer::Fx, 2, &op) {
            Err(BlendMathError::NonFiniteConstant {
                index,
                parameter,
                value,
                ..
            }) => {
                assert_eq!(index, 2);
                assert_eq!(parameter, "P");
                assert!(value.is_infinite());
            }
            other => panic!("expected NonFiniteConstant, got {:?}", other),
        }

        // The weighted strategy never computes the product
        let weighted = Operation::mul(big("A"), big("B"), unit("P"));
        assert!(validate_operation(TargetLayer::Fx, 2, &weighted).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let op = Operation::remap(unit("A"), unit(""));
        match validate_operation(TargetLayer::Fx, 0, &op) {
            Err(BlendMathError::EmptyParameterName { slot, .. }) => {
                assert_eq!(slot, ParameterSlot::Output)
            }
            other => panic!("expected EmptyParameterName, got {:?}", other),
        }
    }
}
