//! Operation records
//!
//! One arithmetic instruction: kind, the 1D mode flag, up to two inputs
//! and one output. Records are immutable compiler inputs.

use serde::{Deserialize, Serialize};

use super::parameter::Parameter;

/// Closed set of supported arithmetic shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Remap,
    Add,
    Sub,
    Mul,
    Div,
}

/// Display language for kind labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

/// Display labels per kind as `(kind, english, japanese)`
const KIND_LABELS: [(OperationKind, &str, &str); 5] = [
    (OperationKind::Remap, "Remap", "範囲変換"),
    (OperationKind::Add, "Addition(+)", "加算(＋)"),
    (OperationKind::Sub, "Subtraction(-)", "減算(－)"),
    (OperationKind::Mul, "Multiplication(*)", "乗算(×)"),
    (OperationKind::Div, "Division(/)", "除算(÷)"),
];

impl OperationKind {
    /// All kinds in declaration order
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Remap,
        OperationKind::Add,
        OperationKind::Sub,
        OperationKind::Mul,
        OperationKind::Div,
    ];

    /// Get the display label for this kind
    pub fn label(self, locale: Locale) -> &'static str {
        let (_, en, ja) = KIND_LABELS[self as usize];
        match locale {
            Locale::En => en,
            Locale::Ja => ja,
        }
    }

    /// Whether this kind reads a second input
    pub fn requires_input2(self) -> bool {
        matches!(
            self,
            OperationKind::Add | OperationKind::Sub | OperationKind::Mul
        )
    }

    /// Whether the 1D interpolation strategy exists for this kind
    pub fn supports_1d(self) -> bool {
        !matches!(self, OperationKind::Div)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperationKind::Remap => "Remap",
            OperationKind::Add => "Add",
            OperationKind::Sub => "Sub",
            OperationKind::Mul => "Mul",
            OperationKind::Div => "Div",
        };
        f.pad(name)
    }
}

/// A single arithmetic instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    /// Request the 1D interpolation strategy (ignored for Div)
    #[serde(default)]
    pub use_1d: bool,
    pub input1: Parameter,
    /// Second operand (Add, Sub, Mul only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input2: Option<Parameter>,
    pub output: Parameter,
}

impl Operation {
    fn new(
        kind: OperationKind,
        input1: Parameter,
        input2: Option<Parameter>,
        output: Parameter,
    ) -> Self {
        Self {
            kind,
            use_1d: false,
            input1,
            input2,
            output,
        }
    }

    /// `output = remap(input1)` from input1's range onto output's range
    pub fn remap(input1: Parameter, output: Parameter) -> Self {
        Self::new(OperationKind::Remap, input1, None, output)
    }

    /// `output = input1 + input2`
    pub fn add(input1: Parameter, input2: Parameter, output: Parameter) -> Self {
        Self::new(OperationKind::Add, input1, Some(input2), output)
    }

    /// `output = input1 - input2`
    pub fn sub(input1: Parameter, input2: Parameter, output: Parameter) -> Self {
        Self::new(OperationKind::Sub, input1, Some(input2), output)
    }

    /// `output = input1 * input2`
    pub fn mul(input1: Parameter, input2: Parameter, output: Parameter) -> Self {
        Self::new(OperationKind::Mul, input1, Some(input2), output)
    }

    /// `output = output.max / (1 + input1)`
    pub fn div(input1: Parameter, output: Parameter) -> Self {
        Self::new(OperationKind::Div, input1, None, output)
    }

    /// Set the 1D mode flag
    pub fn with_1d(mut self, use_1d: bool) -> Self {
        self.use_1d = use_1d;
        self
    }

    /// The mode flag as the compiler honours it
    pub fn use_1d_effective(&self) -> bool {
        self.use_1d && self.kind.supports_1d()
    }

    /// Human-readable formula, e.g. `"Out = A + B"` or `"Remap A => Out"`
    ///
    /// Compiled root nodes, and therefore dedicated layers, are named after it.
    pub fn formula(&self) -> String {
        let out = self.output.name();
        let a = self.input1.name();
        let b = self.input2.as_ref().map(Parameter::name).unwrap_or("?");
        match self.kind {
            OperationKind::Remap => format!("Remap {} => {}", a, out),
            OperationKind::Add => format!("{} = {} + {}", out, a, b),
            OperationKind::Sub => format!("{} = {} - {}", out, a, b),
            OperationKind::Mul => format!("{} = {} * {}", out, a, b),
            OperationKind::Div => format!("{} = {} / (1 + {})", out, self.output.max(), a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_table_matches_kinds() {
        for (kind, en, ja) in KIND_LABELS {
            assert_eq!(kind.label(Locale::En), en);
            assert_eq!(kind.label(Locale::Ja), ja);
        }
        assert_eq!(OperationKind::Div.label(Locale::Ja), "除算(÷)");
    }

    #[test]
    fn test_use_1d_effective() {
        let a = Parameter::unit("A");
        let out = Parameter::unit("Out");
        assert!(Operation::remap(a.clone(), out.clone()).with_1d(true).use_1d_effective());
        assert!(!Operation::remap(a.clone(), out.clone()).use_1d_effective());
        assert!(!Operation::div(a, out).with_1d(true).use_1d_effective());
    }

    #[test]
    fn test_formula() {
        let op = Operation::add(
            Parameter::unit("Input1"),
            Parameter::unit("Input2"),
            Parameter::unit("Output"),
        );
        assert_eq!(op.formula(), "Output = Input1 + Input2");

        let div = Operation::div(Parameter::unit("X"), Parameter::new("Y", 0.0, 4.0));
        assert_eq!(div.formula(), "Y = 4 / (1 + X)");

        let remap = Operation::remap(Parameter::unit("X"), Parameter::new("Y", -1.0, 1.0));
        assert_eq!(remap.formula(), "Remap X => Y");
    }

    #[test]
    fn test_deserialize_operation() {
        let op: Operation = serde_json::from_str(
            r#"{
                "kind": "sub",
                "use_1d": true,
                "input1": {"name": "A", "min": 0, "max": 2},
                "input2": {"name": "B"},
                "output": {"name": "C", "min": -1, "max": 2}
            }"#,
        )
        .unwrap();
        assert_eq!(op.kind, OperationKind::Sub);
        assert!(op.use_1d_effective());
        assert_eq!(op.input2.as_ref().map(Parameter::name), Some("B"));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result: Result<Operation, _> = serde_json::from_str(
            r#"{"kind": "pow", "input1": {"name": "A"}, "output": {"name": "B"}}"#,
        );
        assert!(result.is_err());
    }
}
