//! Per-kind lowering strategies
//!
//! | Kind  | 1D                                             | weighted sum                          |
//! |-------|------------------------------------------------|---------------------------------------|
//! | Remap | lerp over input1's range, out.min -> out.max   | `input1 * out.max`                    |
//! | Add   | ONE-weighted lerps of each input onto out      | `input1 * 1 + input2 * 1`             |
//! | Sub   | as Add, input2's endpoints negated             | `input1 * 1 + input2 * -1`            |
//! | Mul   | lerp over `0..max1` into lerp over `0..max2`   | `input1 * (input2 * 1)`               |
//! | Div   | (always weighted average)                      | `(input1 * 0 + ONE * out.max) / (input1 + ONE)` |

use std::rc::Rc;

use indexmap::IndexSet;
use tracing::warn;

use super::{Compiled, OperationCompiler};
use crate::graph::{MixChild, Node};
use crate::model::{Operation, Parameter};

/// Whether the second operand is added or subtracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn scale(self) -> f32 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }

    fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

fn required(names: &[&str]) -> IndexSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn warn_if_flat(driver: &Parameter, node: &str) {
    if driver.min() == driver.max() {
        warn!(
            parameter = driver.name(),
            value = driver.min(),
            "{} interpolates over an empty range",
            node
        );
    }
}

impl OperationCompiler<'_> {
    pub(super) fn remap(&mut self, op: &Operation, use_1d: bool) -> Compiled {
        let (input, output) = (&op.input1, &op.output);
        let name = self.node_name(&op.formula());

        let node = if use_1d {
            warn_if_flat(input, &name);
            Node::Interpolate1D {
                name,
                driver: input.name().to_string(),
                t0: input.min(),
                start: self.leaves.get_or_create(output.name(), output.min()),
                t1: input.max(),
                end: self.leaves.get_or_create(output.name(), output.max()),
            }
        } else {
            let leaf = self.leaves.get_or_create(output.name(), output.max());
            Node::Mix {
                name,
                children: vec![MixChild::new(input.name(), leaf)],
                normalized: false,
            }
        };

        Compiled {
            node: Rc::new(node),
            required: required(&[input.name(), output.name()]),
        }
    }

    pub(super) fn add_sub(
        &mut self,
        op: &Operation,
        input2: &Parameter,
        sign: Sign,
        use_1d: bool,
    ) -> Compiled {
        let (input1, output) = (&op.input1, &op.output);
        let name = self.node_name(&op.formula());

        if use_1d {
            let first = self.scaled_interpolation(input1, output, Sign::Plus);
            let second = self.scaled_interpolation(input2, output, sign);
            let one = self.options.one_parameter.as_str();
            return Compiled {
                node: Rc::new(Node::Mix {
                    name,
                    children: vec![MixChild::new(one, first), MixChild::new(one, second)],
                    normalized: false,
                }),
                required: required(&[input1.name(), input2.name(), output.name(), one]),
            };
        }

        let first = self.leaves.get_or_create(output.name(), 1.0);
        let second = self.leaves.get_or_create(output.name(), sign.scale());
        Compiled {
            node: Rc::new(Node::Mix {
                name,
                children: vec![
                    MixChild::new(input1.name(), first),
                    MixChild::new(input2.name(), second),
                ],
                normalized: false,
            }),
            required: required(&[input1.name(), input2.name(), output.name()]),
        }
    }

    /// Lerp of `input`'s own value (times the sign) onto `output`'s channel
    fn scaled_interpolation(&mut self, input: &Parameter, output: &Parameter, sign: Sign) -> Rc<Node> {
        let name = self.node_name(&format!(
            "{} {}= {}",
            output.name(),
            sign.symbol(),
            input.name()
        ));
        warn_if_flat(input, &name);

        let scale = sign.scale();
        Rc::new(Node::Interpolate1D {
            name,
            driver: input.name().to_string(),
            t0: input.min(),
            start: self.leaves.get_or_create(output.name(), scale * input.min()),
            t1: input.max(),
            end: self.leaves.get_or_create(output.name(), scale * input.max()),
        })
    }

    pub(super) fn mul(&mut self, op: &Operation, input2: &Parameter, use_1d: bool) -> Compiled {
        let (input1, output) = (&op.input1, &op.output);
        let name = self.node_name(&op.formula());

        let node = if use_1d {
            for input in [input1, input2] {
                if input.max() <= 0.0 {
                    warn!(
                        parameter = input.name(),
                        max = input.max(),
                        "{} interpolates over 0..{}, which is empty or reversed",
                        name,
                        input.max()
                    );
                }
            }

            let zero = self.leaves.get_or_create(output.name(), 0.0);
            let full = self
                .leaves
                .get_or_create(output.name(), input1.max() * input2.max());
            let inner = Rc::new(Node::Interpolate1D {
                name: self.node_name("Multiply"),
                driver: input2.name().to_string(),
                t0: 0.0,
                start: zero.clone(),
                t1: input2.max(),
                end: full,
            });
            Node::Interpolate1D {
                name,
                driver: input1.name().to_string(),
                t0: 0.0,
                start: zero,
                t1: input1.max(),
                end: inner,
            }
        } else {
            let unit = self.leaves.get_or_create(output.name(), 1.0);
            let inner = Rc::new(Node::Mix {
                name: name.clone(),
                children: vec![MixChild::new(input2.name(), unit)],
                normalized: false,
            });
            Node::Mix {
                name,
                children: vec![MixChild::new(input1.name(), inner)],
                normalized: false,
            }
        };

        Compiled {
            node: Rc::new(node),
            required: required(&[input1.name(), input2.name(), output.name()]),
        }
    }

    pub(super) fn div(&mut self, op: &Operation) -> Compiled {
        let (input, output) = (&op.input1, &op.output);
        let name = self.node_name(&op.formula());
        if output.max() == 0.0 {
            warn!(parameter = output.name(), "{} always yields 0", name);
        }

        let empty = self.leaves.empty();
        let numerator = self.leaves.get_or_create(output.name(), output.max());
        let one = self.options.one_parameter.as_str();

        Compiled {
            node: Rc::new(Node::Mix {
                name,
                children: vec![
                    MixChild::new(input.name(), empty),
                    MixChild::new(one, numerator),
                ],
                normalized: true,
            }),
            required: required(&[input.name(), output.name(), one]),
        }
    }
}
