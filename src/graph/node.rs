//! Node variants

use std::collections::BTreeSet;
use std::rc::Rc;

/// One weighted child of a mix node
#[derive(Debug, Clone, PartialEq)]
pub struct MixChild {
    /// Parameter whose live value is the weight
    pub weight: String,
    pub node: Rc<Node>,
}

impl MixChild {
    pub fn new(weight: impl Into<String>, node: Rc<Node>) -> Self {
        Self {
            weight: weight.into(),
            node,
        }
    }
}

/// A node of the emitted blend graph
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Emits `value` on `parameter`'s channel and zero elsewhere
    Constant {
        name: String,
        parameter: String,
        value: f32,
    },
    /// Contributes zero to every channel
    Empty { name: String },
    /// Per-channel linear blend from `start` at `t0` to `end` at `t1`,
    /// clamped to the endpoints outside that range
    Interpolate1D {
        name: String,
        driver: String,
        t0: f32,
        start: Rc<Node>,
        t1: f32,
        end: Rc<Node>,
    },
    /// Raw weighted sum, or weighted average when `normalized`
    Mix {
        name: String,
        children: Vec<MixChild>,
        normalized: bool,
    },
}

impl Node {
    /// Get the node's human-readable name
    pub fn name(&self) -> &str {
        match self {
            Node::Constant { name, .. }
            | Node::Empty { name }
            | Node::Interpolate1D { name, .. }
            | Node::Mix { name, .. } => name,
        }
    }

    /// True for an unnormalized mix, whose children can be folded into
    /// another raw weighted sum without changing their contribution
    pub fn is_additive_mix(&self) -> bool {
        matches!(
            self,
            Node::Mix {
                normalized: false,
                ..
            }
        )
    }

    /// Every parameter name the subtree reads or writes
    pub fn referenced_parameters(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_parameters(&mut out);
        out
    }

    fn collect_parameters(&self, out: &mut BTreeSet<String>) {
        match self {
            Node::Constant { parameter, .. } => {
                out.insert(parameter.clone());
            }
            Node::Empty { .. } => {}
            Node::Interpolate1D {
                driver, start, end, ..
            } => {
                out.insert(driver.clone());
                start.collect_parameters(out);
                end.collect_parameters(out);
            }
            Node::Mix { children, .. } => {
                for child in children {
                    out.insert(child.weight.clone());
                    child.node.collect_parameters(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(parameter: &str, value: f32) -> Rc<Node> {
        Rc::new(Node::Constant {
            name: format!("{} -> {}", parameter, value),
            parameter: parameter.to_string(),
            value,
        })
    }

    #[test]
    fn test_referenced_parameters_include_drivers_and_weights() {
        let tree = Node::Mix {
            name: "root".to_string(),
            children: vec![MixChild::new(
                "W",
                Rc::new(Node::Interpolate1D {
                    name: "lerp".to_string(),
                    driver: "D".to_string(),
                    t0: 0.0,
                    start: constant("Out", 0.0),
                    t1: 1.0,
                    end: constant("Out", 1.0),
                }),
            )],
            normalized: false,
        };

        let params: Vec<_> = tree.referenced_parameters().into_iter().collect();
        assert_eq!(params, vec!["D", "Out", "W"]);
    }

    #[test]
    fn test_is_additive_mix() {
        let raw = Node::Mix {
            name: "raw".to_string(),
            children: Vec::new(),
            normalized: false,
        };
        let avg = Node::Mix {
            name: "avg".to_string(),
            children: Vec::new(),
            normalized: true,
        };
        assert!(raw.is_additive_mix());
        assert!(!avg.is_additive_mix());
        assert!(!constant("A", 1.0).is_additive_mix());
    }
}
