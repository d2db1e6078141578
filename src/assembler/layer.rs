//! Runtime layers and the builder that collects them

use std::rc::Rc;

use indexmap::IndexSet;

use crate::compiler::Compiled;
use crate::config::CompilerOptions;
use crate::graph::{MixChild, Node};
use crate::model::TargetLayer;

/// How a layer's tree was formed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Root mix holding every foldable contribution of the target
    Shared,
    /// A single operation whose root cannot be folded
    Dedicated,
}

/// One runtime layer: a single tree evaluated once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub target: TargetLayer,
    pub name: String,
    pub kind: LayerKind,
    /// Parameters the tree depends on
    pub parameters: IndexSet<String>,
    pub tree: Rc<Node>,
}

/// Everything assembled for one target layer
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledTarget {
    pub target: TargetLayer,
    /// Shared layer first, then dedicated layers in declaration order
    pub layers: Vec<Layer>,
    /// Union of all required parameters, the unit parameter last
    pub parameters: IndexSet<String>,
    /// Distinct constant leaves created in this pass
    pub leaf_count: usize,
}

impl AssembledTarget {
    /// Check if no layer was produced
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Collects compiled operations for one target layer
///
/// Consumed by `finish`, which freezes the result.
#[derive(Debug)]
pub struct LayerBuilder<'a> {
    target: TargetLayer,
    options: &'a CompilerOptions,
    shared_children: Vec<MixChild>,
    shared_parameters: IndexSet<String>,
    dedicated: Vec<Layer>,
    parameters: IndexSet<String>,
}

impl<'a> LayerBuilder<'a> {
    pub fn new(target: TargetLayer, options: &'a CompilerOptions) -> Self {
        Self {
            target,
            options,
            shared_children: Vec::new(),
            shared_parameters: IndexSet::new(),
            dedicated: Vec::new(),
            parameters: IndexSet::new(),
        }
    }

    /// Add one compiled operation, folding it into the shared root when
    /// its root is an unnormalized mix
    pub fn push(&mut self, compiled: Compiled) {
        let Compiled { node, required } = compiled;
        self.parameters.extend(required.iter().cloned());

        if node.is_additive_mix() {
            if let Node::Mix { children, .. } = node.as_ref() {
                self.shared_children.extend(children.iter().cloned());
            }
            self.shared_parameters.extend(required);
            return;
        }

        self.dedicated.push(Layer {
            target: self.target,
            name: node.name().to_string(),
            kind: LayerKind::Dedicated,
            parameters: required,
            tree: node,
        });
    }

    /// Freeze the collected contributions into layers
    pub fn finish(self, leaf_count: usize) -> AssembledTarget {
        let mut layers = Vec::with_capacity(self.dedicated.len() + 1);
        if !self.shared_children.is_empty() {
            let name = self.options.name_prefix.clone();
            layers.push(Layer {
                target: self.target,
                name: name.clone(),
                kind: LayerKind::Shared,
                parameters: self.shared_parameters,
                tree: Rc::new(Node::Mix {
                    name,
                    children: self.shared_children,
                    normalized: false,
                }),
            });
        }
        layers.extend(self.dedicated);

        let mut parameters = self.parameters;
        if !layers.is_empty() {
            parameters.shift_remove(&self.options.one_parameter);
            parameters.insert(self.options.one_parameter.clone());
        }

        AssembledTarget {
            target: self.target,
            layers,
            parameters,
            leaf_count,
        }
    }
}
