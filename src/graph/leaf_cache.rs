//! Constant leaf deduplication
//!
//! Leaves are keyed by parameter name and exact value; `-0.0` and `0.0`
//! share a key. The cache lives for one compilation pass.

use std::collections::HashMap;
use std::rc::Rc;

use super::node::Node;

/// Per-pass cache of constant leaves
#[derive(Debug)]
pub struct LeafCache {
    prefix: String,
    leaves: HashMap<(String, u32), Rc<Node>>,
    empty: Option<Rc<Node>>,
}

impl LeafCache {
    /// Create an empty cache; `prefix` starts every leaf name
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            leaves: HashMap::new(),
            empty: None,
        }
    }

    /// Get the constant leaf for `(parameter, value)`, creating it once
    pub fn get_or_create(&mut self, parameter: &str, value: f32) -> Rc<Node> {
        let value = if value == 0.0 { 0.0 } else { value };
        let key = (parameter.to_string(), value.to_bits());
        let prefix = &self.prefix;
        self.leaves
            .entry(key)
            .or_insert_with(|| {
                Rc::new(Node::Constant {
                    name: format!("{} {} -> {}", prefix, parameter, value),
                    parameter: parameter.to_string(),
                    value,
                })
            })
            .clone()
    }

    /// Get the shared leaf that contributes nothing
    pub fn empty(&mut self) -> Rc<Node> {
        let prefix = &self.prefix;
        self.empty
            .get_or_insert_with(|| {
                Rc::new(Node::Empty {
                    name: format!("{} Empty", prefix),
                })
            })
            .clone()
    }

    /// Number of distinct constant leaves (the empty leaf excluded)
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Check if no constant leaf has been created
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_pair_returns_same_instance() {
        let mut cache = LeafCache::new("BlendMath");
        let a = cache.get_or_create("P", 5.0);
        let b = cache.get_or_create("P", 5.0);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert_eq!(a.name(), "BlendMath P -> 5");
    }

    #[test]
    fn test_distinct_pairs_are_distinct() {
        let mut cache = LeafCache::new("BlendMath");
        let a = cache.get_or_create("P", 5.0);
        let b = cache.get_or_create("P", 5.5);
        let c = cache.get_or_create("Q", 5.0);
        assert!(!Rc::ptr_eq(&a, &b));
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_negative_zero_shares_key() {
        let mut cache = LeafCache::new("BlendMath");
        let a = cache.get_or_create("P", 0.0);
        let b = cache.get_or_create("P", -0.0);
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_empty_is_singleton() {
        let mut cache = LeafCache::new("BlendMath");
        let a = cache.empty();
        let b = cache.empty();
        assert!(Rc::ptr_eq(&a, &b));
        assert!(cache.is_empty());
        assert_eq!(a.name(), "BlendMath Empty");
    }
}
