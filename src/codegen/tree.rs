//! The namespace trie shared by every resource category.
//!
//! Ownership runs strictly root-to-leaf; traversals that need the parent get
//! it passed explicitly, so there are no back-references to manage.

use crate::codegen::sanitize::{sanitize, SanitizePolicy};

/// A node's value: either a grouping level or a concrete resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<T> {
    Namespace {
        /// Raw (pre-sanitization) name. The collision resolver mutates this
        /// backing value so later sanitization stays consistent.
        name: String,
    },
    Leaf {
        /// Raw name the symbol is derived from.
        name: String,
        /// The untouched key the generated accessor refers back to, e.g. the
        /// asset name or localization key.
        source_key: String,
        data: T,
    },
}

impl<T> Payload<T> {
    pub fn raw_name(&self) -> &str {
        match self {
            Payload::Namespace { name } | Payload::Leaf { name, .. } => name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Payload::Leaf { .. })
    }

    /// Appends one underscore to the raw backing value.
    pub(crate) fn underscore(&mut self) {
        match self {
            Payload::Namespace { name } | Payload::Leaf { name, .. } => name.push('_'),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node<T> {
    pub payload: Payload<T>,
    pub children: Vec<Node<T>>,
}

impl<T> Node<T> {
    pub fn new(payload: Payload<T>) -> Self {
        Node {
            payload,
            children: Vec::new(),
        }
    }

    pub fn namespace(name: impl Into<String>) -> Self {
        Node::new(Payload::Namespace { name: name.into() })
    }

    pub fn leaf(name: impl Into<String>, source_key: impl Into<String>, data: T) -> Self {
        Node::new(Payload::Leaf {
            name: name.into(),
            source_key: source_key.into(),
            data,
        })
    }

    /// The sanitized symbol this node renders as.
    pub fn symbol(&self) -> String {
        sanitize(self.payload.raw_name())
    }

    /// Merges one tokenized identifier into the trie.
    ///
    /// Walks the namespace components from this node, descending into an
    /// existing child when its *raw* namespace value matches (two spellings
    /// that sanitize identically stay distinct here; the collision resolver
    /// arbitrates later), creating the node otherwise. The leaf is always
    /// appended, duplicates included.
    pub fn add_relative(&mut self, namespaces: &[String], leaf: Payload<T>) {
        let mut current: &mut Node<T> = self;
        for part in namespaces {
            let found = current.children.iter().position(|child| {
                matches!(&child.payload, Payload::Namespace { name } if name == part)
            });
            let index = match found {
                Some(index) => index,
                None => {
                    current.children.push(Node::namespace(part.clone()));
                    current.children.len() - 1
                }
            };
            current = &mut current.children[index];
        }
        current.children.push(Node::new(leaf));
    }

    /// Recursively orders children: namespaces before leaves, each group
    /// alphabetical by sanitized symbol. Total by the no-collision invariant.
    pub fn sort(&mut self) {
        self.children
            .sort_by_cached_key(|child| (child.payload.is_leaf(), child.symbol()));
        for child in &mut self.children {
            child.sort();
        }
    }

    /// True when no leaf is reachable from this node.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn child_symbols(&self) -> Vec<String> {
        self.children.iter().map(|c| c.symbol()).collect()
    }
}

/// Collision key of a node's symbol under the configured policy.
pub(crate) fn node_key<T>(node: &Node<T>, policy: &SanitizePolicy) -> String {
    policy.collision_key(&node.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shared_prefixes_create_one_node() {
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&ns(&["A", "B"]), Payload::Leaf {
            name: "x".into(),
            source_key: "x".into(),
            data: (),
        });
        root.add_relative(&ns(&["A", "B"]), Payload::Leaf {
            name: "y".into(),
            source_key: "y".into(),
            data: (),
        });

        assert_eq!(root.children.len(), 1);
        let a = &root.children[0];
        assert_eq!(a.payload.raw_name(), "A");
        assert_eq!(a.children.len(), 1);
        let b = &a.children[0];
        assert_eq!(b.payload.raw_name(), "B");
        assert_eq!(b.child_symbols(), vec!["x", "y"]);
    }

    #[test]
    fn test_raw_equality_keeps_differently_spelled_namespaces_distinct() {
        // "Icons" and "icon-s" both sanitize towards collisions eventually,
        // but merging is by raw value, so they stay separate nodes.
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&ns(&["Icons"]), Payload::Leaf {
            name: "a".into(),
            source_key: "a".into(),
            data: (),
        });
        root.add_relative(&ns(&["icons"]), Payload::Leaf {
            name: "b".into(),
            source_key: "b".into(),
            data: (),
        });
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_duplicate_leaves_are_kept() {
        let mut root: Node<()> = Node::namespace("R");
        for _ in 0..2 {
            root.add_relative(&[], Payload::Leaf {
                name: "ok".into(),
                source_key: "ok".into(),
                data: (),
            });
        }
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_sort_namespaces_before_leaves_alphabetically() {
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&[], Payload::Leaf {
            name: "a".into(),
            source_key: "a".into(),
            data: (),
        });
        root.add_relative(&ns(&["Z"]), Payload::Leaf {
            name: "z1".into(),
            source_key: "z1".into(),
            data: (),
        });
        root.add_relative(&ns(&["B"]), Payload::Leaf {
            name: "b1".into(),
            source_key: "b1".into(),
            data: (),
        });

        root.sort();
        assert_eq!(root.child_symbols(), vec!["B", "Z", "a"]);
    }
}
