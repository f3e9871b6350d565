//! Collision resolution over a built namespace trie.
//!
//! Works top-down: at each node, sibling symbols are counted in insertion
//! order and the n-th later duplicate gains n appended underscores on its raw
//! value; a child whose symbol matches the parent's is renamed the same way.
//! One rename can collide with a symbol later in the same sweep, so the sweep
//! repeats until a full pass makes zero renames before recursing.

use std::collections::HashMap;

use crate::codegen::sanitize::SanitizePolicy;
use crate::codegen::tree::{node_key, Node};

/// Upper bound on fixed-point sweeps per node. Termination is guaranteed
/// because every rename strictly grows the padding of one symbol within a
/// finite sibling set; hitting the cap means the invariant itself is broken.
const MAX_RESOLUTION_PASSES: usize = 10_000;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("collision resolution did not reach a fixed point within {passes} passes for namespace '{symbol}'")]
    NonTermination { symbol: String, passes: usize },
}

/// Renames children until the node's subtree satisfies the no-collision
/// invariants: pairwise-distinct sibling symbols, and no child symbol equal
/// to its parent's. The earliest-inserted holder of a symbol keeps it.
pub fn resolve_collisions<T>(node: &mut Node<T>, policy: &SanitizePolicy) -> Result<(), ResolveError> {
    let mut passes = 0usize;
    loop {
        let mut modified = false;
        let mut seen: HashMap<String, usize> = HashMap::new();
        let parent_key = node_key(node, policy);

        for child in node.children.iter_mut() {
            let occurrences = seen.get(&node_key(child, policy)).copied().unwrap_or(0);
            for _ in 0..occurrences {
                child.payload.underscore();
                modified = true;
            }

            let key = node_key(child, policy);
            *seen.entry(key.clone()).or_insert(0) += 1;

            if key == parent_key {
                child.payload.underscore();
                modified = true;
            }
        }

        if !modified {
            break;
        }
        passes += 1;
        if passes > MAX_RESOLUTION_PASSES {
            return Err(ResolveError::NonTermination {
                symbol: node.symbol(),
                passes,
            });
        }
    }

    for child in &mut node.children {
        resolve_collisions(child, policy)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::tree::Payload;

    fn leaf(name: &str) -> Payload<()> {
        Payload::Leaf {
            name: name.to_string(),
            source_key: name.to_string(),
            data: (),
        }
    }

    fn assert_invariants(node: &Node<()>, policy: &SanitizePolicy) {
        let parent = node_key(node, policy);
        let mut keys = Vec::new();
        for child in &node.children {
            let key = node_key(child, policy);
            assert_ne!(key, parent, "child symbol equals parent symbol");
            assert!(!keys.contains(&key), "duplicate sibling symbol {key:?}");
            keys.push(key);
            assert_invariants(child, policy);
        }
    }

    #[test]
    fn test_duplicate_leaves_get_appended_underscores() {
        let policy = SanitizePolicy::default();
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&[], leaf("ok"));
        root.add_relative(&[], leaf("ok"));
        root.add_relative(&[], leaf("ok"));

        resolve_collisions(&mut root, &policy).unwrap();
        assert_eq!(root.child_symbols(), vec!["ok", "ok_", "ok__"]);
        assert_invariants(&root, &policy);
    }

    #[test]
    fn test_case_insensitive_policy_pads_cross_case_duplicates() {
        let policy = SanitizePolicy {
            case_insensitive: true,
        };
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&[], leaf("ok"));
        root.add_relative(&[], leaf("OK"));

        resolve_collisions(&mut root, &policy).unwrap();
        assert_eq!(root.child_symbols(), vec!["ok", "OK_"]);
        assert_invariants(&root, &policy);
    }

    #[test]
    fn test_child_colliding_with_parent_is_renamed() {
        let policy = SanitizePolicy::default();
        let mut root: Node<()> = Node::namespace("Menu");
        root.add_relative(&["Menu".to_string()], leaf("item"));

        resolve_collisions(&mut root, &policy).unwrap();
        assert_eq!(root.child_symbols(), vec!["Menu_"]);
        assert_invariants(&root, &policy);
    }

    #[test]
    fn test_rename_cascades_into_existing_symbol() {
        // Renaming "ok" to "ok_" collides with an already-present "ok_";
        // a single pass is not enough.
        let policy = SanitizePolicy::default();
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&[], leaf("ok"));
        root.add_relative(&[], leaf("ok_"));
        root.add_relative(&[], leaf("ok"));

        resolve_collisions(&mut root, &policy).unwrap();
        assert_invariants(&root, &policy);
        let symbols = root.child_symbols();
        assert_eq!(symbols[0], "ok");
        assert_eq!(symbols.len(), 3);
    }

    #[test]
    fn test_namespace_leaf_collisions_resolve_too() {
        let policy = SanitizePolicy::default();
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&["shared".to_string()], leaf("a"));
        root.add_relative(&[], leaf("shared"));

        resolve_collisions(&mut root, &policy).unwrap();
        assert_invariants(&root, &policy);
    }

    #[test]
    fn test_differently_spelled_raw_values_colliding_after_sanitize() {
        // "icon-s" and "icon_s" both sanitize to "icon_s".
        let policy = SanitizePolicy::default();
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&[], leaf("icon-s"));
        root.add_relative(&[], leaf("icon_s"));

        resolve_collisions(&mut root, &policy).unwrap();
        assert_eq!(root.child_symbols(), vec!["icon_s", "icon_s_"]);
    }

    #[test]
    fn test_degenerate_empty_symbols_are_padded() {
        let policy = SanitizePolicy::default();
        let mut root: Node<()> = Node::namespace("R");
        root.add_relative(&[], leaf(""));
        root.add_relative(&[], leaf(""));

        resolve_collisions(&mut root, &policy).unwrap();
        assert_eq!(root.child_symbols(), vec!["", "_"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let policy = SanitizePolicy::default();
        let mut root: Node<()> = Node::namespace("R");
        for name in ["ok", "ok", "Icons", "icons", "class", "class"] {
            root.add_relative(&[], leaf(name));
        }
        resolve_collisions(&mut root, &policy).unwrap();
        let after_first = root.child_symbols();

        resolve_collisions(&mut root, &policy).unwrap();
        assert_eq!(root.child_symbols(), after_first);
    }
}
