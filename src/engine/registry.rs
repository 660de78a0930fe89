//! Node Registry - Arena slots and id lookup.
//!
//! Manages the lifecycle of node handles:
//! - Arena slots addressed by [`NodeId`]
//! - Free slot pool for O(1) reuse, with a per-slot generation so stale
//!   handles stop resolving
//! - id → handle map for O(1) `get_node_by_id`
//! - Counter for generated ids

use std::collections::HashMap;

use super::node::{Node, NodeId};

struct Slot {
    /// Bumped every time the slot is released.
    generation: u32,
    node: Option<Node>,
}

/// Arena plus id index owned by a screen.
#[derive(Default)]
pub(crate) struct NodeArena {
    /// Node storage. A slot without a node is free.
    slots: Vec<Slot>,

    /// Pool of freed slots for reuse.
    free: Vec<usize>,

    /// Map node id to handle. Empty ids are never indexed.
    ids: HashMap<String, NodeId>,

    /// Counter for generating unique ids.
    id_counter: usize,
}

impl NodeArena {
    // =========================================================================
    // Slot allocation
    // =========================================================================

    /// Store a node, reusing a freed slot if one exists.
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            NodeId::new(index, slot.generation)
        } else {
            self.slots.push(Slot { generation: 0, node: Some(node) });
            NodeId::new(self.slots.len() - 1, 0)
        }
    }

    /// Take a node out of the arena and release its slot back to the pool.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index).filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    // =========================================================================
    // Id index
    // =========================================================================

    /// Index a node under its id.
    ///
    /// Empty ids are always accepted and not indexed. A non-empty id that is
    /// already indexed is rejected.
    pub(crate) fn register(&mut self, id: &str, node: NodeId) -> bool {
        if id.is_empty() {
            return true;
        }
        if self.ids.contains_key(id) {
            return false;
        }
        self.ids.insert(id.to_string(), node);
        true
    }

    /// Drop an id from the index if it points at `node`.
    pub(crate) fn unregister(&mut self, id: &str, node: NodeId) {
        if self.ids.get(id) == Some(&node) {
            self.ids.remove(id);
        }
    }

    pub(crate) fn lookup(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Generate an id that is not indexed yet.
    pub(crate) fn allocate_id(&mut self, prefix: &str) -> String {
        loop {
            let id = format!("{}_auto_{}", prefix, self.id_counter);
            self.id_counter += 1;
            if !self.ids.contains_key(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::node::NodeDesc;

    fn node(id: &str) -> Node {
        Node::from_desc(NodeDesc::space(id), None).0
    }

    #[test]
    fn test_insert_reuses_freed_slots() {
        let mut arena = NodeArena::default();
        let a = arena.insert(node("a"));
        let b = arena.insert(node("b"));
        assert_eq!(arena.len(), 2);

        assert!(arena.remove(a).is_some());
        assert!(!arena.contains(a));
        assert_eq!(arena.len(), 1);

        let c = arena.insert(node("c"));
        assert_eq!(c.index(), a.index());
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(arena.get(c).map(Node::id), Some("c"));
    }

    #[test]
    fn test_stale_handle_does_not_resolve() {
        let mut arena = NodeArena::default();
        let a = arena.insert(node("a"));
        arena.remove(a);
        let c = arena.insert(node("c"));

        assert!(arena.get(a).is_none());
        assert!(arena.get_mut(a).is_none());
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.get(c).map(Node::id), Some("c"));
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut arena = NodeArena::default();
        let a = arena.insert(node("a"));
        assert!(arena.remove(a).is_some());
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut arena = NodeArena::default();
        let a = arena.insert(node("a"));
        let b = arena.insert(node("a"));
        assert!(arena.register("a", a));
        assert!(!arena.register("a", b));
        assert_eq!(arena.lookup("a"), Some(a));

        // Empty ids are accepted but never indexed
        assert!(arena.register("", b));
        assert!(arena.register("", a));
        assert_eq!(arena.lookup(""), None);
    }

    #[test]
    fn test_unregister_only_matching_handle() {
        let mut arena = NodeArena::default();
        let a = arena.insert(node("a"));
        let b = arena.insert(node("b"));
        arena.register("a", a);
        arena.unregister("a", b);
        assert_eq!(arena.lookup("a"), Some(a));
        arena.unregister("a", a);
        assert_eq!(arena.lookup("a"), None);
    }

    #[test]
    fn test_allocate_id_skips_taken() {
        let mut arena = NodeArena::default();
        let a = arena.insert(node("x"));
        arena.register("screen_auto_0", a);
        assert_eq!(arena.allocate_id("screen"), "screen_auto_1");
        assert_eq!(arena.allocate_id("screen"), "screen_auto_2");
    }
}
