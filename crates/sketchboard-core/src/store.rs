//! Ordered node collection.
//!
//! Array order is z-order: the first node is painted first, `append` puts a
//! node on top. Updates never reorder untouched nodes; reordering goes
//! through [`NodeStore::move_to_index`] only.

use crate::nodes::{Node, NodeId, NodePatch};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The ordered collection of placed nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node on top and return its id.
    pub fn append(&mut self, node: Node) -> NodeId {
        let id = node.id();
        log::trace!("append {} node {}", node.kind(), id);
        self.nodes.push(node);
        id
    }

    /// All nodes, back to front.
    pub fn all(&self) -> &[Node] {
        &self.nodes
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Z-index of a node.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id() == id)
    }

    /// Apply a patch to one node. Returns false if the id is not present.
    pub fn patch(&mut self, id: NodeId, patch: &NodePatch, min_size: f64) -> bool {
        self.update(id, |node| patch.apply(node, min_size))
    }

    /// Apply a patch to every listed node that exists. Returns how many were patched.
    pub fn patch_many(&mut self, ids: &[NodeId], patch: &NodePatch, min_size: f64) -> usize {
        self.update_many(ids, |node| patch.apply(node, min_size))
    }

    /// Mutate one node in place. Missing ids are a no-op.
    pub(crate) fn update(&mut self, id: NodeId, f: impl FnOnce(&mut Node)) -> bool {
        match self.nodes.iter_mut().find(|n| n.id() == id) {
            Some(node) => {
                f(node);
                true
            }
            None => false,
        }
    }

    /// Mutate every listed node that exists, in z-order.
    pub(crate) fn update_many(&mut self, ids: &[NodeId], mut f: impl FnMut(&mut Node)) -> usize {
        let mut count = 0;
        for node in self.nodes.iter_mut().filter(|n| ids.contains(&n.id())) {
            f(node);
            count += 1;
        }
        count
    }

    /// Remove the listed nodes, returning them in z-order.
    pub fn remove(&mut self, ids: &[NodeId]) -> Vec<Node> {
        let (removed, kept): (Vec<Node>, Vec<Node>) = std::mem::take(&mut self.nodes)
            .into_iter()
            .partition(|n| ids.contains(&n.id()));
        self.nodes = kept;
        removed
    }

    /// Move a node to `index` in z-order (clamped to the top).
    /// Returns false if the id is not present.
    pub fn move_to_index(&mut self, id: NodeId, index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let node = self.nodes.remove(from);
        let to = index.min(self.nodes.len());
        self.nodes.insert(to, node);
        true
    }

    /// Topmost node hit at a world point.
    pub fn node_at(&self, point: Point, tolerance: f64) -> Option<&Node> {
        self.nodes.iter().rev().find(|n| n.hit_test(point, tolerance))
    }

    /// Ids of nodes whose bounding box overlaps `rect` (open intervals), in z-order.
    pub fn nodes_in_rect(&self, rect: Rect) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.overlaps(rect))
            .map(|n| n.id())
            .collect()
    }

    /// Union of all node bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(|n| n.bounds())
            .reduce(|acc, b| acc.union(b))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the board to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a board from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{NodeKind, TextStyle};
    use kurbo::Size;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Node {
        Node::of_kind(NodeKind::Rectangle, Point::new(x, y), Size::new(w, h), &TextStyle::default())
    }

    fn ids(store: &NodeStore) -> Vec<NodeId> {
        store.all().iter().map(|n| n.id()).collect()
    }

    #[test]
    fn test_append_is_top() {
        let mut store = NodeStore::new();
        let a = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let b = store.append(rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(ids(&store), vec![a, b]);
        assert_eq!(store.node_at(Point::new(5.0, 5.0), 0.0).map(|n| n.id()), Some(b));
    }

    #[test]
    fn test_patch_preserves_order() {
        let mut store = NodeStore::new();
        let a = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let b = store.append(rect(20.0, 0.0, 10.0, 10.0));
        let c = store.append(rect(40.0, 0.0, 10.0, 10.0));

        assert!(store.patch(b, &NodePatch::new().size(50.0, 60.0), 10.0));
        assert_eq!(ids(&store), vec![a, b, c]);
        assert!((store.find(b).unwrap().width - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut store = NodeStore::new();
        store.append(rect(0.0, 0.0, 10.0, 10.0));
        let before = store.clone();
        assert!(!store.patch(uuid::Uuid::new_v4(), &NodePatch::new().size(1.0, 1.0), 10.0));
        assert_eq!(store, before);
    }

    #[test]
    fn test_patch_many_counts_existing() {
        let mut store = NodeStore::new();
        let a = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let b = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let patched = store.patch_many(&[a, b, uuid::Uuid::new_v4()], &NodePatch::new().stroke_width(5.0), 10.0);
        assert_eq!(patched, 2);
        assert!(store.all().iter().all(|n| (n.style.stroke_width - 5.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_remove() {
        let mut store = NodeStore::new();
        let a = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let b = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let c = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let removed = store.remove(&[c, a]);
        assert_eq!(removed.iter().map(|n| n.id()).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(ids(&store), vec![b]);
    }

    #[test]
    fn test_move_to_index() {
        let mut store = NodeStore::new();
        let a = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let b = store.append(rect(0.0, 0.0, 10.0, 10.0));
        let c = store.append(rect(0.0, 0.0, 10.0, 10.0));
        assert!(store.move_to_index(c, 0));
        assert_eq!(ids(&store), vec![c, a, b]);
        assert!(store.move_to_index(c, 99));
        assert_eq!(ids(&store), vec![a, b, c]);
    }

    #[test]
    fn test_nodes_in_rect() {
        let mut store = NodeStore::new();
        let a = store.append(rect(0.0, 0.0, 100.0, 100.0));
        let _b = store.append(rect(200.0, 200.0, 50.0, 50.0));
        assert_eq!(store.nodes_in_rect(Rect::new(0.0, 0.0, 100.0, 100.0)), vec![a]);
        assert!(store.nodes_in_rect(Rect::new(120.0, 120.0, 180.0, 180.0)).is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut store = NodeStore::new();
        store.append(rect(1.0, 2.0, 30.0, 40.0));
        store.append(Node::of_kind(NodeKind::Sticky, Point::ZERO, Size::new(200.0, 200.0), &TextStyle::default()));
        let json = store.to_json().unwrap();
        let back = NodeStore::from_json(&json).unwrap();
        assert_eq!(back, store);
    }
}
