//! Selection model.

use crate::nodes::NodeId;
use crate::store::NodeStore;

/// Order-preserving set of selected node ids.
///
/// The most recently added id is the primary selection, the one property
/// editors populate from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in insertion order.
    pub fn current(&self) -> &[NodeId] {
        &self.ids
    }

    /// Most recently added id.
    pub fn primary(&self) -> Option<NodeId> {
        self.ids.last().copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Replace the selection. Duplicates keep their first position.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.ids.clear();
        self.extend(ids);
    }

    /// Add an id. Adding an already selected id makes it primary.
    pub fn add(&mut self, id: NodeId) {
        self.ids.retain(|&i| i != id);
        self.ids.push(id);
    }

    /// Add every id not already selected, in order.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn remove(&mut self, id: NodeId) {
        self.ids.retain(|&i| i != id);
    }

    /// Flip membership of `id`. Returns true if it is selected afterwards.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.contains(id) {
            self.remove(id);
            false
        } else {
            self.add(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer exist in `store`.
    pub fn retain_existing(&mut self, store: &NodeStore) {
        self.ids.retain(|&id| store.contains(id));
    }
}
