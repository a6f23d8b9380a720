use crate::node::NodeId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One frontier entry. The f value is frozen at insertion time; a cost
/// improvement removes the stale entry and inserts a fresh one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub(crate) f: f32,
    pub(crate) id: NodeId,
}

// Ordering for the priority queue where lower f is given higher priority.
// Entries with equal f compare equal, so ties pop in whatever order the heap
// holds them; no total order over equal-f entries is promised.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.total_cmp(&self.f)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f
    }
}

impl Eq for FrontierEntry {}

/// Open list: discovered-but-unexpanded nodes keyed by ascending f.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
        }
    }

    pub(crate) fn push(&mut self, f: f32, id: NodeId) {
        self.heap.push(FrontierEntry { f, id });
    }

    /// Remove and return the minimum-f entry.
    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// Remove the entry for `id`, re-establishing heap order over the
    /// remainder. O(len); only called when a rediscovered path is cheaper,
    /// which is rare relative to insertion.
    pub(crate) fn remove(&mut self, id: NodeId) {
        self.heap.retain(|entry| entry.id != id);
    }

    /// Walk every entry, in no particular order. Used for the
    /// duplicate-state scan during expansion.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.heap.iter()
    }

    /// Drain the frontier, yielding the ids it held.
    pub(crate) fn clear(&mut self) -> Vec<NodeId> {
        self.heap.drain().map(|entry| entry.id).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
