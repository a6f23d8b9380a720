/// Stable handle to a node slot in the [`Arena`]. Ids are recycled after
/// release, so a handle is only meaningful while its node is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

/// Engine-internal wrapper pairing a state with its path-cost bookkeeping.
///
/// `parent` points back along the cheapest discovered path; `child` is only
/// installed on the final chain once a search succeeds.
#[derive(Debug, Clone)]
pub(crate) struct Node<S> {
    pub(crate) state: S,
    pub(crate) g: f32,
    pub(crate) h: f32,
    pub(crate) f: f32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) child: Option<NodeId>,
}

impl<S> Node<S> {
    pub(crate) fn new(state: S) -> Self {
        Node {
            state,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
            child: None,
        }
    }
}

/// Slot store owning every node of one search.
///
/// Replaces a raw-pointer node graph: parent/child links are `NodeId`
/// indices, release clears the slot and recycles the id, and dropping the
/// arena reclaims everything that is still live.
#[derive(Debug)]
pub(crate) struct Arena<S> {
    slots: Vec<Option<Node<S>>>,
    free: Vec<usize>,
}

impl<S> Arena<S> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<S>) -> NodeId {
        match self.free.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx].is_none());
                self.slots[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Release one node. Releasing a vacant slot is an engine bug.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert!(self.slots[id.0].is_some(), "release of vacant node slot");
        self.slots[id.0] = None;
        self.free.push(id.0);
    }

    /// Release every live node.
    pub(crate) fn release_all(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<S> {
        self.slots[id.0].as_ref().expect("vacant node slot")
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        self.slots[id.0].as_mut().expect("vacant node slot")
    }

    /// Number of live nodes.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_release_recycles_slots() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(Node::new(1));
        let b = arena.alloc(Node::new(2));
        assert_eq!(arena.live(), 2);

        arena.release(a);
        assert_eq!(arena.live(), 1);

        // The freed slot is reused before the vector grows.
        let c = arena.alloc(Node::new(3));
        assert_eq!(c.0, a.0);
        assert_eq!(arena.live(), 2);
        assert_eq!(arena.get(b).state, 2);
        assert_eq!(arena.get(c).state, 3);
    }

    #[test]
    fn test_release_all_empties_arena() {
        let mut arena: Arena<u32> = Arena::new();
        for i in 0..5 {
            arena.alloc(Node::new(i));
        }
        arena.release_all();
        assert_eq!(arena.live(), 0);

        let id = arena.alloc(Node::new(9));
        assert_eq!(arena.get(id).state, 9);
        assert_eq!(arena.live(), 1);
    }

    #[test]
    fn test_links_are_plain_ids() {
        let mut arena: Arena<&str> = Arena::new();
        let parent = arena.alloc(Node::new("start"));
        let mut child = Node::new("next");
        child.parent = Some(parent);
        let child_id = arena.alloc(child);

        arena.get_mut(parent).child = Some(child_id);
        assert_eq!(arena.get(child_id).parent, Some(parent));
        assert_eq!(arena.get(parent).child, Some(child_id));
    }
}
