use crate::node::{Arena, NodeId};
use crate::state::SearchState;

/// Walks the reconstructed start-goal chain in one direction.
///
/// Forward iteration follows `child` links from the start; backward
/// iteration follows `parent` links from the goal. The two directions are
/// independent iterators over shared borrows of the engine, so both may be
/// held at once.
pub struct SolutionIter<'a, S: SearchState> {
    arena: &'a Arena<S>,
    next: Option<NodeId>,
    backward: bool,
}

impl<'a, S: SearchState> SolutionIter<'a, S> {
    pub(crate) fn new(arena: &'a Arena<S>, origin: Option<NodeId>, backward: bool) -> Self {
        SolutionIter {
            arena,
            next: origin,
            backward,
        }
    }
}

impl<'a, S: SearchState> Iterator for SolutionIter<'a, S> {
    type Item = &'a S;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.arena.get(id);
        self.next = if self.backward {
            node.parent
        } else {
            node.child
        };
        Some(&node.state)
    }
}
