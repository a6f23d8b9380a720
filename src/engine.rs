use crate::frontier::Frontier;
use crate::node::{Arena, Node, NodeId};
use crate::solution::SolutionIter;
use crate::stat::Stats;
use crate::state::SearchState;

use std::time::Instant;
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// Where a search currently stands. `Succeeded`, `Failed` and `OutOfMemory`
/// are terminal; stepping a terminal (or not yet initialized) engine is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotInitialized,
    Searching,
    Succeeded,
    Failed,
    OutOfMemory,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Status::Succeeded | Status::Failed | Status::OutOfMemory
        )
    }
}

/// Misuse of the solution accessors, reported instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("no solution to access: search status is {0:?}")]
    NotSucceeded(Status),
    #[error("solution chain was already released")]
    AlreadyReleased,
}

/// Step-driven A* over any [`SearchState`] implementation.
///
/// The engine owns every node of one search. Drive it by calling [`step`]
/// until the returned status leaves `Searching` (or let [`solve`] loop for
/// you), then walk the solution with [`solution_forward`] /
/// [`solution_backward`].
///
/// [`step`]: AStarSearch::step
/// [`solve`]: AStarSearch::solve
/// [`solution_forward`]: AStarSearch::solution_forward
/// [`solution_backward`]: AStarSearch::solution_backward
pub struct AStarSearch<S: SearchState> {
    arena: Arena<S>,
    frontier: Frontier,
    visited: Vec<NodeId>,
    start: Option<NodeId>,
    goal: Option<NodeId>,
    status: Status,
    steps: usize,
    cancel_requested: bool,
    solution_released: bool,
    stats: Stats,
}

impl<S: SearchState> AStarSearch<S> {
    pub fn new() -> Self {
        AStarSearch {
            arena: Arena::new(),
            frontier: Frontier::new(),
            visited: Vec::new(),
            start: None,
            goal: None,
            status: Status::NotInitialized,
            steps: 0,
            cancel_requested: false,
            solution_released: false,
            stats: Stats::default(),
        }
    }

    /// Register the start and goal states and enter `Searching`.
    ///
    /// Re-initializing a used engine restarts it from scratch; every node of
    /// the previous search is released first.
    pub fn initialize(&mut self, start: S, goal: S) {
        self.arena.release_all();
        self.frontier.clear();
        self.visited.clear();
        self.steps = 0;
        self.cancel_requested = false;
        self.solution_released = false;
        self.stats = Stats::default();

        let h = start.heuristic(&goal);
        let goal_id = self.arena.alloc(Node::new(goal));
        let mut root = Node::new(start);
        root.h = h;
        root.f = h; // g is zero at the start
        let start_id = self.arena.alloc(root);

        self.start = Some(start_id);
        self.goal = Some(goal_id);
        self.frontier.push(h, start_id);
        self.status = Status::Searching;
        debug!("search initialized, start h {h}");
    }

    /// Perform one unit of work: a terminal no-op, the failure detection, or
    /// exactly one node expansion. Returns the status afterwards.
    pub fn step(&mut self) -> Status {
        if self.status != Status::Searching {
            return self.status;
        }
        // Every working call counts, including the one that first detects
        // exhaustion or cancellation.
        self.steps += 1;

        if self.frontier.is_empty() || self.cancel_requested {
            debug!(
                "search failed at step {}: {}",
                self.steps,
                if self.cancel_requested {
                    "cancelled"
                } else {
                    "frontier exhausted"
                }
            );
            self.release_everything();
            self.status = Status::Failed;
            return self.status;
        }

        let entry = self.frontier.pop().expect("frontier checked non-empty");
        let current = entry.id;
        self.stats.expanded_nodes += 1;
        trace!("expand node {current:?} with f {}", entry.f);

        let start_id = self.start.expect("searching engine has a start");
        let goal_id = self.goal.expect("searching engine has a goal");

        let reached_goal = {
            let goal = self.arena.get(goal_id);
            self.arena.get(current).state.is_goal(&goal.state)
        };
        if reached_goal {
            self.finish_success(current, start_id, goal_id);
            return self.status;
        }

        let produced = {
            let node = self.arena.get(current);
            let parent_state = match node.parent {
                Some(parent) => Some(&self.arena.get(parent).state),
                None => None,
            };
            node.state.successors(parent_state)
        };
        let candidates = match produced {
            Ok(candidates) => candidates,
            Err(_) => {
                debug!("successor generation exhausted at step {}", self.steps);
                self.arena.release(current);
                self.release_everything();
                self.status = Status::OutOfMemory;
                return self.status;
            }
        };

        self.stats.generated_successors += candidates.len();
        for candidate in candidates {
            self.admit_candidate(current, goal_id, candidate);
        }

        self.visited.push(current);
        self.status
    }

    /// Drive [`AStarSearch::step`] until the search leaves `Searching`.
    #[instrument(skip_all, name = "a_star_solve", level = "debug")]
    pub fn solve(&mut self) -> Status {
        let solve_start = Instant::now();
        while self.step() == Status::Searching {}
        self.stats.time_us = solve_start.elapsed().as_micros();
        debug!("solve finished {:?} after {} steps", self.status, self.steps);
        if self.status == Status::Succeeded {
            self.stats.print();
        }
        self.status
    }

    /// Ask the search to stop. Observed at the start of the next [`step`]
    /// call, never mid-expansion; once observed the search terminates as
    /// `Failed` and releases all nodes.
    ///
    /// [`step`]: AStarSearch::step
    pub fn request_cancel(&mut self) {
        self.cancel_requested = true;
    }

    /// Iterate the solution from the start state toward the goal.
    pub fn solution_forward(&self) -> Result<SolutionIter<'_, S>, UsageError> {
        self.solution_iter(false)
    }

    /// Iterate the solution from the goal state back toward the start.
    pub fn solution_backward(&self) -> Result<SolutionIter<'_, S>, UsageError> {
        self.solution_iter(true)
    }

    /// Release the retained start-goal chain. Valid exactly once, after a
    /// successful search has been consumed.
    pub fn release_solution(&mut self) -> Result<(), UsageError> {
        if self.status != Status::Succeeded {
            return Err(UsageError::NotSucceeded(self.status));
        }
        if self.solution_released {
            return Err(UsageError::AlreadyReleased);
        }
        let start_id = self.start.take().expect("succeeded search has a start");
        let goal_id = self.goal.take().expect("succeeded search has a goal");

        // When start was itself the goal there is no forward chain and the
        // goal node must be dropped separately.
        let start_has_child = self.arena.get(start_id).child.is_some();
        let mut walk = Some(start_id);
        while let Some(id) = walk {
            walk = self.arena.get(id).child;
            self.arena.release(id);
        }
        if !start_has_child {
            self.arena.release(goal_id);
        }
        self.solution_released = true;
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of `step` calls that performed work so far.
    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Goal handling: move the goal node onto the found chain, install the
    /// forward links, and drop everything off the chain.
    fn finish_success(&mut self, current: NodeId, start_id: NodeId, goal_id: NodeId) {
        let (parent, g) = {
            let node = self.arena.get(current);
            (node.parent, node.g)
        };
        {
            let goal = self.arena.get_mut(goal_id);
            goal.parent = parent;
            goal.g = g;
        }

        if current != start_id {
            // The goal node replaces the popped node on the chain.
            self.arena.release(current);
            let mut child = goal_id;
            let mut parent = self.arena.get(goal_id).parent;
            while let Some(id) = parent {
                self.arena.get_mut(id).child = Some(child);
                if id == start_id {
                    break;
                }
                child = id;
                parent = self.arena.get(id).parent;
            }
        }

        // Everything without a forward link is off the final path.
        for id in self.frontier.clear() {
            if self.arena.get(id).child.is_none() {
                self.arena.release(id);
            }
        }
        for id in std::mem::take(&mut self.visited) {
            if self.arena.get(id).child.is_none() {
                self.arena.release(id);
            }
        }

        self.stats.cost = g;
        self.status = Status::Succeeded;
        debug!(
            "goal reached with cost {g} after {} steps, {} nodes retained",
            self.steps,
            self.arena.live()
        );
    }

    /// One candidate from the current expansion: dominate-check against both
    /// lists, then insert, superseding any stale entry for the same state.
    fn admit_candidate(&mut self, current: NodeId, goal_id: NodeId, candidate: S) {
        let new_g = {
            let node = self.arena.get(current);
            node.g + node.state.transition_cost(&candidate)
        };

        let open_match = self.find_open(&candidate);
        if let Some(id) = open_match {
            if self.arena.get(id).g <= new_g {
                self.stats.dominated_successors += 1;
                return;
            }
        }
        let visited_match = self.find_visited(&candidate);
        if let Some(id) = visited_match {
            if self.arena.get(id).g <= new_g {
                self.stats.dominated_successors += 1;
                return;
            }
        }

        // The candidate wins. A stale visited entry is reopened; a stale
        // frontier entry is replaced, restoring heap order.
        if let Some(id) = visited_match {
            debug!("reopen {id:?} with cheaper g {new_g}");
            self.visited.retain(|&v| v != id);
            self.arena.release(id);
            self.stats.reopened_nodes += 1;
        }
        if let Some(id) = open_match {
            debug!("supersede frontier entry {id:?} with cheaper g {new_g}");
            self.frontier.remove(id);
            self.arena.release(id);
        }

        let h = candidate.heuristic(&self.arena.get(goal_id).state);
        let mut node = Node::new(candidate);
        node.parent = Some(current);
        node.g = new_g;
        node.h = h;
        node.f = new_g + h;
        let id = self.arena.alloc(node);
        self.frontier.push(new_g + h, id);
    }

    /// Release every remaining node: both lists plus the goal placeholder.
    fn release_everything(&mut self) {
        for id in self.frontier.clear() {
            self.arena.release(id);
        }
        for id in std::mem::take(&mut self.visited) {
            self.arena.release(id);
        }
        if let Some(goal_id) = self.goal.take() {
            self.arena.release(goal_id);
        }
        self.start = None;
    }

    fn find_open(&self, state: &S) -> Option<NodeId> {
        self.frontier
            .iter()
            .map(|entry| entry.id)
            .find(|&id| self.arena.get(id).state.same_as(state))
    }

    fn find_visited(&self, state: &S) -> Option<NodeId> {
        self.visited
            .iter()
            .copied()
            .find(|&id| self.arena.get(id).state.same_as(state))
    }

    fn solution_iter(&self, backward: bool) -> Result<SolutionIter<'_, S>, UsageError> {
        if self.status != Status::Succeeded {
            return Err(UsageError::NotSucceeded(self.status));
        }
        if self.solution_released {
            return Err(UsageError::AlreadyReleased);
        }
        let origin = if backward { self.goal } else { self.start };
        Ok(SolutionIter::new(&self.arena, origin, backward))
    }
}

impl<S: SearchState> Default for AStarSearch<S> {
    fn default() -> Self {
        Self::new()
    }
}
