use thiserror::Error;

/// Signalled by [`SearchState::successors`] when the domain genuinely cannot
/// produce its successor list (allocation failure, exhausted backing store).
///
/// Returning `Ok` with an empty list is the normal dead-end case and is not
/// an error; the engine simply stops extending that branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("successor generation exhausted available resources")]
pub struct ResourceExhausted;

/// Contract a domain state must satisfy to be searchable.
///
/// The engine owns copies of states and never inspects their structure; a
/// state may borrow immutable domain configuration (a road map, a maze grid)
/// for the duration of the search.
pub trait SearchState: Clone {
    /// Estimated remaining cost from this state to `goal`. Must be >= 0.
    ///
    /// Optimality of the reconstructed path is only guaranteed when the
    /// estimate is admissible (never overestimates the true remaining cost).
    /// The engine does not enforce this.
    fn heuristic(&self, goal: &Self) -> f32;

    /// Whether this state satisfies the goal.
    fn is_goal(&self, goal: &Self) -> bool;

    /// Produce every state reachable by one legal transition.
    ///
    /// `parent` is the state this one was expanded from, when there is one;
    /// domains may use it to avoid regenerating the immediate predecessor.
    /// `Err(ResourceExhausted)` is reserved for genuine resource exhaustion
    /// and terminates the search as out-of-memory.
    fn successors(&self, parent: Option<&Self>) -> Result<Vec<Self>, ResourceExhausted>;

    /// Cost of the transition from this state to `successor`. Must be >= 0;
    /// need not be symmetric.
    fn transition_cost(&self, successor: &Self) -> f32;

    /// Equivalence for duplicate detection, decoupled from any incidental
    /// representation differences.
    fn same_as(&self, other: &Self) -> bool;
}
