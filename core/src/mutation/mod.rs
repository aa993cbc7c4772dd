//! Optimistic cache updates around remote writes.

mod optimistic;
mod transitions;

pub use optimistic::OptimisticMutation;
pub use transitions::{MutationPhase, MutationTransition, TransitionError};
