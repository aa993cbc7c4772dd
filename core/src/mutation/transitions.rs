//! Mutation phases and the transitions allowed between them.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPhase {
    Idle,
    /// Snapshot taken and optimistic value written; request pending.
    OptimisticallyApplied,
    SettledSuccess,
    /// Request failed and the snapshot was restored.
    SettledFailureRolledBack,
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: MutationPhase,
        to: MutationPhase,
    },
    #[error("Cannot transition from terminal state {state:?}")]
    FromTerminalState { state: MutationPhase },
}

pub struct MutationTransition;

impl MutationTransition {
    pub fn validate(from: MutationPhase, to: MutationPhase) -> Result<(), TransitionError> {
        if Self::is_terminal(from) {
            return Err(TransitionError::FromTerminalState { state: from });
        }

        let is_valid = matches!(
            (from, to),
            (MutationPhase::Idle, MutationPhase::OptimisticallyApplied)
                | (
                    MutationPhase::OptimisticallyApplied,
                    MutationPhase::SettledSuccess | MutationPhase::SettledFailureRolledBack
                )
        );

        if is_valid {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }

    pub fn is_terminal(phase: MutationPhase) -> bool {
        matches!(
            phase,
            MutationPhase::SettledSuccess | MutationPhase::SettledFailureRolledBack
        )
    }

    pub fn phase_description(phase: MutationPhase) -> &'static str {
        match phase {
            MutationPhase::Idle => "idle",
            MutationPhase::OptimisticallyApplied => "optimistically applied",
            MutationPhase::SettledSuccess => "settled (success)",
            MutationPhase::SettledFailureRolledBack => "settled (failure, rolled back)",
        }
    }
}
