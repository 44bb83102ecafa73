use thiserror::Error;

use crate::api::types::{ControllerId, EdgeId};

/// A broken attach/detach precondition or a graph that lost its symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{controller}: remove from empty body list")]
    RemoveFromEmpty { controller: ControllerId },
    #[error("{controller}: body not attached")]
    BodyNotAttached { controller: ControllerId },
    #[error("{edge} is not recorded on both endpoints")]
    Asymmetric { edge: EdgeId },
}

/// Errors returned by `ControllerRegistry` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("unknown controller {0}")]
    UnknownController(ControllerId),
    #[error("{controller}: body already attached by {edge}")]
    AlreadyAttached { controller: ControllerId, edge: EdgeId },
    #[error("no {kind} ids left to allocate")]
    IdsExhausted { kind: &'static str },
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

impl ControllerError {
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ControllerError::InvariantViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_converts_into_error() {
        let err: ControllerError = InvariantViolation::RemoveFromEmpty {
            controller: ControllerId(1),
        }
        .into();
        assert!(err.is_invariant_violation());
        assert_eq!(
            err.to_string(),
            "invariant violation: Controller(1): remove from empty body list"
        );
    }

    #[test]
    fn unknown_controller_is_not_a_violation() {
        assert!(!ControllerError::UnknownController(ControllerId(4)).is_invariant_violation());
    }
}
