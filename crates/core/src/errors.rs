use thiserror::Error;

use crate::domain::opportunity::Stage;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid stage transition from {from:?} to {to:?}")]
    InvalidStageTransition { from: Stage, to: Stage },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}
