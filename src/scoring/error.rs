use thiserror::Error;

use super::interpreter::Phase;

/// Errors that abort a scenario evaluation. No partial score is ever returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoringError {
    /// A month paid a bill for an account that was never declared.
    #[error("month '{month}' pays unknown account '{account}'")]
    UnknownAccount { account: String, month: String },

    /// An interpreter operation was called in the wrong phase.
    #[error("{operation} is not allowed while the interpreter is {phase}")]
    OutOfOrderCall {
        operation: &'static str,
        phase: Phase,
    },
}

impl ScoringError {
    pub fn out_of_order(operation: &'static str, phase: Phase) -> Self {
        ScoringError::OutOfOrderCall { operation, phase }
    }
}
