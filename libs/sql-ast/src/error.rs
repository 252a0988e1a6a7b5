//! # Traversal Errors
//!
//! Reasons a pass records when it stops a traversal. The engine itself only
//! reports a boolean; these live on the visitor that decided to abort.

use thiserror::Error;

/// Why a budgeted pass stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// Entering the next node would exceed the nesting limit.
    #[error("traversal exceeded maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    /// The pass already entered as many nodes as it may.
    #[error("traversal exceeded budget of {limit} nodes")]
    NodeBudgetExceeded { limit: usize },

    /// The wrapped pass returned false at a node of this kind.
    #[error("pass aborted at {kind}")]
    Aborted { kind: &'static str },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TraversalError::DepthExceeded { limit: 3 };
        assert_eq!(err.to_string(), "traversal exceeded maximum depth of 3");
        let err = TraversalError::Aborted { kind: "SetStmt" };
        assert!(err.to_string().contains("SetStmt"));
    }
}
