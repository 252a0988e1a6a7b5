//! Centralized traversal limits shared across the SQL AST pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use thiserror::Error;

// =============================================================================
// STACK CONSTANTS
// =============================================================================

/// Remaining stack below which traversal grows onto a fresh segment via the
/// `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Bytes of stack allocated each time the red zone is reached.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Default nesting depth a budgeted pass may descend to.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MAX_DEPTH;
/// assert!(DEFAULT_MAX_DEPTH >= 64);
/// ```
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Default number of nodes a budgeted pass may enter.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
/// assert!(DEFAULT_MAX_NODES > DEFAULT_MAX_DEPTH);
/// ```
pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Work limits applied by a budgeted traversal.
///
/// # Examples
/// ```
/// use config::constants::TraversalLimits;
/// let limits = TraversalLimits::default();
/// assert!(limits.max_depth > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    /// Deepest nesting level (root is depth 1) a pass may enter.
    pub max_depth: usize,
    /// Total number of nodes a pass may enter.
    pub max_nodes: usize,
}

impl TraversalLimits {
    /// Builds limits, rejecting zero for either bound.
    ///
    /// # Examples
    /// ```
    /// use config::constants::TraversalLimits;
    /// let limits = TraversalLimits::new(8, 100).expect("valid limits");
    /// assert_eq!(limits.max_depth, 8);
    /// ```
    pub fn new(max_depth: usize, max_nodes: usize) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::InvalidDepth(max_depth));
        }
        if max_nodes == 0 {
            return Err(ConfigError::InvalidNodeBudget(max_nodes));
        }
        Ok(Self {
            max_depth,
            max_nodes,
        })
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Raised when the depth limit is zero.
    #[error("max_depth must be positive: {0}")]
    InvalidDepth(usize),
    /// Raised when the node budget is zero.
    #[error("max_nodes must be positive: {0}")]
    InvalidNodeBudget(usize),
}

#[cfg(test)]
mod tests;
