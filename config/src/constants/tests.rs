//! Tests for the centralized traversal limits.

use super::*;

/// Ensures default limits are sane and positive.
///
/// # Examples
/// ```
/// use config::constants::TraversalLimits;
/// let limits = TraversalLimits::default();
/// assert!(limits.max_nodes > 0);
/// ```
#[test]
fn default_limits_are_valid() {
    let limits = TraversalLimits::default();
    assert_eq!(limits.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(limits.max_nodes, DEFAULT_MAX_NODES);
    assert_eq!(TraversalLimits::new(limits.max_depth, limits.max_nodes), Ok(limits));
}

/// Validates the builder rejects zero bounds.
///
/// # Examples
/// ```
/// use config::constants::TraversalLimits;
/// assert!(TraversalLimits::new(0, 10).is_err());
/// ```
#[test]
fn new_validates_inputs() {
    assert_eq!(
        TraversalLimits::new(0, 10).unwrap_err(),
        ConfigError::InvalidDepth(0)
    );
    assert_eq!(
        TraversalLimits::new(4, 0).unwrap_err(),
        ConfigError::InvalidNodeBudget(0)
    );
}

#[test]
fn config_error_messages_name_the_field() {
    assert!(ConfigError::InvalidDepth(0).to_string().contains("max_depth"));
    assert!(ConfigError::InvalidNodeBudget(0).to_string().contains("max_nodes"));
}
