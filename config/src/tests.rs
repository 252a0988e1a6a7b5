//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between configuration constants.

use crate::constants::*;

// =============================================================================
// STACK TESTS
// =============================================================================

#[test]
fn test_red_zone_is_smaller_than_growth() {
    assert!(
        STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES,
        "red zone must fit inside a freshly grown segment"
    );
}

#[test]
fn test_red_zone_holds_a_few_frames() {
    assert!(STACKER_RED_ZONE_BYTES >= 16 * 1024);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_node_budget_exceeds_depth() {
    assert!(
        DEFAULT_MAX_NODES >= DEFAULT_MAX_DEPTH,
        "a tree of depth N has at least N nodes"
    );
}

#[test]
fn test_minimal_limits_are_accepted() {
    let limits = TraversalLimits::new(1, 1).unwrap();
    assert_eq!(limits.max_depth, 1);
    assert_eq!(limits.max_nodes, 1);
}
