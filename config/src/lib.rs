//! # Config Crate
//!
//! Centralized configuration constants for the SQL AST pipeline.
//! Stack-growth thresholds and traversal budgets are defined here so that
//! every pass built on the traversal engine agrees on the same limits.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{TraversalLimits, DEFAULT_MAX_DEPTH};
//!
//! let limits = TraversalLimits::default();
//! assert_eq!(limits.max_depth, DEFAULT_MAX_DEPTH);
//!
//! // Tighter limits for an untrusted statement.
//! let strict = TraversalLimits::new(32, 4096).unwrap();
//! assert!(strict.max_depth < limits.max_depth);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated**: Runtime-tunable values go through a checked constructor

pub mod constants;

#[cfg(test)]
mod tests;
