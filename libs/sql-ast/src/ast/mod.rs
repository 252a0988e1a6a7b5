//! # AST Nodes
//!
//! Typed node definitions. Each node type implements [`Node`](crate::Node)
//! next to its definition, declaring which of its fields are children.
//!
//! ## Structure
//!
//! ```text
//! ast/
//! ├── mod.rs   - This file
//! ├── misc.rs  - Statement enum, prepared statements, SHOW, SET, transactions
//! ├── dml.rs   - SELECT / INSERT / DELETE and table references
//! └── expr.rs  - Expressions, column references, LIKE patterns
//! ```
//!
//! Adding a statement form means adding a variant to [`Statement`] and to
//! [`NodeRef`](crate::NodeRef); every exhaustive `match` over either must then
//! be revisited, which the compiler enforces.

pub mod dml;
pub mod expr;
pub mod misc;

pub use dml::*;
pub use expr::*;
pub use misc::*;
