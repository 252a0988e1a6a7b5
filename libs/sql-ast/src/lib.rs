//! # SQL AST Crate
//!
//! Typed statement nodes for a MySQL-flavoured SQL dialect and the traversal
//! protocol every later compiler phase (name resolution, type checking,
//! rewrites, code generation) is written against.
//!
//! ## Architecture
//!
//! ```text
//! parser (external) → Statement tree → traverse(root, pass) → (rewritten tree, ok)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sql_ast::{traverse, NodeRef, Statement, UseStmt, Visitor};
//!
//! #[derive(Default)]
//! struct Kinds(Vec<&'static str>);
//!
//! impl Visitor for Kinds {
//!     fn enter(&mut self, node: NodeRef<'_>) -> bool {
//!         self.0.push(node.kind());
//!         true
//!     }
//! }
//!
//! let mut pass = Kinds::default();
//! let (_, ok) = traverse(Statement::Use(UseStmt { db_name: "test".into() }), &mut pass);
//! assert!(ok);
//! assert_eq!(pass.0, ["UseStmt"]);
//! ```
//!
//! ## Design Principles
//!
//! - **Closed taxonomy**: statements are one enum, matched exhaustively
//! - **Typed replacement**: each leave hook returns its own capability type
//! - **Boolean abort**: passes stop by returning false and keep the reason
//!   on themselves
//! - **No Evaluation**: no parsing, validation or execution happens here

pub mod ast;
pub mod error;
pub mod printer;
pub mod visitor;

// Re-exports for convenience
pub use ast::*;
pub use error::TraversalError;
pub use printer::print;
pub use visitor::{traverse, Budget, Node, NodeRef, Visitor};
