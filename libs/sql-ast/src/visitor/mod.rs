//! # Traversal Engine
//!
//! The enter/leave protocol every compiler pass runs on.
//!
//! ## Protocol
//!
//! For each node, in this order:
//!
//! 1. [`Visitor::enter`] sees the node. `false` stops the whole traversal here:
//!    no child is touched and no leave hook runs.
//! 2. Declared children are accepted in their fixed order. Absent optional
//!    children are skipped. The first child that fails stops its siblings and
//!    the parent reports failure without calling its own leave hook.
//! 3. The capability's `leave_*` hook borrows the node and returns an optional
//!    replacement plus whether to continue. A replacement is written back only
//!    when the hook also returns `true`; on `false` the node stays as it was
//!    after its children.
//!
//! ## Structure
//!
//! ```text
//! visitor/
//! ├── mod.rs     - Visitor contract, NodeRef, Node, traverse
//! ├── budget.rs  - Depth and node-count limited wrapper visitor
//! └── tests.rs   - Protocol tests over every node kind
//! ```

pub mod budget;

pub use budget::Budget;

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use log::{debug, trace};
use stacker::maybe_grow;

use crate::ast::{
    BeginStmt, ColumnRefExpr, CommitStmt, DeallocateStmt, DeleteStmt, DmlStmt, ExecuteStmt,
    ExplainStmt, Expr, InsertStmt, PatternLikeExpr, PrepareStmt, RollbackStmt, SelectStmt,
    SetStmt, ShowStmt, Statement, TableRef, UseStmt, VariableAssignment,
};

// =============================================================================
// NODE VIEW
// =============================================================================

/// Borrowed view of any node, handed to [`Visitor::enter`] and [`Visitor::leave`].
///
/// Statement variants are flattened so a pass can match on the concrete form
/// without first unwrapping [`Statement`] or [`DmlStmt`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Explain(&'a ExplainStmt),
    Prepare(&'a PrepareStmt),
    Deallocate(&'a DeallocateStmt),
    Execute(&'a ExecuteStmt),
    Show(&'a ShowStmt),
    Begin(&'a BeginStmt),
    Commit(&'a CommitStmt),
    Rollback(&'a RollbackStmt),
    Use(&'a UseStmt),
    Set(&'a SetStmt),
    Assignment(&'a VariableAssignment),
    Select(&'a SelectStmt),
    Insert(&'a InsertStmt),
    Delete(&'a DeleteStmt),
    TableRef(&'a TableRef),
    ColumnRef(&'a ColumnRefExpr),
    Pattern(&'a PatternLikeExpr),
    Expr(&'a Expr),
}

impl NodeRef<'_> {
    /// Stable name of the node kind, used in logs and error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Explain(_) => "ExplainStmt",
            NodeRef::Prepare(_) => "PrepareStmt",
            NodeRef::Deallocate(_) => "DeallocateStmt",
            NodeRef::Execute(_) => "ExecuteStmt",
            NodeRef::Show(_) => "ShowStmt",
            NodeRef::Begin(_) => "BeginStmt",
            NodeRef::Commit(_) => "CommitStmt",
            NodeRef::Rollback(_) => "RollbackStmt",
            NodeRef::Use(_) => "UseStmt",
            NodeRef::Set(_) => "SetStmt",
            NodeRef::Assignment(_) => "VariableAssignment",
            NodeRef::Select(_) => "SelectStmt",
            NodeRef::Insert(_) => "InsertStmt",
            NodeRef::Delete(_) => "DeleteStmt",
            NodeRef::TableRef(_) => "TableRef",
            NodeRef::ColumnRef(_) => "ColumnRefExpr",
            NodeRef::Pattern(_) => "PatternLikeExpr",
            NodeRef::Expr(_) => "Expr",
        }
    }

    /// Returns true for nodes that are complete statements.
    pub fn is_statement(&self) -> bool {
        !matches!(
            self,
            NodeRef::Assignment(_)
                | NodeRef::TableRef(_)
                | NodeRef::ColumnRef(_)
                | NodeRef::Pattern(_)
                | NodeRef::Expr(_)
        )
    }
}

// =============================================================================
// VISITOR CONTRACT
// =============================================================================

/// A compiler pass.
///
/// Implement [`enter`](Visitor::enter) to filter or abort top-down, and either
/// [`leave`](Visitor::leave) to observe nodes bottom-up or one of the typed
/// `leave_*` hooks to replace them. Each typed hook can only return a node of
/// the capability it received, so a replacement always fits the slot it goes
/// back into. `None` keeps the node. A replacement returned together with
/// `false` is dropped.
///
/// Passes keep their own state (counters, scopes, the reason for an abort) as
/// fields on the visitor.
///
/// # Examples
///
/// ```
/// use sql_ast::{traverse, Expr, Literal, SetStmt, Statement, VariableAssignment, Visitor};
///
/// struct Doubler;
///
/// impl Visitor for Doubler {
///     fn leave_expr(&mut self, expr: &Expr) -> (Option<Expr>, bool) {
///         match expr {
///             Expr::Literal(Literal::Int(n)) => (Some(Expr::int(n * 2)), true),
///             _ => (None, true),
///         }
///     }
/// }
///
/// let stmt = Statement::Set(SetStmt {
///     variables: vec![VariableAssignment::user("a", Expr::int(21))],
/// });
/// let (stmt, ok) = traverse(stmt, &mut Doubler);
/// assert!(ok);
/// let Statement::Set(set) = stmt else { unreachable!() };
/// assert_eq!(set.variables[0].value, Expr::int(42));
/// ```
#[allow(unused_variables)]
pub trait Visitor {
    /// Called once before any child of `node` is visited.
    fn enter(&mut self, node: NodeRef<'_>) -> bool {
        true
    }

    /// Called by the default `leave_*` hooks once all children succeeded.
    fn leave(&mut self, node: NodeRef<'_>) -> bool {
        true
    }

    /// Leave hook for every [`Statement`] variant.
    fn leave_statement(&mut self, stmt: &Statement) -> (Option<Statement>, bool) {
        (None, self.leave(stmt.as_node()))
    }

    /// Leave hook for a [`DmlStmt`] held in a DML-only slot (EXPLAIN).
    fn leave_dml(&mut self, stmt: &DmlStmt) -> (Option<DmlStmt>, bool) {
        (None, self.leave(stmt.as_node()))
    }

    fn leave_assignment(
        &mut self,
        assignment: &VariableAssignment,
    ) -> (Option<VariableAssignment>, bool) {
        (None, self.leave(assignment.as_node()))
    }

    fn leave_expr(&mut self, expr: &Expr) -> (Option<Expr>, bool) {
        (None, self.leave(expr.as_node()))
    }

    fn leave_table_ref(&mut self, table: &TableRef) -> (Option<TableRef>, bool) {
        (None, self.leave(table.as_node()))
    }

    fn leave_column_ref(&mut self, column: &ColumnRefExpr) -> (Option<ColumnRefExpr>, bool) {
        (None, self.leave(column.as_node()))
    }

    fn leave_pattern(&mut self, pattern: &PatternLikeExpr) -> (Option<PatternLikeExpr>, bool) {
        (None, self.leave(pattern.as_node()))
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn enter(&mut self, node: NodeRef<'_>) -> bool {
        (**self).enter(node)
    }

    fn leave(&mut self, node: NodeRef<'_>) -> bool {
        (**self).leave(node)
    }

    fn leave_statement(&mut self, stmt: &Statement) -> (Option<Statement>, bool) {
        (**self).leave_statement(stmt)
    }

    fn leave_dml(&mut self, stmt: &DmlStmt) -> (Option<DmlStmt>, bool) {
        (**self).leave_dml(stmt)
    }

    fn leave_assignment(
        &mut self,
        assignment: &VariableAssignment,
    ) -> (Option<VariableAssignment>, bool) {
        (**self).leave_assignment(assignment)
    }

    fn leave_expr(&mut self, expr: &Expr) -> (Option<Expr>, bool) {
        (**self).leave_expr(expr)
    }

    fn leave_table_ref(&mut self, table: &TableRef) -> (Option<TableRef>, bool) {
        (**self).leave_table_ref(table)
    }

    fn leave_column_ref(&mut self, column: &ColumnRefExpr) -> (Option<ColumnRefExpr>, bool) {
        (**self).leave_column_ref(column)
    }

    fn leave_pattern(&mut self, pattern: &PatternLikeExpr) -> (Option<PatternLikeExpr>, bool) {
        (**self).leave_pattern(pattern)
    }
}

// =============================================================================
// NODE CAPABILITY
// =============================================================================

/// Anything that can accept a [`Visitor`].
///
/// Implementors describe their view, their children and their leave hook;
/// [`accept`](Node::accept) ties them together and is the same for every node.
pub trait Node: Sized {
    /// Borrowed view passed to the visitor hooks.
    fn as_node(&self) -> NodeRef<'_>;

    /// Accepts every declared child in order, stopping at the first failure.
    ///
    /// Only [`accept`](Node::accept) should call this.
    fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> (Self, bool);

    /// Asks the capability's `leave_*` hook for a replacement.
    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool);

    /// Runs the enter / children / leave protocol on this subtree.
    fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) -> (Self, bool) {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, move || {
            if !visitor.enter(self.as_node()) {
                trace!("enter stopped traversal at {}", self.as_node().kind());
                return (self, false);
            }
            let (node, ok) = self.accept_children(visitor);
            if !ok {
                return (node, false);
            }
            let (replacement, ok) = node.accept_leave(visitor);
            if !ok {
                trace!("leave stopped traversal at {}", node.as_node().kind());
                return (node, false);
            }
            (replacement.unwrap_or(node), true)
        })
    }
}

impl<N: Node> Node for Box<N> {
    fn as_node(&self) -> NodeRef<'_> {
        (**self).as_node()
    }

    fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> (Self, bool) {
        let (node, ok) = (*self).accept_children(visitor);
        (Box::new(node), ok)
    }

    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool) {
        let (replacement, ok) = (**self).accept_leave(visitor);
        (replacement.map(Box::new), ok)
    }

    fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) -> (Self, bool) {
        let (node, ok) = (*self).accept(visitor);
        (Box::new(node), ok)
    }
}

/// Accepts an optional child; `None` is not a traversal step.
pub(crate) fn accept_opt<N: Node, V: Visitor + ?Sized>(
    node: Option<N>,
    visitor: &mut V,
) -> (Option<N>, bool) {
    match node {
        Some(node) => {
            let (node, ok) = node.accept(visitor);
            (Some(node), ok)
        }
        None => (None, true),
    }
}

/// Accepts a child sequence front to back.
///
/// Elements before a failure keep their committed rewrites. The failing
/// element comes back without its own replacement, and elements after it are
/// returned untouched.
pub(crate) fn accept_seq<N: Node, V: Visitor + ?Sized>(
    items: Vec<N>,
    visitor: &mut V,
) -> (Vec<N>, bool) {
    let mut accepted = Vec::with_capacity(items.len());
    let mut rest = items.into_iter();
    while let Some(item) = rest.next() {
        let (item, ok) = item.accept(visitor);
        accepted.push(item);
        if !ok {
            accepted.extend(rest);
            return (accepted, false);
        }
    }
    (accepted, true)
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Runs `visitor` over the tree rooted at `root`.
///
/// Returns the possibly rewritten root and whether the pass ran to completion.
/// On `false` the visitor's own state explains why.
///
/// # Examples
///
/// ```
/// use sql_ast::{traverse, NodeRef, Statement, BeginStmt, Visitor};
///
/// struct Refuse;
/// impl Visitor for Refuse {
///     fn enter(&mut self, _node: NodeRef<'_>) -> bool {
///         false
///     }
/// }
///
/// let (stmt, ok) = traverse(Statement::Begin(BeginStmt), &mut Refuse);
/// assert!(!ok);
/// assert_eq!(stmt, Statement::Begin(BeginStmt));
/// ```
pub fn traverse<N: Node, V: Visitor + ?Sized>(root: N, visitor: &mut V) -> (N, bool) {
    let kind = root.as_node().kind();
    let (root, ok) = root.accept(visitor);
    if ok {
        debug!("traversal of {kind} completed");
    } else {
        debug!("traversal of {kind} aborted");
    }
    (root, ok)
}
