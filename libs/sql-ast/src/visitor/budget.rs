//! Work-limited traversal.
//!
//! [`Budget`] wraps another pass and stops the traversal once it nests too
//! deeply or has entered too many nodes. The cause is kept in
//! [`Budget::error`].
//!
//! Limits apply per traversal. Entering a root starts a fresh count, so one
//! wrapper can be reused across statements even after an abort.

use config::constants::TraversalLimits;
use log::warn;

use crate::ast::{
    ColumnRefExpr, DmlStmt, Expr, PatternLikeExpr, Statement, TableRef, VariableAssignment,
};
use crate::error::TraversalError;
use crate::visitor::{Node, NodeRef, Visitor};

/// Forwards every hook to `inner` while enforcing [`TraversalLimits`].
///
/// # Examples
/// ```
/// use config::constants::TraversalLimits;
/// use sql_ast::{traverse, Budget, Expr, ExecuteStmt, Statement, TraversalError, Visitor};
///
/// struct Noop;
/// impl Visitor for Noop {}
///
/// let stmt = Statement::Execute(ExecuteStmt {
///     name: "s".into(),
///     id: 0,
///     using_params: vec![Expr::int(1), Expr::int(2), Expr::int(3)],
/// });
/// let mut pass = Budget::new(Noop, TraversalLimits::new(8, 3).unwrap());
/// let (_, ok) = traverse(stmt, &mut pass);
/// assert!(!ok);
/// assert_eq!(pass.error, Some(TraversalError::NodeBudgetExceeded { limit: 3 }));
/// ```
#[derive(Debug)]
pub struct Budget<V> {
    inner: V,
    limits: TraversalLimits,
    depth: usize,
    entered: usize,
    /// Set when this wrapper or the inner pass stops the traversal.
    pub error: Option<TraversalError>,
}

impl<V: Visitor> Budget<V> {
    pub fn new(inner: V, limits: TraversalLimits) -> Self {
        Self {
            inner,
            limits,
            depth: 0,
            entered: 0,
            error: None,
        }
    }

    /// Number of nodes entered by the current or last traversal.
    pub fn entered(&self) -> usize {
        self.entered
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn into_inner(self) -> V {
        self.inner
    }

    fn fail(&mut self, error: TraversalError) -> bool {
        warn!("{error}");
        self.abort(error);
        false
    }

    // An abort ends the traversal, so no ancestor will reach its leave hook.
    fn abort(&mut self, error: TraversalError) {
        self.depth = 0;
        self.error = Some(error);
    }

    fn finish<N>(&mut self, kind: &'static str, result: (Option<N>, bool)) -> (Option<N>, bool) {
        if result.1 {
            self.depth = self.depth.saturating_sub(1);
        } else {
            self.abort(TraversalError::Aborted { kind });
        }
        result
    }
}

impl<V: Visitor> Visitor for Budget<V> {
    fn enter(&mut self, node: NodeRef<'_>) -> bool {
        if self.depth == 0 {
            self.entered = 0;
            self.error = None;
        }
        if self.depth >= self.limits.max_depth {
            return self.fail(TraversalError::DepthExceeded {
                limit: self.limits.max_depth,
            });
        }
        if self.entered >= self.limits.max_nodes {
            return self.fail(TraversalError::NodeBudgetExceeded {
                limit: self.limits.max_nodes,
            });
        }
        self.depth += 1;
        self.entered += 1;
        if !self.inner.enter(node) {
            self.abort(TraversalError::Aborted { kind: node.kind() });
            return false;
        }
        true
    }

    fn leave_statement(&mut self, stmt: &Statement) -> (Option<Statement>, bool) {
        let result = self.inner.leave_statement(stmt);
        self.finish(stmt.as_node().kind(), result)
    }

    fn leave_dml(&mut self, stmt: &DmlStmt) -> (Option<DmlStmt>, bool) {
        let result = self.inner.leave_dml(stmt);
        self.finish(stmt.as_node().kind(), result)
    }

    fn leave_assignment(
        &mut self,
        assignment: &VariableAssignment,
    ) -> (Option<VariableAssignment>, bool) {
        let result = self.inner.leave_assignment(assignment);
        self.finish("VariableAssignment", result)
    }

    fn leave_expr(&mut self, expr: &Expr) -> (Option<Expr>, bool) {
        let result = self.inner.leave_expr(expr);
        self.finish("Expr", result)
    }

    fn leave_table_ref(&mut self, table: &TableRef) -> (Option<TableRef>, bool) {
        let result = self.inner.leave_table_ref(table);
        self.finish("TableRef", result)
    }

    fn leave_column_ref(&mut self, column: &ColumnRefExpr) -> (Option<ColumnRefExpr>, bool) {
        let result = self.inner.leave_column_ref(column);
        self.finish("ColumnRefExpr", result)
    }

    fn leave_pattern(&mut self, pattern: &PatternLikeExpr) -> (Option<PatternLikeExpr>, bool) {
        let result = self.inner.leave_pattern(pattern);
        self.finish("PatternLikeExpr", result)
    }
}
