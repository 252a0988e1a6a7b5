//! Statement taxonomy: prepared statements, EXPLAIN, SHOW, SET, USE and
//! transaction control.

use serde::{Deserialize, Serialize};

use crate::ast::{ColumnRefExpr, DmlStmt, Expr, PatternLikeExpr, TableRef};
use crate::visitor::{accept_opt, accept_seq, Node, NodeRef, Visitor};

/// One complete SQL command.
///
/// # Examples
/// ```
/// use sql_ast::{Statement, UseStmt};
///
/// let stmt = Statement::Use(UseStmt { db_name: "test".into() });
/// assert_eq!(stmt.to_string(), "USE test");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Explain(ExplainStmt),
    Prepare(PrepareStmt),
    Deallocate(DeallocateStmt),
    Execute(ExecuteStmt),
    Show(ShowStmt),
    Begin(BeginStmt),
    Commit(CommitStmt),
    Rollback(RollbackStmt),
    Use(UseStmt),
    Set(SetStmt),
    /// A DML statement used on its own, e.g. the body of a PREPARE.
    Dml(DmlStmt),
}

/// Describes how a DML statement would be executed.
///
/// See: <https://dev.mysql.com/doc/refman/5.7/en/explain.html>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainStmt {
    pub stmt: DmlStmt,
}

/// Prepares a statement containing `?` placeholders.
///
/// The prepared statement is addressed by `name` on the text protocol and by
/// `id` on the binary protocol; only one of the two is meaningful for a given
/// connection, and traversal treats both as opaque.
///
/// See: <https://dev.mysql.com/doc/refman/5.7/en/prepare.html>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareStmt {
    /// True while the statement is being prepared, false once in use.
    pub in_prepare: bool,
    pub name: String,
    pub id: u32,
    /// Statement parsed from the prepared text.
    pub body: Box<Statement>,
}

/// Releases a prepared statement.
///
/// See: <https://dev.mysql.com/doc/refman/5.7/en/deallocate-prepare.html>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeallocateStmt {
    pub name: String,
    pub id: u32,
}

/// Executes a prepared statement with the given parameter values.
///
/// See: <https://dev.mysql.com/doc/refman/5.7/en/execute.html>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteStmt {
    pub name: String,
    pub id: u32,
    pub using_params: Vec<Expr>,
}

/// What a SHOW statement lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShowTarget {
    #[default]
    None,
    Engines,
    Databases,
    Tables,
    TableStatus,
    Columns,
    Warnings,
    Charset,
    Variables,
    Status,
    Collation,
    CreateTable,
    Grants,
    Triggers,
    ProcedureStatus,
    Index,
}

/// Lists databases, tables, columns, variables and other server metadata.
///
/// See: <https://dev.mysql.com/doc/refman/5.7/en/show.html>
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShowStmt {
    pub target: ShowTarget,
    pub db_name: String,
    /// Table whose columns, indexes or DDL are shown.
    pub table: Option<TableRef>,
    /// Single column for `DESCRIBE table column`.
    pub column: Option<ColumnRefExpr>,
    /// Raw modifier flags from the grammar.
    pub flag: i32,
    pub full: bool,
    /// GLOBAL rather than SESSION scope for SHOW VARIABLES / STATUS.
    pub global_scope: bool,
    pub pattern: Option<PatternLikeExpr>,
    pub where_clause: Option<Expr>,
}

/// Starts a transaction.
///
/// See: <https://dev.mysql.com/doc/refman/5.7/en/commit.html>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BeginStmt;

/// Commits the current transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommitStmt;

/// Rolls back the current transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RollbackStmt;

/// Switches the session's current database.
///
/// See: <https://dev.mysql.com/doc/refman/5.7/en/use.html>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseStmt {
    pub db_name: String,
}

/// One `name = value` pair of a SET statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAssignment {
    pub name: String,
    pub value: Expr,
    pub is_global: bool,
    /// System variable (`@@name`) rather than user variable (`@name`).
    pub is_system: bool,
}

impl VariableAssignment {
    /// Assignment to a user variable, `@name = value`.
    pub fn user(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: name.into(),
            value,
            is_global: false,
            is_system: false,
        }
    }

    /// Assignment to a system variable in session or global scope.
    pub fn system(name: impl Into<String>, value: Expr, is_global: bool) -> Self {
        Self {
            name: name.into(),
            value,
            is_global,
            is_system: true,
        }
    }
}

/// Sets one or more variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStmt {
    pub variables: Vec<VariableAssignment>,
}

// =============================================================================
// TRAVERSAL
// =============================================================================

impl ExplainStmt {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (stmt, ok) = self.stmt.accept(visitor);
        self.stmt = stmt;
        (self, ok)
    }
}

impl PrepareStmt {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (body, ok) = self.body.accept(visitor);
        self.body = body;
        (self, ok)
    }
}

impl ExecuteStmt {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (params, ok) = accept_seq(self.using_params, visitor);
        self.using_params = params;
        (self, ok)
    }
}

impl ShowStmt {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (table, ok) = accept_opt(self.table, visitor);
        self.table = table;
        if !ok {
            return (self, false);
        }
        let (column, ok) = accept_opt(self.column, visitor);
        self.column = column;
        if !ok {
            return (self, false);
        }
        let (pattern, ok) = accept_opt(self.pattern, visitor);
        self.pattern = pattern;
        if !ok {
            return (self, false);
        }
        let (where_clause, ok) = accept_opt(self.where_clause, visitor);
        self.where_clause = where_clause;
        (self, ok)
    }
}

impl SetStmt {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (variables, ok) = accept_seq(self.variables, visitor);
        self.variables = variables;
        (self, ok)
    }
}

impl Node for Statement {
    fn as_node(&self) -> NodeRef<'_> {
        match self {
            Statement::Explain(s) => NodeRef::Explain(s),
            Statement::Prepare(s) => NodeRef::Prepare(s),
            Statement::Deallocate(s) => NodeRef::Deallocate(s),
            Statement::Execute(s) => NodeRef::Execute(s),
            Statement::Show(s) => NodeRef::Show(s),
            Statement::Begin(s) => NodeRef::Begin(s),
            Statement::Commit(s) => NodeRef::Commit(s),
            Statement::Rollback(s) => NodeRef::Rollback(s),
            Statement::Use(s) => NodeRef::Use(s),
            Statement::Set(s) => NodeRef::Set(s),
            Statement::Dml(s) => s.as_node(),
        }
    }

    fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> (Self, bool) {
        match self {
            Statement::Explain(s) => {
                let (s, ok) = s.accept_children(visitor);
                (Statement::Explain(s), ok)
            }
            Statement::Prepare(s) => {
                let (s, ok) = s.accept_children(visitor);
                (Statement::Prepare(s), ok)
            }
            Statement::Execute(s) => {
                let (s, ok) = s.accept_children(visitor);
                (Statement::Execute(s), ok)
            }
            Statement::Show(s) => {
                let (s, ok) = s.accept_children(visitor);
                (Statement::Show(s), ok)
            }
            Statement::Set(s) => {
                let (s, ok) = s.accept_children(visitor);
                (Statement::Set(s), ok)
            }
            Statement::Dml(s) => {
                let (s, ok) = s.accept_children(visitor);
                (Statement::Dml(s), ok)
            }
            // No children.
            Statement::Deallocate(_)
            | Statement::Begin(_)
            | Statement::Commit(_)
            | Statement::Rollback(_)
            | Statement::Use(_) => (self, true),
        }
    }

    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool) {
        visitor.leave_statement(self)
    }
}

impl Node for VariableAssignment {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Assignment(self)
    }

    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (value, ok) = self.value.accept(visitor);
        self.value = value;
        (self, ok)
    }

    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool) {
        visitor.leave_assignment(self)
    }
}
