//! DML statements and table references.

use serde::{Deserialize, Serialize};

use crate::ast::{ColumnRefExpr, Expr};
use crate::visitor::{accept_opt, accept_seq, Node, NodeRef, Visitor};

/// A statement that reads or writes rows, and can therefore be EXPLAINed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DmlStmt {
    Select(SelectStmt),
    Insert(InsertStmt),
    Delete(DeleteStmt),
}

/// `SELECT fields [FROM table] [WHERE expr]`.
///
/// An empty field list selects `*`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectStmt {
    pub fields: Vec<Expr>,
    pub from: Option<TableRef>,
    pub where_clause: Option<Expr>,
}

/// `INSERT INTO table [(columns)] VALUES (values)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertStmt {
    pub table: TableRef,
    pub columns: Vec<ColumnRefExpr>,
    pub values: Vec<Expr>,
}

/// `DELETE FROM table [WHERE expr]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteStmt {
    pub table: TableRef,
    pub where_clause: Option<Expr>,
}

/// A possibly schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableRef {
    /// Empty when unqualified.
    pub schema: String,
    pub name: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: String::new(),
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// TRAVERSAL
// =============================================================================

impl SelectStmt {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (fields, ok) = accept_seq(self.fields, visitor);
        self.fields = fields;
        if !ok {
            return (self, false);
        }
        let (from, ok) = accept_opt(self.from, visitor);
        self.from = from;
        if !ok {
            return (self, false);
        }
        let (where_clause, ok) = accept_opt(self.where_clause, visitor);
        self.where_clause = where_clause;
        (self, ok)
    }
}

impl InsertStmt {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (table, ok) = self.table.accept(visitor);
        self.table = table;
        if !ok {
            return (self, false);
        }
        let (columns, ok) = accept_seq(self.columns, visitor);
        self.columns = columns;
        if !ok {
            return (self, false);
        }
        let (values, ok) = accept_seq(self.values, visitor);
        self.values = values;
        (self, ok)
    }
}

impl DeleteStmt {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (table, ok) = self.table.accept(visitor);
        self.table = table;
        if !ok {
            return (self, false);
        }
        let (where_clause, ok) = accept_opt(self.where_clause, visitor);
        self.where_clause = where_clause;
        (self, ok)
    }
}

impl Node for DmlStmt {
    fn as_node(&self) -> NodeRef<'_> {
        match self {
            DmlStmt::Select(s) => NodeRef::Select(s),
            DmlStmt::Insert(s) => NodeRef::Insert(s),
            DmlStmt::Delete(s) => NodeRef::Delete(s),
        }
    }

    fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> (Self, bool) {
        match self {
            DmlStmt::Select(s) => {
                let (s, ok) = s.accept_children(visitor);
                (DmlStmt::Select(s), ok)
            }
            DmlStmt::Insert(s) => {
                let (s, ok) = s.accept_children(visitor);
                (DmlStmt::Insert(s), ok)
            }
            DmlStmt::Delete(s) => {
                let (s, ok) = s.accept_children(visitor);
                (DmlStmt::Delete(s), ok)
            }
        }
    }

    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool) {
        visitor.leave_dml(self)
    }
}

impl Node for TableRef {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::TableRef(self)
    }

    fn accept_children<V: Visitor + ?Sized>(self, _visitor: &mut V) -> (Self, bool) {
        (self, true)
    }

    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool) {
        visitor.leave_table_ref(self)
    }
}
