//! Expression nodes.
//!
//! Only the shapes the statement layer refers to directly are modelled here:
//! literals, column and variable references, parameter markers, LIKE patterns
//! and binary operators.

use serde::{Deserialize, Serialize};

use crate::visitor::{accept_opt, Node, NodeRef, Visitor};

/// A scalar expression.
///
/// # Examples
/// ```
/// use sql_ast::{BinaryOp, Expr};
///
/// let sum = Expr::binary(BinaryOp::Plus, Expr::int(1), Expr::int(2));
/// assert_eq!(sum.to_string(), "1 + 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRefExpr),
    Variable(VariableExpr),
    ParamMarker(ParamMarkerExpr),
    PatternLike(Box<PatternLikeExpr>),
    Binary(BinaryExpr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
}

/// A possibly table-qualified column name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnRefExpr {
    /// Empty when unqualified.
    pub table: String,
    pub name: String,
}

impl ColumnRefExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: String::new(),
            name: name.into(),
        }
    }
}

/// Reads a user (`@name`) or system (`@@name`) variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableExpr {
    pub name: String,
    pub is_global: bool,
    pub is_system: bool,
}

/// A `?` placeholder in prepared text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamMarkerExpr {
    /// Byte offset of the `?` in the prepared text.
    pub offset: usize,
}

/// `[expr] [NOT] LIKE pattern [ESCAPE c]`.
///
/// `expr` is absent when the pattern filters rows of a SHOW statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternLikeExpr {
    pub expr: Option<Box<Expr>>,
    pub pattern: Box<Expr>,
    pub not: bool,
    pub escape: char,
}

impl PatternLikeExpr {
    /// Bare `LIKE 'pattern'` as used by SHOW.
    pub fn show(pattern: impl Into<String>) -> Self {
        Self {
            expr: None,
            pattern: Box::new(Expr::string(pattern)),
            not: false,
            escape: '\\',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "OR",
            BinaryOp::And => "AND",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(ColumnRefExpr::new(name))
    }

    pub fn user_var(name: impl Into<String>) -> Self {
        Expr::Variable(VariableExpr {
            name: name.into(),
            is_global: false,
            is_system: false,
        })
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

// =============================================================================
// TRAVERSAL
// =============================================================================

impl PatternLikeExpr {
    fn walk<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (expr, ok) = accept_opt(self.expr, visitor);
        self.expr = expr;
        if !ok {
            return (self, false);
        }
        let (pattern, ok) = self.pattern.accept(visitor);
        self.pattern = pattern;
        (self, ok)
    }
}

impl BinaryExpr {
    fn walk<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> (Self, bool) {
        let (left, ok) = self.left.accept(visitor);
        self.left = left;
        if !ok {
            return (self, false);
        }
        let (right, ok) = self.right.accept(visitor);
        self.right = right;
        (self, ok)
    }
}

impl Node for Expr {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Expr(self)
    }

    fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> (Self, bool) {
        match self {
            Expr::PatternLike(p) => {
                let (p, ok) = (*p).walk(visitor);
                (Expr::PatternLike(Box::new(p)), ok)
            }
            Expr::Binary(b) => {
                let (b, ok) = b.walk(visitor);
                (Expr::Binary(b), ok)
            }
            Expr::Literal(_) | Expr::Column(_) | Expr::Variable(_) | Expr::ParamMarker(_) => {
                (self, true)
            }
        }
    }

    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool) {
        visitor.leave_expr(self)
    }
}

impl Node for ColumnRefExpr {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::ColumnRef(self)
    }

    fn accept_children<V: Visitor + ?Sized>(self, _visitor: &mut V) -> (Self, bool) {
        (self, true)
    }

    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool) {
        visitor.leave_column_ref(self)
    }
}

impl Node for PatternLikeExpr {
    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Pattern(self)
    }

    fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> (Self, bool) {
        self.walk(visitor)
    }

    fn accept_leave<V: Visitor + ?Sized>(&self, visitor: &mut V) -> (Option<Self>, bool) {
        visitor.leave_pattern(self)
    }
}
