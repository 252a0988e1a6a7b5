//! Renders statements back to SQL text for diagnostics.
//!
//! Prepared statements addressed only by their binary-protocol id render as
//! `#id`, which is not valid SQL but keeps the identity visible in logs.

use std::fmt;

use crate::ast::*;

pub fn print(stmt: &Statement) -> String {
    match stmt {
        Statement::Explain(e) => format!("EXPLAIN {}", print_dml(&e.stmt)),
        Statement::Prepare(p) => format!(
            "PREPARE {} FROM {}",
            print_ident(&p.name, p.id),
            quote(&print(&p.body))
        ),
        Statement::Deallocate(d) => format!("DEALLOCATE PREPARE {}", print_ident(&d.name, d.id)),
        Statement::Execute(e) => {
            let mut s = format!("EXECUTE {}", print_ident(&e.name, e.id));
            if !e.using_params.is_empty() {
                s.push_str(&format!(" USING {}", print_list(&e.using_params)));
            }
            s
        }
        Statement::Show(s) => print_show(s),
        Statement::Begin(_) => "BEGIN".to_string(),
        Statement::Commit(_) => "COMMIT".to_string(),
        Statement::Rollback(_) => "ROLLBACK".to_string(),
        Statement::Use(u) => format!("USE {}", u.db_name),
        Statement::Set(s) => format!(
            "SET {}",
            s.variables.iter().map(print_assignment).collect::<Vec<_>>().join(", ")
        ),
        Statement::Dml(d) => print_dml(d),
    }
}

fn print_ident(name: &str, id: u32) -> String {
    if name.is_empty() {
        format!("#{id}")
    } else {
        name.to_string()
    }
}

fn print_variable(name: &str, is_global: bool, is_system: bool) -> String {
    match (is_system, is_global) {
        (true, true) => format!("@@GLOBAL.{name}"),
        (true, false) => format!("@@SESSION.{name}"),
        (false, _) => format!("@{name}"),
    }
}

fn print_assignment(a: &VariableAssignment) -> String {
    format!("{} = {}", print_variable(&a.name, a.is_global, a.is_system), print_expr(&a.value))
}

fn print_show(s: &ShowStmt) -> String {
    let full = if s.full { "FULL " } else { "" };
    let scope = if s.global_scope { "GLOBAL " } else { "SESSION " };
    let table = s.table.as_ref().map(print_table).unwrap_or_default();
    let from_db = if s.db_name.is_empty() {
        String::new()
    } else {
        format!(" FROM {}", s.db_name)
    };
    let mut out = match s.target {
        ShowTarget::None => "SHOW".to_string(),
        ShowTarget::Engines => "SHOW ENGINES".to_string(),
        ShowTarget::Databases => "SHOW DATABASES".to_string(),
        ShowTarget::Tables => format!("SHOW {full}TABLES{from_db}"),
        ShowTarget::TableStatus => format!("SHOW TABLE STATUS{from_db}"),
        ShowTarget::Columns => match &s.column {
            Some(c) => format!("DESCRIBE {table} {}", print_column(c)),
            None => format!("SHOW {full}COLUMNS FROM {table}{from_db}"),
        },
        ShowTarget::Warnings => "SHOW WARNINGS".to_string(),
        ShowTarget::Charset => "SHOW CHARACTER SET".to_string(),
        ShowTarget::Variables => format!("SHOW {scope}VARIABLES"),
        ShowTarget::Status => format!("SHOW {scope}STATUS"),
        ShowTarget::Collation => "SHOW COLLATION".to_string(),
        ShowTarget::CreateTable => format!("SHOW CREATE TABLE {table}"),
        ShowTarget::Grants => "SHOW GRANTS".to_string(),
        ShowTarget::Triggers => format!("SHOW TRIGGERS{from_db}"),
        ShowTarget::ProcedureStatus => "SHOW PROCEDURE STATUS".to_string(),
        ShowTarget::Index => format!("SHOW INDEX FROM {table}"),
    };
    if let Some(p) = &s.pattern {
        out.push(' ');
        out.push_str(&print_pattern(p));
    }
    if let Some(w) = &s.where_clause {
        out.push_str(&format!(" WHERE {}", print_expr(w)));
    }
    out
}

fn print_dml(d: &DmlStmt) -> String {
    match d {
        DmlStmt::Select(s) => {
            let fields = if s.fields.is_empty() {
                "*".to_string()
            } else {
                print_list(&s.fields)
            };
            let mut out = format!("SELECT {fields}");
            if let Some(t) = &s.from {
                out.push_str(&format!(" FROM {}", print_table(t)));
            }
            if let Some(w) = &s.where_clause {
                out.push_str(&format!(" WHERE {}", print_expr(w)));
            }
            out
        }
        DmlStmt::Insert(i) => {
            let mut out = format!("INSERT INTO {}", print_table(&i.table));
            if !i.columns.is_empty() {
                let cols = i.columns.iter().map(print_column).collect::<Vec<_>>().join(", ");
                out.push_str(&format!(" ({cols})"));
            }
            out.push_str(&format!(" VALUES ({})", print_list(&i.values)));
            out
        }
        DmlStmt::Delete(d) => {
            let mut out = format!("DELETE FROM {}", print_table(&d.table));
            if let Some(w) = &d.where_clause {
                out.push_str(&format!(" WHERE {}", print_expr(w)));
            }
            out
        }
    }
}

fn print_table(t: &TableRef) -> String {
    if t.schema.is_empty() {
        t.name.clone()
    } else {
        format!("{}.{}", t.schema, t.name)
    }
}

fn print_column(c: &ColumnRefExpr) -> String {
    if c.table.is_empty() {
        c.name.clone()
    } else {
        format!("{}.{}", c.table, c.name)
    }
}

fn print_list(exprs: &[Expr]) -> String {
    exprs.iter().map(print_expr).collect::<Vec<_>>().join(", ")
}

fn print_pattern(p: &PatternLikeExpr) -> String {
    let mut out = String::new();
    if let Some(e) = &p.expr {
        out.push_str(&print_operand(e));
        out.push(' ');
    }
    if p.not {
        out.push_str("NOT ");
    }
    out.push_str(&format!("LIKE {}", print_operand(&p.pattern)));
    if p.escape != '\\' {
        out.push_str(&format!(" ESCAPE {}", quote(&p.escape.to_string())));
    }
    out
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn print_literal(l: &Literal) -> String {
    match l {
        Literal::Null => "NULL".to_string(),
        Literal::Bool(true) => "TRUE".to_string(),
        Literal::Bool(false) => "FALSE".to_string(),
        Literal::Int(n) => n.to_string(),
        Literal::String(s) => quote(s),
    }
}

fn print_operand(e: &Expr) -> String {
    match e {
        Expr::Binary(_) | Expr::PatternLike(_) => format!("({})", print_expr(e)),
        _ => print_expr(e),
    }
}

pub fn print_expr(e: &Expr) -> String {
    match e {
        Expr::Literal(l) => print_literal(l),
        Expr::Column(c) => print_column(c),
        Expr::Variable(v) => print_variable(&v.name, v.is_global, v.is_system),
        Expr::ParamMarker(_) => "?".to_string(),
        Expr::PatternLike(p) => print_pattern(p),
        Expr::Binary(b) => format!(
            "{} {} {}",
            print_operand(&b.left),
            b.op.symbol(),
            print_operand(&b.right)
        ),
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print(self))
    }
}

impl fmt::Display for DmlStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_dml(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_expr(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_set_with_user_and_system_variables() {
        let stmt = Statement::Set(SetStmt {
            variables: vec![
                VariableAssignment::user("x", Expr::int(1)),
                VariableAssignment::system("autocommit", Expr::int(0), true),
                VariableAssignment::system("sql_mode", Expr::string("it's"), false),
            ],
        });
        assert_eq!(
            print(&stmt),
            "SET @x = 1, @@GLOBAL.autocommit = 0, @@SESSION.sql_mode = 'it''s'"
        );
    }

    #[test]
    fn prints_prepared_statement_lifecycle() {
        let body = Statement::Dml(DmlStmt::Select(SelectStmt {
            fields: vec![Expr::column("a")],
            from: Some(TableRef::new("t")),
            where_clause: Some(Expr::binary(
                BinaryOp::Eq,
                Expr::column("b"),
                Expr::ParamMarker(ParamMarkerExpr { offset: 26 }),
            )),
        }));
        let prepare = Statement::Prepare(PrepareStmt {
            in_prepare: true,
            name: "s1".into(),
            id: 0,
            body: Box::new(body),
        });
        assert_eq!(print(&prepare), "PREPARE s1 FROM 'SELECT a FROM t WHERE b = ?'");

        let execute = Statement::Execute(ExecuteStmt {
            name: "s1".into(),
            id: 0,
            using_params: vec![Expr::user_var("a"), Expr::user_var("b")],
        });
        assert_eq!(print(&execute), "EXECUTE s1 USING @a, @b");

        let deallocate = Statement::Deallocate(DeallocateStmt { name: String::new(), id: 7 });
        assert_eq!(print(&deallocate), "DEALLOCATE PREPARE #7");
    }

    #[test]
    fn prints_show_variants() {
        let tables = ShowStmt {
            target: ShowTarget::Tables,
            db_name: "db".into(),
            full: true,
            pattern: Some(PatternLikeExpr::show("t%")),
            ..ShowStmt::default()
        };
        assert_eq!(print(&Statement::Show(tables)), "SHOW FULL TABLES FROM db LIKE 't%'");

        let vars = ShowStmt {
            target: ShowTarget::Variables,
            global_scope: true,
            where_clause: Some(Expr::binary(
                BinaryOp::Eq,
                Expr::column("Variable_name"),
                Expr::string("autocommit"),
            )),
            ..ShowStmt::default()
        };
        assert_eq!(
            print(&Statement::Show(vars)),
            "SHOW GLOBAL VARIABLES WHERE Variable_name = 'autocommit'"
        );

        let describe = ShowStmt {
            target: ShowTarget::Columns,
            table: Some(TableRef::qualified("db", "t")),
            column: Some(ColumnRefExpr::new("c")),
            ..ShowStmt::default()
        };
        assert_eq!(print(&Statement::Show(describe)), "DESCRIBE db.t c");
    }

    #[test]
    fn nested_binary_operands_are_parenthesized() {
        let e = Expr::binary(
            BinaryOp::And,
            Expr::binary(BinaryOp::Gt, Expr::column("a"), Expr::int(1)),
            Expr::Literal(Literal::Bool(true)),
        );
        assert_eq!(e.to_string(), "(a > 1) AND TRUE");
    }

    #[test]
    fn prints_dml_forms() {
        let insert = DmlStmt::Insert(InsertStmt {
            table: TableRef::new("t"),
            columns: vec![ColumnRefExpr::new("a"), ColumnRefExpr::new("b")],
            values: vec![Expr::int(1), Expr::Literal(Literal::Null)],
        });
        assert_eq!(insert.to_string(), "INSERT INTO t (a, b) VALUES (1, NULL)");

        let explain = Statement::Explain(ExplainStmt {
            stmt: DmlStmt::Delete(DeleteStmt { table: TableRef::new("t"), where_clause: None }),
        });
        assert_eq!(explain.to_string(), "EXPLAIN DELETE FROM t");

        let select = DmlStmt::Select(SelectStmt::default());
        assert_eq!(select.to_string(), "SELECT *");
    }
}
