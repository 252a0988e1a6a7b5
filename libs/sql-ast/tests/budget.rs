use config::constants::TraversalLimits;
use sql_ast::{
    traverse, Budget, BeginStmt, Expr, ExecuteStmt, NodeRef, PrepareStmt, Statement,
    TraversalError, Visitor,
};

#[derive(Default)]
struct Count(usize);

impl Visitor for Count {
    fn enter(&mut self, _node: NodeRef<'_>) -> bool {
        self.0 += 1;
        true
    }
}

fn nested_prepare(levels: usize) -> Statement {
    let mut stmt = Statement::Begin(BeginStmt);
    for id in 0..levels {
        stmt = Statement::Prepare(PrepareStmt {
            in_prepare: true,
            name: format!("p{id}"),
            id: id as u32,
            body: Box::new(stmt),
        });
    }
    stmt
}

#[test]
fn default_limits_let_ordinary_passes_finish() {
    let mut pass = Budget::new(Count::default(), TraversalLimits::default());
    let (_, ok) = traverse(nested_prepare(3), &mut pass);
    assert!(ok);
    assert_eq!(pass.error, None);
    assert_eq!(pass.entered(), 4);
    assert_eq!(pass.into_inner().0, 4);
}

#[test]
fn depth_limit_stops_nested_bodies() {
    let limits = TraversalLimits::new(3, 100).unwrap();
    let mut pass = Budget::new(Count::default(), limits);
    let stmt = nested_prepare(5);
    let (returned, ok) = traverse(stmt.clone(), &mut pass);
    assert!(!ok);
    assert_eq!(returned, stmt);
    assert_eq!(pass.error, Some(TraversalError::DepthExceeded { limit: 3 }));
    assert_eq!(pass.inner().0, 3);
}

#[test]
fn depth_is_released_between_siblings() {
    let stmt = Statement::Execute(ExecuteStmt {
        name: "s".into(),
        id: 0,
        using_params: (0..50).map(Expr::int).collect(),
    });
    let mut pass = Budget::new(Count::default(), TraversalLimits::new(2, 1000).unwrap());
    let (_, ok) = traverse(stmt, &mut pass);
    assert!(ok);
    assert_eq!(pass.entered(), 51);
}

#[test]
fn node_budget_stops_wide_statements() {
    let stmt = Statement::Execute(ExecuteStmt {
        name: "s".into(),
        id: 0,
        using_params: (0..10).map(Expr::int).collect(),
    });
    let mut pass = Budget::new(Count::default(), TraversalLimits::new(10, 5).unwrap());
    let (_, ok) = traverse(stmt, &mut pass);
    assert!(!ok);
    assert_eq!(pass.error, Some(TraversalError::NodeBudgetExceeded { limit: 5 }));
    assert_eq!(pass.inner().0, 5);
}

#[test]
fn inner_abort_is_attributed_to_its_node() {
    struct NoBegin;
    impl Visitor for NoBegin {
        fn enter(&mut self, node: NodeRef<'_>) -> bool {
            !matches!(node, NodeRef::Begin(_))
        }
    }

    let mut inner = NoBegin;
    let mut pass = Budget::new(&mut inner, TraversalLimits::default());
    let (_, ok) = traverse(nested_prepare(2), &mut pass);
    assert!(!ok);
    assert_eq!(pass.error, Some(TraversalError::Aborted { kind: "BeginStmt" }));
}

#[test]
fn inner_leave_abort_is_attributed_to_its_node() {
    struct StopOnExpr;
    impl Visitor for StopOnExpr {
        fn leave_expr(&mut self, _expr: &Expr) -> (Option<Expr>, bool) {
            (None, false)
        }
    }

    let stmt = Statement::Execute(ExecuteStmt {
        name: "s".into(),
        id: 0,
        using_params: vec![Expr::int(1)],
    });
    let mut pass = Budget::new(StopOnExpr, TraversalLimits::default());
    let (_, ok) = traverse(stmt, &mut pass);
    assert!(!ok);
    assert_eq!(pass.error, Some(TraversalError::Aborted { kind: "Expr" }));
}

#[test]
fn budget_is_reusable_after_an_abort() {
    struct StopAtTwo;
    impl Visitor for StopAtTwo {
        fn enter(&mut self, node: NodeRef<'_>) -> bool {
            node != NodeRef::Expr(&Expr::int(2))
        }
    }

    let mut pass = Budget::new(StopAtTwo, TraversalLimits::new(2, 100).unwrap());
    let first = Statement::Execute(ExecuteStmt {
        name: "s".into(),
        id: 0,
        using_params: vec![Expr::int(1), Expr::int(2)],
    });
    let (_, ok) = traverse(first, &mut pass);
    assert!(!ok);
    assert_eq!(pass.error, Some(TraversalError::Aborted { kind: "Expr" }));

    let second = Statement::Execute(ExecuteStmt {
        name: "s".into(),
        id: 0,
        using_params: vec![Expr::int(1)],
    });
    let (_, ok) = traverse(second, &mut pass);
    assert!(ok);
    assert_eq!(pass.error, None);
    assert_eq!(pass.entered(), 2);
}

#[test]
fn node_budget_is_counted_per_traversal() {
    let mut pass = Budget::new(Count::default(), TraversalLimits::new(10, 4).unwrap());
    for _ in 0..3 {
        let (_, ok) = traverse(nested_prepare(3), &mut pass);
        assert!(ok);
        assert_eq!(pass.entered(), 4);
    }
    assert_eq!(pass.inner().0, 12);
}

#[test]
fn depth_limit_abort_does_not_leak_into_next_traversal() {
    let mut pass = Budget::new(Count::default(), TraversalLimits::new(2, 100).unwrap());
    let (_, ok) = traverse(nested_prepare(4), &mut pass);
    assert!(!ok);
    assert_eq!(pass.error, Some(TraversalError::DepthExceeded { limit: 2 }));

    let (_, ok) = traverse(nested_prepare(1), &mut pass);
    assert!(ok);
    assert_eq!(pass.error, None);
}
