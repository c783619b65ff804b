//! The seven literal scenarios enumerated in spec.md §8, each built by hand
//! as a small `Program` tree (there is no parser in this core's scope) and
//! checked against `analyze`'s returned diagnostics/typed-node map.

use mlc_ast::expr::{Expr, ExprKind, Param};
use mlc_ast::pattern::{LiteralPattern, Pattern, PatternKind};
use mlc_ast::stmt::{
    ConstantDeclaration, FunctionStatement, InstanceDeclaration, Program, Stmt, StmtKind, TypeDeclaration, TypeDeclarationKind, VariantDecl,
};
use mlc_ast::type_expr::{TypeExpr, TypeExprKind};
use mlc_ast::{MatchArm, NodeId};
use mlc_common::diag::codes;
use mlc_common::{AnalysisOptions, Span};
use mlc_sema::NullModuleLoader;

fn sp() -> Span {
    Span::new(0, 0)
}

fn expr(id: u32, kind: ExprKind) -> Expr {
    Expr { id: NodeId(id), span: sp(), kind }
}

fn pat(id: u32, kind: PatternKind) -> Pattern {
    Pattern { id: NodeId(id), span: sp(), kind }
}

fn stmt(id: u32, kind: StmtKind) -> Stmt {
    Stmt { id: NodeId(id), span: sp(), kind }
}

fn ty_name(id: u32, name: &str) -> TypeExpr {
    TypeExpr { id: NodeId(id), span: sp(), kind: TypeExprKind::Name(name.to_string()) }
}

fn run(program: Program) -> mlc_sema::AnalysisResult {
    let mut loader = NullModuleLoader;
    mlc_sema::analyze(&program, &mut loader, AnalysisOptions::default())
}

/// 1. `match 1 { 1 -> 0 }` -> A007: Missing cases: other Int values.
#[test]
fn scenario_1_int_match_not_exhaustive() {
    let arm = MatchArm {
        pattern: pat(1, PatternKind::Literal(LiteralPattern::Int(1))),
        guard: None,
        body: expr(2, ExprKind::IntLiteral(0)),
    };
    let m = expr(
        3,
        ExprKind::Match {
            scrutinee: Box::new(expr(0, ExprKind::IntLiteral(1))),
            arms: vec![arm],
        },
    );
    let program = Program { stmts: vec![stmt(4, StmtKind::Expression(m))] };
    let result = run(program);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, codes::NON_EXHAUSTIVE);
    assert_eq!(result.diagnostics[0].message, "Missing cases: other Int values");
}

/// 2. `type Option<T> = Some T | None; x: Option<Int> = Some(10); match x { Some(y) -> y }`
/// -> A007: Missing cases: [None].
#[test]
fn scenario_2_adt_match_missing_variant() {
    let type_decl = stmt(
        0,
        StmtKind::TypeDecl(TypeDeclaration {
            name: "Option".to_string(),
            type_params: vec!["T".to_string()],
            kind: TypeDeclarationKind::Adt(vec![
                VariantDecl { name: "Some".to_string(), fields: vec![ty_name(1, "T")] },
                VariantDecl { name: "None".to_string(), fields: vec![] },
            ]),
        }),
    );
    let x_decl = stmt(
        2,
        StmtKind::Constant(ConstantDeclaration {
            name: "x".to_string(),
            ty: Some(TypeExpr { id: NodeId(3), span: sp(), kind: TypeExprKind::App("Option".to_string(), vec![ty_name(4, "Int")]) }),
            value: expr(
                5,
                ExprKind::Call {
                    callee: Box::new(expr(6, ExprKind::Identifier("Some".to_string()))),
                    args: vec![expr(7, ExprKind::IntLiteral(10))],
                },
            ),
        }),
    );
    let arm = MatchArm {
        pattern: pat(8, PatternKind::Constructor { name: "Some".to_string(), args: vec![pat(9, PatternKind::Identifier("y".to_string()))] }),
        guard: None,
        body: expr(10, ExprKind::Identifier("y".to_string())),
    };
    let m = expr(
        11,
        ExprKind::Match { scrutinee: Box::new(expr(12, ExprKind::Identifier("x".to_string()))), arms: vec![arm] },
    );
    let program = Program { stmts: vec![type_decl, x_decl, stmt(13, StmtKind::Expression(m))] };
    let result = run(program);
    let non_exhaustive: Vec<_> = result.diagnostics.iter().filter(|d| d.code == codes::NON_EXHAUSTIVE).collect();
    assert_eq!(non_exhaustive.len(), 1);
    assert_eq!(non_exhaustive[0].message, "Missing cases: [None]");
}

/// 3. `match b { true -> 1 }` with `b = true` -> A007: Missing cases: false.
#[test]
fn scenario_3_bool_match_missing_false() {
    let b_decl = stmt(
        0,
        StmtKind::Constant(ConstantDeclaration { name: "b".to_string(), ty: None, value: expr(1, ExprKind::BoolLiteral(true)) }),
    );
    let arm = MatchArm {
        pattern: pat(2, PatternKind::Literal(LiteralPattern::Bool(true))),
        guard: None,
        body: expr(3, ExprKind::IntLiteral(1)),
    };
    let m = expr(4, ExprKind::Match { scrutinee: Box::new(expr(5, ExprKind::Identifier("b".to_string()))), arms: vec![arm] });
    let program = Program { stmts: vec![b_decl, stmt(6, StmtKind::Expression(m))] };
    let result = run(program);
    let non_exhaustive: Vec<_> = result.diagnostics.iter().filter(|d| d.code == codes::NON_EXHAUSTIVE).collect();
    assert_eq!(non_exhaustive.len(), 1);
    assert_eq!(non_exhaustive[0].message, "Missing cases: false");
}

/// 4. `fun getX(r) { match r { { x: x } -> x } }` -> no errors;
/// `getX` inferred as `{ x: a, ... } -> a` (open row).
#[test]
fn scenario_4_record_match_infers_open_row() {
    let arm = MatchArm {
        pattern: pat(0, PatternKind::Record { fields: vec![("x".to_string(), pat(1, PatternKind::Identifier("x".to_string())))], is_open: false }),
        guard: None,
        body: expr(2, ExprKind::Identifier("x".to_string())),
    };
    let body = expr(
        3,
        ExprKind::Match { scrutinee: Box::new(expr(4, ExprKind::Identifier("r".to_string()))), arms: vec![arm] },
    );
    let f = FunctionStatement {
        name: "getX".to_string(),
        type_params: vec![],
        params: vec![Param { name: "r".to_string(), ty: None, default: None, variadic: false }],
        return_ty: None,
        body,
    };
    let program = Program { stmts: vec![stmt(5, StmtKind::Function(f))] };
    let result = run(program);
    assert!(result.diagnostics.is_empty(), "unexpected diagnostics: {:?}", result.diagnostics);

    let sym = result.symbol_table.find("getX").expect("getX should be defined");
    let mlc_symbols::SymbolKind::Value(scheme) = sym.kind else {
        panic!("getX should be a value");
    };
    let mlc_types::TyKind::Func { params, ret, .. } = scheme.ty.kind() else {
        panic!("getX should infer to a function type, got {}", scheme.ty);
    };
    assert_eq!(params.len(), 1);
    let (fields, is_open) = params[0].as_record().expect("parameter should be a record type");
    assert!(is_open, "the row should stay open");
    let x_field = fields.get("x").expect("record should carry field `x`");
    assert_eq!(x_field, ret, "return type should be the same type variable as the `x` field");
}

/// 5. `if true { 42 } else { Nil }` -> inferred type `Int | Nil` (normalized union).
#[test]
fn scenario_5_if_branches_unify_to_union() {
    let e = expr(
        0,
        ExprKind::If {
            condition: Box::new(expr(1, ExprKind::BoolLiteral(true))),
            consequence: Box::new(expr(2, ExprKind::IntLiteral(42))),
            alternative: Some(Box::new(expr(3, ExprKind::NilLiteral))),
        },
    );
    let id = e.id;
    let program = Program { stmts: vec![stmt(4, StmtKind::Expression(e))] };
    let result = run(program);
    assert!(result.diagnostics.is_empty(), "unexpected diagnostics: {:?}", result.diagnostics);
    let ty = result.typed_nodes.get(&id).expect("if-expression should be typed");
    assert_eq!(ty.to_string(), "Int | Nil");
}

/// 6. `[1, 2] ++ [3]` -> `List<Int>`; `[1] ++ "x"` -> A003: right operand of ++ must be List<Int>.
#[test]
fn scenario_6_list_concat() {
    let ok = expr(
        0,
        ExprKind::Infix {
            op: "++".to_string(),
            left: Box::new(expr(1, ExprKind::ListLiteral(vec![expr(2, ExprKind::IntLiteral(1)), expr(3, ExprKind::IntLiteral(2))]))),
            right: Box::new(expr(4, ExprKind::ListLiteral(vec![expr(5, ExprKind::IntLiteral(3))]))),
        },
    );
    let ok_id = ok.id;
    let program = Program { stmts: vec![stmt(6, StmtKind::Expression(ok))] };
    let result = run(program);
    assert!(result.diagnostics.is_empty(), "unexpected diagnostics: {:?}", result.diagnostics);
    let ty = result.typed_nodes.get(&ok_id).expect("`++` expression should be typed");
    assert_eq!(ty.to_string(), "List<Int>");

    let bad = expr(
        0,
        ExprKind::Infix {
            op: "++".to_string(),
            left: Box::new(expr(1, ExprKind::ListLiteral(vec![expr(2, ExprKind::IntLiteral(1))]))),
            right: Box::new(expr(3, ExprKind::StringLiteral("x".to_string()))),
        },
    );
    let program = Program { stmts: vec![stmt(4, StmtKind::Expression(bad))] };
    let result = run(program);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, codes::TYPE_ERROR);
    assert_eq!(result.diagnostics[0].message, "right operand of ++ must be List<Int>");
}

/// 7. Declaring `instance Functor Int` where `Int: *` -> A003: type Int has
/// kind *, but trait Functor requires kind * -> *.
#[test]
fn scenario_7_instance_kind_mismatch() {
    let trait_decl = stmt(
        0,
        StmtKind::TraitDecl(mlc_ast::stmt::TraitDeclaration {
            name: "Functor".to_string(),
            type_params: vec!["F".to_string()],
            super_traits: vec![],
            methods: vec![mlc_ast::stmt::TraitMethodSig {
                name: "map".to_string(),
                ty: TypeExpr {
                    id: NodeId(1),
                    span: sp(),
                    kind: TypeExprKind::Func {
                        params: vec![TypeExpr {
                            id: NodeId(2),
                            span: sp(),
                            kind: TypeExprKind::Func { params: vec![ty_name(3, "A")], ret: Box::new(ty_name(4, "B")), variadic: false, default_count: 0 },
                        }],
                        ret: Box::new(TypeExpr { id: NodeId(5), span: sp(), kind: TypeExprKind::App("F".to_string(), vec![ty_name(6, "B")]) }),
                        variadic: false,
                        default_count: 0,
                    },
                },
            }],
            operators: vec![],
            default_methods: vec![],
        }),
    );
    let instance_decl = stmt(
        7,
        StmtKind::InstanceDecl(InstanceDeclaration {
            trait_name: "Functor".to_string(),
            type_params: vec![],
            target: ty_name(8, "Int"),
            methods: vec![],
        }),
    );
    let program = Program { stmts: vec![trait_decl, instance_decl] };
    let result = run(program);
    let mismatch: Vec<_> = result.diagnostics.iter().filter(|d| d.code == codes::TYPE_ERROR).collect();
    assert_eq!(mismatch.len(), 1, "expected exactly one kind-mismatch diagnostic, got {:?}", result.diagnostics);
    assert!(mismatch[0].message.contains("kind"), "message should mention kind mismatch: {}", mismatch[0].message);
}
