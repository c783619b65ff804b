//! Control-flow expression inference: `if`, `for`, `match`, `block`,
//! `break`/`continue` (spec.md §4.3).

use crate::context::InferenceContext;
use crate::exhaustiveness::{check_exhaustiveness, Coverage};
use mlc_ast::expr::Expr;
use mlc_ast::pattern::{MatchArm, Pattern};
use mlc_ast::stmt::{Stmt, StmtKind};
use mlc_common::diag::codes;
use mlc_common::Span;
use mlc_symbols::SymbolTable;
use mlc_types::{unify, Scheme, Subst, Ty};

pub fn infer_if(
    condition: &Expr,
    consequence: &Expr,
    alternative: Option<&Expr>,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
) -> (Ty, Subst) {
    let (cond_ty, s0) = crate::engine::infer(condition, table, ctx);
    let mut subst = s0;
    if let Err(e) = unify(&subst.apply(&cond_ty), &Ty::bool_ty()) {
        ctx.error(codes::TYPE_ERROR, condition.span, format!("`if` condition must be Bool: {e}"));
    }

    let (then_ty, s1) = crate::engine::infer(consequence, table, ctx);
    subst = s1.compose(&subst);

    match alternative {
        Some(alt) => {
            let (else_ty, s2) = crate::engine::infer(alt, table, ctx);
            subst = s2.compose(&subst);
            let then_ty = subst.apply(&then_ty);
            let else_ty = subst.apply(&else_ty);
            match unify(&then_ty, &else_ty) {
                Ok(s3) => {
                    subst = s3.compose(&subst);
                    (subst.apply(&then_ty), subst)
                }
                Err(_) => (Ty::union(vec![then_ty, else_ty]), subst),
            }
        }
        None => {
            let then_ty = subst.apply(&then_ty);
            if then_ty.as_con_name() == Some("Nil") {
                (then_ty, subst)
            } else {
                (Ty::union(vec![then_ty, Ty::nil()]), subst)
            }
        }
    }
}

/// `for x in iter { body }` / `for cond { body }` (spec.md §4.3). Both forms
/// evaluate to `Nil` unless the body contains a `break` with a value; those
/// are collected through [`InferenceContext::push_loop`]/`record_break`/
/// `pop_loop` rather than threaded as an extra return value through every
/// recursive `infer` call.
pub fn infer_for(
    binding: Option<&Pattern>,
    iterable_or_condition: &Expr,
    body: &Expr,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
) -> (Ty, Subst) {
    let loop_scope = table.new_enclosed();
    let (source_ty, s0) = crate::engine::infer(iterable_or_condition, table, ctx);
    let mut subst = s0;

    match binding {
        Some(pattern) => {
            let elem = ctx.fresh();
            let list_ty = Ty::list(elem.clone());
            match unify(&subst.apply(&source_ty), &list_ty) {
                Ok(s) => subst = s.compose(&subst),
                Err(e) => ctx.error(codes::TYPE_ERROR, iterable_or_condition.span, format!("`for ... in` requires a List: {e}")),
            }
            let s = crate::pattern::infer_pattern(pattern, &subst.apply(&elem), &loop_scope, ctx);
            subst = s.compose(&subst);
        }
        None => {
            if let Err(e) = unify(&subst.apply(&source_ty), &Ty::bool_ty()) {
                ctx.error(codes::TYPE_ERROR, iterable_or_condition.span, format!("`for` condition must be Bool: {e}"));
            }
        }
    }

    ctx.push_loop();
    let (_, s1) = crate::engine::infer(body, &loop_scope, ctx);
    subst = s1.compose(&subst);
    let return_ty = ctx.pop_loop().unwrap_or_else(Ty::nil);
    (subst.apply(&return_ty), subst)
}

pub fn infer_break(value: Option<&Expr>, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (ty, subst) = match value {
        Some(v) => crate::engine::infer(v, table, ctx),
        None => (Ty::nil(), Subst::empty()),
    };
    ctx.record_break(subst.apply(&ty));
    (Ty::nil(), subst)
}

#[must_use]
pub fn infer_continue() -> (Ty, Subst) {
    (Ty::nil(), Subst::empty())
}

pub fn infer_block(stmts: &[Stmt], table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let block_scope = table.new_enclosed();
    let mut subst = Subst::empty();
    let mut last_ty = Ty::nil();
    for stmt in stmts {
        let (ty, s) = infer_stmt(stmt, &block_scope, ctx);
        subst = s.compose(&subst);
        last_ty = ty;
    }
    (subst.apply(&last_ty), subst)
}

/// Infers a single statement inside a block, returning the type of its
/// trailing-expression form (`Nil` for declarations).
pub fn infer_stmt(stmt: &Stmt, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    match &stmt.kind {
        StmtKind::Expression(expr) => crate::engine::infer(expr, table, ctx),
        StmtKind::Function(func) => {
            let scheme = crate::engine::infer_function(func, table, ctx);
            if let Err(e) = table.define_value(&func.name, scheme) {
                ctx.error(codes::REDEFINITION, stmt.span, e.to_string());
            }
            (Ty::nil(), Subst::empty())
        }
        StmtKind::Constant(decl) => {
            let (value_ty, subst) = crate::engine::infer(&decl.value, table, ctx);
            let final_ty = match &decl.ty {
                Some(annotated) => {
                    let built = crate::type_build::build_type(annotated, table);
                    match unify(&built, &subst.apply(&value_ty)) {
                        Ok(_) => built,
                        Err(e) => {
                            ctx.error(codes::ASSIGNMENT_MISMATCH, stmt.span, e.to_string());
                            subst.apply(&value_ty)
                        }
                    }
                }
                None => subst.apply(&value_ty),
            };
            if let Err(e) = table.define_constant(&decl.name, Scheme::monomorphic(final_ty)) {
                ctx.error(codes::REDEFINITION, stmt.span, e.to_string());
            }
            (Ty::nil(), subst)
        }
        StmtKind::TypeDecl(_) | StmtKind::TraitDecl(_) | StmtKind::InstanceDecl(_) | StmtKind::Package(_) | StmtKind::Import(_) => {
            (Ty::nil(), Subst::empty())
        }
    }
}

pub fn infer_match(scrutinee: &Expr, arms: &[MatchArm], span: Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (scrutinee_ty, s0) = crate::engine::infer(scrutinee, table, ctx);
    let mut subst = s0;

    let mut result_ty: Option<Ty> = None;
    for arm in arms {
        let arm_scope = table.new_enclosed();
        let p = crate::pattern::infer_pattern(&arm.pattern, &subst.apply(&scrutinee_ty), &arm_scope, ctx);
        subst = p.compose(&subst);

        if let Some(guard) = &arm.guard {
            let (guard_ty, gs) = crate::engine::infer(guard, &arm_scope, ctx);
            subst = gs.compose(&subst);
            if let Err(e) = unify(&subst.apply(&guard_ty), &Ty::bool_ty()) {
                ctx.error(codes::TYPE_ERROR, guard.span, format!("match guard must be Bool: {e}"));
            }
        }

        let (body_ty, bs) = crate::engine::infer(&arm.body, &arm_scope, ctx);
        subst = bs.compose(&subst);
        let body_ty = subst.apply(&body_ty);

        result_ty = Some(match result_ty {
            None => body_ty,
            Some(acc) => match unify(&acc, &body_ty) {
                Ok(s) => {
                    subst = s.compose(&subst);
                    subst.apply(&acc)
                }
                Err(_) => Ty::union(vec![acc, body_ty]),
            },
        });
    }

    let patterns: Vec<&Pattern> = arms.iter().map(|a| &a.pattern).collect();
    if let Coverage::Missing(detail) = check_exhaustiveness(&patterns, &subst.apply(&scrutinee_ty), table) {
        ctx.error(codes::NON_EXHAUSTIVE, span, format!("Missing cases: {detail}"));
    }

    (result_ty.unwrap_or_else(Ty::nil), subst)
}
