//! Call inference: arity/variadic/default-parameter handling, partial
//! application, spread unpacking, and constrained type-parameter checking
//! (spec.md §4.3, "Call").

use crate::context::InferenceContext;
use mlc_ast::expr::{Expr, ExprKind};
use mlc_common::diag::codes;
use mlc_common::Span;
use mlc_symbols::SymbolTable;
use mlc_types::{unify, unify_allow_extra, Subst, Ty, TyKind};

pub fn infer_call(callee: &Expr, args: &[Expr], span: Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (callee_ty, s0) = crate::engine::infer(callee, table, ctx);
    let mut subst = s0;
    let resolved_callee = subst.apply(&callee_ty).resolve_alias();

    match resolved_callee.kind() {
        TyKind::Func { .. } => infer_func_call(&resolved_callee, args, span, table, ctx, subst),
        TyKind::Type(inner) => infer_type_call(inner, args, span, table, ctx, subst),
        TyKind::Var(name) => {
            let arg_results: Vec<(Ty, Subst)> = args.iter().map(|a| crate::engine::infer(a, table, ctx)).collect();
            let ret = ctx.fresh();
            let param_tys: Vec<Ty> = arg_results.iter().map(|(t, _)| t.clone()).collect();
            let func_ty = Ty::func(param_tys, ret.clone(), false, 0, vec![]);
            match unify(&Ty::var(name), &func_ty) {
                Ok(s) => {
                    subst = s.compose(&subst);
                    (subst.apply(&ret), subst)
                }
                Err(e) => {
                    ctx.error(codes::TYPE_ERROR, span, e.to_string());
                    (ctx.fresh(), subst)
                }
            }
        }
        _ => {
            ctx.error(codes::TYPE_ERROR, span, format!("`{resolved_callee}` is not callable"));
            (ctx.fresh(), subst)
        }
    }
}

fn infer_func_call(
    callee_ty: &Ty,
    args: &[Expr],
    span: Span,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
    mut subst: Subst,
) -> (Ty, Subst) {
    let TyKind::Func { params, ret, variadic, default_count, constraints } = callee_ty.kind() else {
        unreachable!("caller already matched Func");
    };

    let has_trailing_spread = matches!(args.last().map(|a| &a.kind), Some(ExprKind::Spread(_)));
    let positional_count = if has_trailing_spread { args.len() - 1 } else { args.len() };

    let required = params.len().saturating_sub(*default_count);
    let fixed_params_len = if *variadic { params.len().saturating_sub(1) } else { params.len() };

    if !variadic && !has_trailing_spread && positional_count > params.len() {
        ctx.error(codes::TYPE_ERROR, span, format!("expected at most {} argument(s), found {positional_count}", params.len()));
        return (ctx.fresh(), subst);
    }
    if positional_count < required && !has_trailing_spread {
        if ctx.options.allow_partial_application && positional_count > 0 {
            return infer_partial_application(params, ret, *variadic, *default_count, args, table, ctx, subst);
        }
        ctx.error(codes::TYPE_ERROR, span, format!("expected at least {required} argument(s), found {positional_count}"));
        return (ctx.fresh(), subst);
    }

    for (i, arg) in args.iter().enumerate() {
        if let ExprKind::Spread(inner) = &arg.kind {
            let (spread_ty, s) = crate::engine::infer(inner, table, ctx);
            subst = s.compose(&subst);
            if *variadic {
                let elem = &params[fixed_params_len];
                let expected_list = Ty::list(subst.apply(elem));
                if let Err(e) = unify(&subst.apply(&spread_ty), &expected_list) {
                    ctx.error(codes::TYPE_ERROR, arg.span, format!("spread argument does not match variadic parameter: {e}"));
                }
            }
            continue;
        }
        let Some(param_ty) = params.get(i) else {
            break;
        };
        let expected = if *variadic && i >= fixed_params_len { &params[fixed_params_len] } else { param_ty };
        let (arg_ty, s) = crate::engine::infer(arg, table, ctx);
        subst = s.compose(&subst);
        match unify_allow_extra(&subst.apply(expected), &subst.apply(&arg_ty)) {
            Ok(s) => subst = s.compose(&subst),
            Err(e) => ctx.error(codes::TYPE_ERROR, arg.span, format!("argument {} does not match parameter type: {e}", i + 1)),
        }
    }

    for (var_name, trait_name) in constraints {
        check_constraint(var_name, trait_name, &subst, table, ctx, span);
    }

    (subst.apply(ret), subst)
}

fn check_constraint(var_name: &str, trait_name: &str, subst: &Subst, table: &SymbolTable, ctx: &mut InferenceContext, span: Span) {
    let resolved = subst.apply(&Ty::var(var_name));
    if let Some(still_var) = resolved.as_var() {
        ctx.add_constraint(still_var, trait_name);
        return;
    }
    let nominal = resolved.resolve_alias();
    let Some(name) = nominal.as_con_name() else {
        return;
    };
    if !table.is_implementation_exists(trait_name, name) {
        ctx.error(codes::TYPE_ERROR, span, format!("type `{name}` does not implement required trait `{trait_name}`"));
    }
}

/// A call with fewer arguments than required (and no variadic/spread tail)
/// yields a new function covering just the missing trailing parameters
/// (spec.md §4.3: partial application is the default behavior, not an
/// error, unless `AnalysisOptions::allow_partial_application` is off).
fn infer_partial_application(
    params: &[Ty],
    ret: &Ty,
    variadic: bool,
    default_count: usize,
    args: &[Expr],
    table: &SymbolTable,
    ctx: &mut InferenceContext,
    mut subst: Subst,
) -> (Ty, Subst) {
    for (arg, param_ty) in args.iter().zip(params.iter()) {
        let (arg_ty, s) = crate::engine::infer(arg, table, ctx);
        subst = s.compose(&subst);
        if let Err(e) = unify_allow_extra(&subst.apply(param_ty), &subst.apply(&arg_ty)) {
            ctx.error(codes::TYPE_ERROR, arg.span, format!("argument does not match parameter type: {e}"));
        }
    }
    let remaining: Vec<Ty> = params[args.len()..].iter().map(|p| subst.apply(p)).collect();
    let remaining_defaults = default_count.min(remaining.len());
    let partial = Ty::func(remaining, subst.apply(ret), variadic, remaining_defaults, vec![]);
    (partial, subst)
}

/// `Type(t)(args...)` — a type applied to type arguments (spec.md §4.3 Call
/// rule (2)). Every argument must itself infer to a `Type`; the result is
/// `Type(App(t, args))`, the reified form of the instantiated generic type.
fn infer_type_call(inner: &Ty, args: &[Expr], span: Span, table: &SymbolTable, ctx: &mut InferenceContext, mut subst: Subst) -> (Ty, Subst) {
    let mut inner_args = Vec::with_capacity(args.len());
    for arg in args {
        let (arg_ty, s) = crate::engine::infer(arg, table, ctx);
        subst = s.compose(&subst);
        let applied = subst.apply(&arg_ty);
        match applied.kind() {
            TyKind::Type(t) => inner_args.push(t.clone()),
            _ => ctx.error(codes::TYPE_ERROR, arg.span, format!("expected a type argument, found `{applied}`")),
        }
    }
    (Ty::type_of(Ty::app(inner.clone(), inner_args)), subst)
}
