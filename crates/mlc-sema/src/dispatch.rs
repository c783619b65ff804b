//! Operator → trait dispatch (spec.md §4.4).

use crate::context::InferenceContext;
use mlc_common::diag::codes;
use mlc_common::Span;
use mlc_symbols::SymbolTable;
use mlc_types::{instantiate, unify, Subst, Ty, TyKind};

/// Operators whose operands don't share a single shape (spec.md §4.4
/// "Higher-kinded operators") — `F<A->B> <*> F<A>`, `F<A> >>= (A -> F<B>)`,
/// `(A -> B) <$> F<A>` — so a direct `unify(left, right)` can never solve
/// them. Each maps to the trait method whose instance signature is looked
/// up, instantiated, and unified positionally against the two operands.
const HKT_OPS: &[(&str, &str, &str)] = &[(">>=", "Monad", ">>="), ("<*>", "Applicative", "<*>"), ("<$>", "Functor", "fmap")];

/// Primitive fallback chain, most-specific first, used when neither
/// operand's type participates in the operator's mapped trait.
const NUMERIC_CHAIN: &[&str] = &["Int", "Float", "BigInt", "Rational"];

fn is_comparison_or_equality(op: &str) -> bool {
    matches!(op, "==" | "!=" | "<" | ">" | "<=" | ">=")
}

/// Resolves a binary operator's result type, dispatching through the trait
/// system first and falling back to the fixed primitive-promotion chain.
pub fn dispatch_binary(
    op: &str,
    left: &Ty,
    right: &Ty,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
    span: Span,
) -> Ty {
    if let Some((trait_name, method_name)) = HKT_OPS.iter().find(|(o, _, _)| *o == op).map(|(_, t, m)| (*t, *m)) {
        return dispatch_hkt_binary(op, trait_name, method_name, left, right, table, ctx, span);
    }

    if let Some(trait_name) = table.get_trait_for_operator(op) {
        if operand_satisfies(left, &trait_name, table, ctx) || operand_satisfies(right, &trait_name, table, ctx) {
            match unify(left, right) {
                Ok(_subst) => {
                    return if is_comparison_or_equality(op) { Ty::bool_ty() } else { left.clone() };
                }
                Err(e) => {
                    ctx.error(codes::TYPE_ERROR, span, format!("operands of `{op}` disagree: {e}"));
                    return Ty::bool_ty();
                }
            }
        }
    }

    if let Some(result) = primitive_fallback(op, left, right) {
        return result;
    }

    ctx.error(
        codes::TYPE_ERROR,
        span,
        format!("no implementation of operator `{op}` for `{left}` and `{right}`"),
    );
    ctx.fresh()
}

/// Dispatches one of [`HKT_OPS`]: finds which operand's head type implements
/// `trait_name`, looks up that type's instance method named `op`,
/// instantiates its signature with fresh variables, and unifies it
/// positionally against `left` then `right` (composing the substitution in
/// between), returning the substituted result type.
fn dispatch_hkt_binary(op: &str, trait_name: &str, method_name: &str, left: &Ty, right: &Ty, table: &SymbolTable, ctx: &mut InferenceContext, span: Span) -> Ty {
    let left_resolved = left.resolve_alias();
    let right_resolved = right.resolve_alias();
    let container_name = head_name(&left_resolved)
        .filter(|name| table.is_implementation_exists(trait_name, name))
        .or_else(|| head_name(&right_resolved).filter(|name| table.is_implementation_exists(trait_name, name)));

    let Some(container_name) = container_name else {
        ctx.error(codes::TYPE_ERROR, span, format!("no implementation of `{trait_name}` for `{left}` or `{right}`"));
        return ctx.fresh();
    };

    let Some(scheme) = table.get_instance_method(trait_name, container_name, method_name) else {
        ctx.error(codes::TYPE_ERROR, span, format!("type `{container_name}` has no method `{method_name}` for trait `{trait_name}`"));
        return ctx.fresh();
    };

    let instantiated = instantiate(&scheme, &mut ctx.tyvars);
    let TyKind::Func { params, ret, .. } = instantiated.kind() else {
        ctx.internal_error(span, format!("instance method `{method_name}` of `{container_name}` is not a function"));
        return ctx.fresh();
    };
    if params.len() != 2 {
        ctx.internal_error(span, format!("instance method `{method_name}` of `{container_name}` does not take two operands"));
        return ctx.fresh();
    }

    let mut subst = match unify(&params[0], left) {
        Ok(s) => s,
        Err(e) => {
            ctx.error(codes::TYPE_ERROR, span, format!("left operand of `{op}` does not match `{container_name}`'s instance: {e}"));
            return ctx.fresh();
        }
    };
    match unify(&subst.apply(&params[1]), &subst.apply(right)) {
        Ok(s) => subst = s.compose(&subst),
        Err(e) => {
            ctx.error(codes::TYPE_ERROR, span, format!("right operand of `{op}` does not match `{container_name}`'s instance: {e}"));
            return ctx.fresh();
        }
    }
    subst.apply(ret)
}

/// The nominal head of a type for trait/chain dispatch purposes: a bare
/// `Con`'s own name, or an `App`'s constructor name (`List<Int>` dispatches
/// as `"List"`, the same as a parameterless `Con`).
fn head_name(ty: &Ty) -> Option<&str> {
    match ty.kind() {
        mlc_types::TyKind::Con { name, .. } => Some(name),
        mlc_types::TyKind::App { constructor, .. } => constructor.as_con_name(),
        _ => None,
    }
}

fn operand_satisfies(ty: &Ty, trait_name: &str, table: &SymbolTable, ctx: &InferenceContext) -> bool {
    if let Some(var_name) = ty.as_var() {
        return ctx.has_constraint(var_name, trait_name);
    }
    let resolved = ty.resolve_alias();
    let Some(name) = head_name(&resolved) else {
        return false;
    };
    table.is_implementation_exists(trait_name, name)
}

fn primitive_fallback(op: &str, left: &Ty, right: &Ty) -> Option<Ty> {
    let chain = if op == "++" { &["List", "Bytes", "String"][..] } else { NUMERIC_CHAIN };
    let left_resolved = left.resolve_alias();
    let right_resolved = right.resolve_alias();
    let left_name = head_name(&left_resolved)?;
    let right_name = head_name(&right_resolved)?;
    let left_rank = chain.iter().position(|c| *c == left_name)?;
    let right_rank = chain.iter().position(|c| *c == right_name)?;
    let winner = chain[left_rank.max(right_rank)];
    let result_ty = if winner == "List" { left.clone() } else { Ty::con(winner) };
    Some(if is_comparison_or_equality(op) { Ty::bool_ty() } else { result_ty })
}

/// `( op )` used as a first-class value (spec.md §4.4).
#[must_use]
pub fn operator_as_function(op: &str, table: &SymbolTable, ctx: &mut InferenceContext) -> Ty {
    match op {
        "&&" | "||" => Ty::func(vec![Ty::bool_ty(), Ty::bool_ty()], Ty::bool_ty(), false, 0, vec![]),
        "::" => {
            let a = ctx.fresh();
            Ty::func(vec![a.clone(), Ty::list(a.clone())], Ty::list(a), false, 0, vec![])
        }
        "++" => {
            let a = ctx.fresh();
            Ty::func(vec![a.clone(), a.clone()], a, false, 0, vec![])
        }
        _ => {
            let a = ctx.fresh();
            let Some(trait_name) = table.get_trait_for_operator(op) else {
                return Ty::func(vec![a.clone(), a.clone()], a, false, 0, vec![]);
            };
            let var_name = a.as_var().expect("ctx.fresh() always yields a Var").to_string();
            let result = if is_comparison_or_equality(op) { Ty::bool_ty() } else { a.clone() };
            Ty::func(vec![a.clone(), a], result, false, 0, vec![(var_name, trait_name)])
        }
    }
}

/// Dispatches `??` (spec.md §4.4): `F<A> ?? A -> A` where `F` implements
/// `Optional`.
pub fn dispatch_null_coalesce(left: &Ty, right: &Ty, table: &SymbolTable, ctx: &mut InferenceContext, span: Span) -> (Ty, Subst) {
    let resolved = left.resolve_alias();
    let mlc_types::TyKind::App { constructor, args } = resolved.kind() else {
        ctx.error(codes::TYPE_ERROR, span, format!("left operand of `??` must be an optional type, found `{left}`"));
        return (right.clone(), Subst::empty());
    };
    let Some(container_name) = constructor.as_con_name() else {
        ctx.error(codes::TYPE_ERROR, span, "left operand of `??` has an unresolvable container".to_string());
        return (right.clone(), Subst::empty());
    };
    if !table.is_implementation_exists("Optional", container_name) {
        ctx.error(codes::TYPE_ERROR, span, format!("type `{container_name}` does not implement `Optional`"));
        return (right.clone(), Subst::empty());
    }
    let Some(inner) = args.first() else {
        ctx.internal_error(span, format!("`{container_name}` has no type argument for `??`"));
        return (right.clone(), Subst::empty());
    };
    match unify(inner, right) {
        Ok(subst) => (subst.apply(right), subst),
        Err(e) => {
            ctx.error(codes::TYPE_ERROR, span, e.to_string());
            (right.clone(), Subst::empty())
        }
    }
}
