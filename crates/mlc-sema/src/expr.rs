//! Literal, identifier, and collection-literal inference (spec.md §4.3).

use crate::context::InferenceContext;
use crate::suggest::suggest;
use indexmap::IndexMap;
use mlc_ast::expr::{Expr, StringPart};
use mlc_common::diag::codes;
use mlc_common::Span;
use mlc_symbols::{SymbolKind, SymbolTable};
use mlc_types::{unify, Subst, Ty};

pub fn infer_identifier(name: &str, span: Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    match table.find(name) {
        Some(sym) => match sym.kind {
            SymbolKind::Value(scheme) => (mlc_types::instantiate(&scheme, &mut ctx.tyvars), Subst::empty()),
            SymbolKind::Constructor { scheme, .. } => (mlc_types::instantiate(&scheme, &mut ctx.tyvars), Subst::empty()),
            SymbolKind::TypeAdt { .. } | SymbolKind::TypeAlias { .. } => {
                (Ty::type_of(table.resolve_type(name)), Subst::empty())
            }
            SymbolKind::Pending => {
                ctx.internal_error(span, format!("`{name}` was used before its signature was resolved"));
                (ctx.fresh(), Subst::empty())
            }
            SymbolKind::Trait(_) | SymbolKind::ModuleAlias { .. } => {
                ctx.error(codes::TYPE_ERROR, span, format!("`{name}` cannot be used as a value"));
                (ctx.fresh(), Subst::empty())
            }
        },
        None => {
            let candidates = all_value_like_names(table);
            let hints = suggest(name, candidates.iter().map(String::as_str), ctx.options.suggestion_edit_distance, ctx.options.suggestion_limit);
            let message = format!("`{name}` is not defined");
            if hints.is_empty() {
                ctx.error(codes::UNDECLARED_VARIABLE, span, message);
            } else {
                ctx.error_with_hint(codes::UNDECLARED_VARIABLE, span, message, format!("did you mean: {}", hints.join(", ")));
            }
            (ctx.fresh(), Subst::empty())
        }
    }
}

/// Candidate names for "did you mean" suggestions: every visible binding
/// that could stand where an identifier expression was expected (a value,
/// a constructor, or a not-yet-resolved forward declaration) — types,
/// traits, and module aliases are excluded since `suggest`'s case-class
/// filter already keeps a lowercase-starting typo from matching them, and
/// they aren't valid identifier-expression resolutions anyway.
fn all_value_like_names(table: &SymbolTable) -> Vec<String> {
    table
        .names()
        .into_iter()
        .filter(|name| {
            table.find(name).is_some_and(|sym| matches!(sym.kind, SymbolKind::Value(_) | SymbolKind::Constructor { .. } | SymbolKind::Pending))
        })
        .collect()
}

pub fn infer_list_literal(elements: &[Expr], span: Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    if elements.is_empty() {
        let elem = ctx.fresh();
        return (Ty::list(elem), Subst::empty());
    }
    let (mut elem_ty, mut subst) = crate::engine::infer(&elements[0], table, ctx);
    for element in &elements[1..] {
        let (ty, s) = crate::engine::infer(element, table, ctx);
        subst = s.compose(&subst);
        match unify(&subst.apply(&elem_ty), &subst.apply(&ty)) {
            Ok(s2) => subst = s2.compose(&subst),
            Err(e) => ctx.error(codes::TYPE_ERROR, span, format!("inconsistent list element types: {e}")),
        }
        elem_ty = subst.apply(&elem_ty);
    }
    (Ty::list(elem_ty), subst)
}

pub fn infer_map_literal(entries: &[(Expr, Expr)], span: Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    if entries.is_empty() {
        return (Ty::map(ctx.fresh(), ctx.fresh()), Subst::empty());
    }
    let (mut key_ty, s0) = crate::engine::infer(&entries[0].0, table, ctx);
    let (mut val_ty, s1) = crate::engine::infer(&entries[0].1, table, ctx);
    let mut subst = s1.compose(&s0);
    for (key_expr, val_expr) in &entries[1..] {
        let (k, sk) = crate::engine::infer(key_expr, table, ctx);
        subst = sk.compose(&subst);
        match unify(&subst.apply(&key_ty), &subst.apply(&k)) {
            Ok(s) => subst = s.compose(&subst),
            Err(e) => ctx.error(codes::TYPE_ERROR, span, format!("inconsistent map key types: {e}")),
        }
        key_ty = subst.apply(&key_ty);

        let (v, sv) = crate::engine::infer(val_expr, table, ctx);
        subst = sv.compose(&subst);
        match unify(&subst.apply(&val_ty), &subst.apply(&v)) {
            Ok(s) => subst = s.compose(&subst),
            Err(e) => ctx.error(codes::TYPE_ERROR, span, format!("inconsistent map value types: {e}")),
        }
        val_ty = subst.apply(&val_ty);
    }
    (Ty::map(key_ty, val_ty), subst)
}

pub fn infer_tuple_literal(elements: &[Expr], table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let mut subst = Subst::empty();
    let mut tys = Vec::with_capacity(elements.len());
    for element in elements {
        let (ty, s) = crate::engine::infer(element, table, ctx);
        subst = s.compose(&subst);
        tys.push(subst.apply(&ty));
    }
    (Ty::tuple(tys), subst)
}

pub fn infer_record_literal(
    fields: &[(String, Expr)],
    spread_base: Option<&Expr>,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
) -> (Ty, Subst) {
    let mut subst = Subst::empty();
    let mut record_fields = IndexMap::new();

    if let Some(base) = spread_base {
        let (base_ty, s) = crate::engine::infer(base, table, ctx);
        subst = s.compose(&subst);
        if let Some((base_fields, _)) = subst.apply(&base_ty).as_record() {
            for (name, ty) in base_fields {
                record_fields.insert(name.clone(), ty.clone());
            }
        }
    }

    for (name, value) in fields {
        let (ty, s) = crate::engine::infer(value, table, ctx);
        subst = s.compose(&subst);
        record_fields.insert(name.clone(), subst.apply(&ty));
    }

    for value in record_fields.values_mut() {
        *value = subst.apply(value);
    }

    (Ty::record(record_fields, true), subst)
}

pub fn infer_interpolated_string(parts: &[StringPart], table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let mut subst = Subst::empty();
    for part in parts {
        if let StringPart::Interpolated(expr) = part {
            let (_, s) = crate::engine::infer(expr, table, ctx);
            subst = s.compose(&subst);
        }
    }
    (Ty::string(), subst)
}
