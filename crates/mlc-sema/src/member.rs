//! Member access (`.field`, `?.`), and indexing (spec.md §4.3).

use crate::context::InferenceContext;
use indexmap::IndexMap;
use mlc_ast::expr::{Expr, ExprKind};
use mlc_common::diag::codes;
use mlc_common::Span;
use mlc_symbols::SymbolTable;
use mlc_types::{unify, Subst, Ty, TyKind};

/// `receiver.field` / `receiver?.field`. Resolution order (spec.md §4.3,
/// "Member"): (a) a structural record field, (b) an instance method of a
/// trait the receiver's type implements, (c) an extension method registered
/// for the receiver's type, (d) a super-trait's instance method, (e) give up
/// with an undefined-symbol diagnostic.
pub fn infer_member(receiver: &Expr, field: &str, optional: bool, span: Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (receiver_ty, subst) = crate::engine::infer(receiver, table, ctx);
    let resolved = subst.apply(&receiver_ty).resolve_alias();

    if optional {
        return infer_optional_member(&resolved, field, span, table, ctx, subst);
    }

    let receiver_name = match &receiver.kind {
        ExprKind::Identifier(name) => Some(name.as_str()),
        _ => None,
    };
    let ty = resolve_member(receiver_name, &resolved, field, span, table, ctx);
    (subst.apply(&ty), subst)
}

fn resolve_member(receiver_name: Option<&str>, resolved: &Ty, field: &str, span: Span, table: &SymbolTable, ctx: &mut InferenceContext) -> Ty {
    if let Some((fields, is_open)) = resolved.as_record() {
        if let Some(ty) = fields.get(field) {
            return ty.clone();
        }
        if is_open {
            return widen_record_field(receiver_name, fields, field, table, ctx);
        }
        ctx.error(codes::TYPE_ERROR, span, format!("record has no field `{field}`"));
        return ctx.fresh();
    }

    let Some(type_name) = resolved.as_con_name().map(str::to_string) else {
        ctx.error(codes::TYPE_ERROR, span, format!("`{resolved}` has no member `{field}`"));
        return ctx.fresh();
    };

    if let Some(scheme) = lookup_method(&type_name, field, table) {
        return mlc_types::instantiate(&scheme, &mut ctx.tyvars);
    }

    if let Some(scheme) = table.get_extension_method(&type_name, field) {
        return mlc_types::instantiate(&scheme, &mut ctx.tyvars);
    }

    ctx.error(codes::UNDEFINED_SYMBOL, span, format!("`{type_name}` has no member `{field}`"));
    ctx.fresh()
}

/// A missing field on an *open* record is not an error (spec.md §9 Open
/// Question 1): the row is refined in place with a fresh type for the new
/// field. When the receiver is a bare identifier, the refined record type
/// is written back through `Update` so later accesses against the same
/// binding see the widened shape rather than re-widening independently.
fn widen_record_field(receiver_name: Option<&str>, fields: &IndexMap<String, Ty>, field: &str, table: &SymbolTable, ctx: &mut InferenceContext) -> Ty {
    let fresh = ctx.fresh();
    let mut widened_fields = fields.clone();
    widened_fields.insert(field.to_string(), fresh.clone());
    let widened = Ty::record(widened_fields, true);
    if let Some(name) = receiver_name {
        let _ = table.update(name, widened);
    }
    fresh
}

/// Searches a type's own instance methods, then walks each implemented
/// trait's super-traits for an inherited instance method (spec.md §4.3
/// Member rule, steps (b) and (d)).
fn lookup_method(type_name: &str, field: &str, table: &SymbolTable) -> Option<mlc_types::Scheme> {
    for trait_name in table.traits_implemented_by(type_name) {
        if let Some(scheme) = table.get_instance_method(&trait_name, type_name, field) {
            return Some(scheme);
        }
    }
    for trait_name in table.traits_implemented_by(type_name) {
        for super_trait in table.get_trait_super_traits(&trait_name) {
            if let Some(scheme) = table.get_instance_method(&super_trait, type_name, field) {
                return Some(scheme);
            }
        }
    }
    None
}

fn infer_optional_member(resolved: &Ty, field: &str, span: Span, table: &SymbolTable, ctx: &mut InferenceContext, subst: Subst) -> (Ty, Subst) {
    let TyKind::App { constructor, args } = resolved.kind() else {
        ctx.error(codes::TYPE_ERROR, span, format!("`?.` requires an optional receiver, found `{resolved}`"));
        return (ctx.fresh(), subst);
    };
    let Some(container_name) = constructor.as_con_name() else {
        return (ctx.fresh(), subst);
    };
    if !table.is_implementation_exists("Optional", container_name) {
        ctx.error(codes::TYPE_ERROR, span, format!("type `{container_name}` does not implement `Optional`"));
        return (ctx.fresh(), subst);
    }
    let inner = match table.get_optional_unwrap_return_type(container_name) {
        Some(registered) => registered,
        None => match args.first() {
            Some(arg) => arg.clone(),
            None => {
                ctx.internal_error(span, format!("`{container_name}` has no type argument for `?.`"));
                return (ctx.fresh(), subst);
            }
        },
    };
    let field_ty = resolve_member(None, &inner.resolve_alias(), field, span, table, ctx);
    (Ty::option(field_ty), subst)
}

pub fn infer_index(receiver: &Expr, index: &Expr, span: Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (receiver_ty, s0) = crate::engine::infer(receiver, table, ctx);
    let (index_ty, s1) = crate::engine::infer(index, table, ctx);
    let mut subst = s1.compose(&s0);
    let resolved = subst.apply(&receiver_ty).resolve_alias();

    match resolved.kind() {
        TyKind::App { constructor, args } if constructor.as_con_name() == Some("Map") => {
            let (key_ty, value_ty) = (args[0].clone(), args[1].clone());
            if let Err(e) = unify(&subst.apply(&key_ty), &subst.apply(&index_ty)) {
                ctx.error(codes::TYPE_ERROR, index.span, format!("map index type mismatch: {e}"));
            }
            (Ty::option(subst.apply(&value_ty)), subst)
        }
        TyKind::App { constructor, .. } if constructor.as_con_name() == Some("List") => {
            let elem = list_elem(&resolved);
            if let Err(e) = unify(&subst.apply(&index_ty), &Ty::int()) {
                ctx.error(codes::TYPE_ERROR, index.span, format!("list index must be Int: {e}"));
            }
            (subst.apply(&elem), subst)
        }
        TyKind::Con { name, .. } if name == "Bytes" => {
            if let Err(e) = unify(&subst.apply(&index_ty), &Ty::int()) {
                ctx.error(codes::TYPE_ERROR, index.span, format!("bytes index must be Int: {e}"));
            }
            (Ty::option(Ty::int()), subst)
        }
        TyKind::Tuple(elems) => index_into_tuple(elems, index, span, &mut subst, ctx),
        _ => {
            ctx.error(codes::TYPE_ERROR, span, format!("`{resolved}` does not support indexing"));
            (ctx.fresh(), subst)
        }
    }
}

fn list_elem(resolved: &Ty) -> Ty {
    match resolved.kind() {
        TyKind::App { args, .. } => args.first().cloned().unwrap_or_else(Ty::nil),
        _ => Ty::nil(),
    }
}

fn index_into_tuple(elems: &[Ty], index: &Expr, span: Span, subst: &mut Subst, ctx: &mut InferenceContext) -> (Ty, Subst) {
    if let mlc_ast::expr::ExprKind::IntLiteral(i) = &index.kind {
        let i = *i;
        if let Some(elem) = usize::try_from(i).ok().and_then(|i| elems.get(i)) {
            return (subst.apply(elem), subst.clone());
        }
        ctx.error(codes::TYPE_ERROR, span, format!("tuple index {i} out of range"));
        return (ctx.fresh(), subst.clone());
    }
    ctx.error(codes::TYPE_ERROR, index.span, "tuple indices must be a literal Int".to_string());
    (ctx.fresh(), subst.clone())
}
