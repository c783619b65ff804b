//! Pattern typing and binding (spec.md §4.5).

use crate::context::InferenceContext;
use crate::type_build::build_type;
use indexmap::IndexMap;
use mlc_ast::pattern::{LiteralPattern, Pattern, PatternKind, StringPatternPart};
use mlc_common::diag::codes;
use mlc_symbols::{SymbolKind, SymbolTable};
use mlc_types::{unify, unify_allow_extra, Scheme, Subst, Ty};

/// Types `pattern` against `expected`, binding any identifiers it
/// introduces into `table` (a scope already opened for the arm). Returns
/// the substitution accumulated from any internal unification.
pub fn infer_pattern(pattern: &Pattern, expected: &Ty, table: &SymbolTable, ctx: &mut InferenceContext) -> Subst {
    match &pattern.kind {
        PatternKind::Wildcard => Subst::empty(),

        PatternKind::Identifier(name) => {
            let _ = table.define_value(name, Scheme::monomorphic(expected.clone()));
            Subst::empty()
        }

        PatternKind::Pin(name) => match table.find(name) {
            Some(sym) => match sym.kind {
                SymbolKind::Value(scheme) => unify_or_report(&scheme.ty, expected, pattern, ctx),
                _ => Subst::empty(),
            },
            None => {
                ctx.error(codes::UNDEFINED_SYMBOL, pattern.span, format!("`{name}` is not defined"));
                Subst::empty()
            }
        },

        PatternKind::Type { name, ty } => {
            let built = build_type(ty, table);
            if let Some(members) = expected.as_union_members() {
                if !members.iter().any(|m| unify(m, &built).is_ok()) {
                    ctx.error(
                        codes::TYPE_ERROR,
                        pattern.span,
                        format!("type `{built}` is not a member of `{expected}`"),
                    );
                }
            }
            let _ = table.define_value(name, Scheme::monomorphic(built));
            Subst::empty()
        }

        PatternKind::Literal(lit) => {
            let natural = literal_natural_type(lit);
            unify_or_report(&natural, expected, pattern, ctx)
        }

        PatternKind::StringPattern { parts } => {
            let string_ty = Ty::string();
            let subst = unify_or_report(&string_ty, expected, pattern, ctx);
            for part in parts {
                if let StringPatternPart::Capture(name) = part {
                    let _ = table.define_value(name, Scheme::monomorphic(Ty::string()));
                }
            }
            subst
        }

        PatternKind::Constructor { name, args } => infer_constructor_pattern(pattern, name, args, expected, table, ctx),

        PatternKind::List { elements, spread } => infer_list_pattern(pattern, elements, spread, expected, table, ctx),

        PatternKind::Tuple { elements, spread } => infer_tuple_pattern(pattern, elements, spread, expected, table, ctx),

        PatternKind::Record { fields, is_open } => infer_record_pattern(pattern, fields, *is_open, expected, table, ctx),

        PatternKind::Spread(inner) => infer_pattern(inner, expected, table, ctx),
    }
}

fn unify_or_report(actual: &Ty, expected: &Ty, pattern: &Pattern, ctx: &mut InferenceContext) -> Subst {
    match unify(actual, expected) {
        Ok(s) => s,
        Err(e) => {
            ctx.error(codes::TYPE_ERROR, pattern.span, e.to_string());
            Subst::empty()
        }
    }
}

fn literal_natural_type(lit: &LiteralPattern) -> Ty {
    match lit {
        LiteralPattern::Int(_) => Ty::int(),
        LiteralPattern::Float(_) => Ty::float(),
        LiteralPattern::Bool(_) => Ty::bool_ty(),
        LiteralPattern::Char(_) => Ty::char_ty(),
        LiteralPattern::Nil => Ty::nil(),
    }
}

fn infer_constructor_pattern(
    pattern: &Pattern,
    name: &str,
    args: &[Pattern],
    expected: &Ty,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
) -> Subst {
    let Some(sym) = table.find(name) else {
        ctx.error(codes::UNDEFINED_SYMBOL, pattern.span, format!("constructor `{name}` is not defined"));
        return Subst::empty();
    };
    let SymbolKind::Constructor { scheme, field_count, .. } = sym.kind else {
        ctx.error(codes::TYPE_ERROR, pattern.span, format!("`{name}` is not a constructor"));
        return Subst::empty();
    };
    if field_count != args.len() {
        ctx.error(
            codes::TYPE_ERROR,
            pattern.span,
            format!("constructor `{name}` expects {field_count} argument(s), found {}", args.len()),
        );
        return Subst::empty();
    }
    let instance = mlc_types::instantiate(&scheme, &mut ctx.tyvars);
    let mlc_types::TyKind::Func { params, ret, .. } = instance.kind() else {
        ctx.internal_error(pattern.span, format!("constructor `{name}` has a non-function scheme"));
        return Subst::empty();
    };
    let params = params.clone();
    let ret = ret.clone();

    let mut subst = unify_or_report(&ret, expected, pattern, ctx);
    for (arg_pattern, param_ty) in args.iter().zip(params.iter()) {
        let applied = subst.apply(param_ty);
        let s = infer_pattern(arg_pattern, &applied, table, ctx);
        subst = s.compose(&subst);
    }
    subst
}

fn infer_list_pattern(
    pattern: &Pattern,
    elements: &[Pattern],
    spread: &Option<Box<Pattern>>,
    expected: &Ty,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
) -> Subst {
    let elem = ctx.fresh();
    let list_ty = Ty::list(elem.clone());
    let mut subst = unify_or_report(&list_ty, expected, pattern, ctx);
    let elem = subst.apply(&elem);
    for element in elements {
        let s = infer_pattern(element, &elem, table, ctx);
        subst = s.compose(&subst);
    }
    if let Some(rest) = spread {
        let rest_list = Ty::list(subst.apply(&elem));
        let s = infer_pattern(rest, &rest_list, table, ctx);
        subst = s.compose(&subst);
    }
    subst
}

fn infer_tuple_pattern(
    pattern: &Pattern,
    elements: &[Pattern],
    spread: &Option<Box<Pattern>>,
    expected: &Ty,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
) -> Subst {
    // A tuple-shaped pattern against a List scrutinee is re-interpreted as a
    // list pattern, permitting uniform variadic destructuring (spec.md §4.5).
    if let mlc_types::TyKind::App { constructor, .. } = expected.kind() {
        if constructor.as_con_name() == Some("List") {
            return infer_list_pattern(pattern, elements, spread, expected, table, ctx);
        }
    }

    let fresh: Vec<Ty> = elements.iter().map(|_| ctx.fresh()).collect();
    let tuple_ty = Ty::tuple(fresh.clone());
    let mut subst = unify_or_report(&tuple_ty, expected, pattern, ctx);
    for (element, elem_ty) in elements.iter().zip(fresh.iter()) {
        let applied = subst.apply(elem_ty);
        let s = infer_pattern(element, &applied, table, ctx);
        subst = s.compose(&subst);
    }
    if let Some(rest) = spread {
        let rest_ty = Ty::tuple(fresh.iter().map(|t| subst.apply(t)).collect());
        let s = infer_pattern(rest, &rest_ty, table, ctx);
        subst = s.compose(&subst);
    }
    subst
}

fn infer_record_pattern(
    pattern: &Pattern,
    fields: &[(String, Pattern)],
    is_open: bool,
    expected: &Ty,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
) -> Subst {
    if let Some((existing_fields, existing_open)) = expected.as_record() {
        let mut subst = Subst::empty();
        for (name, field_pattern) in fields {
            let field_ty = match existing_fields.get(name) {
                Some(t) => subst.apply(t),
                None if existing_open || is_open => ctx.fresh(),
                None => {
                    ctx.error(codes::TYPE_ERROR, pattern.span, format!("record has no field `{name}`"));
                    ctx.fresh()
                }
            };
            let s = infer_pattern(field_pattern, &field_ty, table, ctx);
            subst = s.compose(&subst);
        }
        subst
    } else {
        // Against a bare variable (e.g. an unresolved scrutinee type),
        // synthesize an open record of exactly the named fields.
        let mut synthesized = IndexMap::new();
        let mut field_types = Vec::new();
        for (name, _) in fields {
            let ty = ctx.fresh();
            synthesized.insert(name.clone(), ty.clone());
            field_types.push(ty);
        }
        let record_ty = Ty::record(synthesized, true);
        let mut subst = unify_or_report(&record_ty, expected, pattern, ctx);
        for ((_, field_pattern), field_ty) in fields.iter().zip(field_types.iter()) {
            let applied = subst.apply(field_ty);
            let s = infer_pattern(field_pattern, &applied, table, ctx);
            subst = s.compose(&subst);
        }
        subst
    }
}

/// Whether `pattern` matches anything of its expected type without further
/// narrowing — a wildcard, a bare identifier binding, or a top-level spread.
#[must_use]
pub fn is_catch_all(pattern: &Pattern) -> bool {
    matches!(pattern.kind, PatternKind::Wildcard | PatternKind::Identifier(_) | PatternKind::Spread(_))
}
