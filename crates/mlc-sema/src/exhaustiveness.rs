//! Column-wise exhaustiveness checking (spec.md §4.5).

use mlc_ast::pattern::{LiteralPattern, Pattern, PatternKind};
use mlc_symbols::{SymbolTable, VariantInfo};
use mlc_types::{Subst, Ty, TyKind};

/// The outcome of checking a set of arm patterns against a scrutinee type.
pub enum Coverage {
    Exhaustive,
    Missing(String),
}

/// Checks whether `patterns` (one per match arm, in source order) cover
/// every concrete inhabitant of `scrutinee_ty`.
#[must_use]
pub fn check_exhaustiveness(patterns: &[&Pattern], scrutinee_ty: &Ty, table: &SymbolTable) -> Coverage {
    if patterns.iter().any(|p| crate::pattern::is_catch_all(p)) {
        return Coverage::Exhaustive;
    }

    let resolved = scrutinee_ty.resolve_alias();
    match resolved.kind() {
        TyKind::Con { name, .. } if name == "Bool" => check_bool(patterns),
        TyKind::Con { name, .. } if is_infinite_primitive(name) => {
            Coverage::Missing(format!("other {name} values"))
        }
        TyKind::App { constructor, args } if constructor.as_con_name() == Some("List") => {
            check_list(patterns, args.first())
        }
        TyKind::App { constructor, args } => match constructor.as_con_name() {
            Some(name) => check_generic_adt(patterns, name, args, table),
            None => Coverage::Exhaustive,
        },
        TyKind::Con { name, .. } => check_adt(patterns, name, table),
        TyKind::Tuple(elem_types) => check_tuple(patterns, elem_types, table),
        TyKind::Union(members) => check_union(patterns, members),
        TyKind::Var(_) => check_from_shape(patterns, table),
        _ => Coverage::Exhaustive,
    }
}

fn is_infinite_primitive(name: &str) -> bool {
    matches!(name, "Int" | "Float" | "BigInt" | "Rational" | "Char" | "String" | "Bytes" | "Bits")
}

fn check_bool(patterns: &[&Pattern]) -> Coverage {
    let mut has_true = false;
    let mut has_false = false;
    for p in patterns {
        if let PatternKind::Literal(LiteralPattern::Bool(b)) = &p.kind {
            if *b {
                has_true = true;
            } else {
                has_false = true;
            }
        }
    }
    match (has_true, has_false) {
        (true, true) => Coverage::Exhaustive,
        (false, true) => Coverage::Missing("true".to_string()),
        (true, false) => Coverage::Missing("false".to_string()),
        (false, false) => Coverage::Missing("true, false".to_string()),
    }
}

fn check_list(patterns: &[&Pattern], elem_ty: Option<&Ty>) -> Coverage {
    let mut has_empty = false;
    let mut has_nonempty = false;
    for p in patterns {
        if let PatternKind::List { elements, spread } = &p.kind {
            if elements.is_empty() && spread.is_none() {
                has_empty = true;
            } else {
                has_nonempty = true;
            }
            if spread.is_some() {
                has_nonempty = true;
            }
        }
        if let PatternKind::Tuple { elements, spread } = &p.kind {
            // A tuple pattern against a List scrutinee is reinterpreted the
            // same way pattern typing reinterprets it.
            if elements.is_empty() && spread.is_none() {
                has_empty = true;
            } else {
                has_nonempty = true;
            }
        }
    }
    let _ = elem_ty;
    match (has_empty, has_nonempty) {
        (true, true) => Coverage::Exhaustive,
        (false, _) => Coverage::Missing("[]".to_string()),
        (true, false) => Coverage::Missing("non-empty list".to_string()),
    }
}

fn check_adt(patterns: &[&Pattern], adt_name: &str, table: &SymbolTable) -> Coverage {
    let Some(variants) = table.get_variants(adt_name) else {
        return Coverage::Exhaustive;
    };
    check_adt_variants(patterns, &variants, table)
}

/// For a parametrized ADT scrutinee (`Option<Int>`, an `App` type), the
/// registered variant field types still carry the ADT's declaration-time
/// fresh type variables (e.g. `Some(T)`'s field is `Var(t3)`, not `Int`) —
/// substitute `args` in for those variables before delegating, the same way
/// `register_adt` ties the variant constructors' field types to the ADT's
/// own type parameters.
fn check_generic_adt(patterns: &[&Pattern], adt_name: &str, args: &[Ty], table: &SymbolTable) -> Coverage {
    let Some(variants) = table.get_variants(adt_name) else {
        return Coverage::Exhaustive;
    };
    let type_param_vars = table.get_adt_type_params(adt_name).unwrap_or_default();
    let mut subst = Subst::empty();
    for (var, arg) in type_param_vars.iter().zip(args.iter()) {
        subst.insert(var.clone(), arg.clone());
    }
    let substituted: Vec<VariantInfo> = variants
        .into_iter()
        .map(|v| VariantInfo { name: v.name, field_types: v.field_types.iter().map(|t| subst.apply(t)).collect() })
        .collect();
    check_adt_variants(patterns, &substituted, table)
}

fn check_adt_variants(patterns: &[&Pattern], variants: &[VariantInfo], table: &SymbolTable) -> Coverage {
    let mut missing = Vec::new();
    for variant in variants {
        let rows: Vec<&Pattern> = patterns
            .iter()
            .filter_map(|p| match &p.kind {
                PatternKind::Constructor { name, args } if name == &variant.name => Some((*p, args)),
                _ => None,
            })
            .map(|(p, _)| p)
            .collect();
        if rows.is_empty() {
            missing.push(variant.name.clone());
            continue;
        }
        let covered_by_catch_all = patterns.iter().any(|p| match &p.kind {
            PatternKind::Constructor { name, args } => name == &variant.name && args.iter().all(crate::pattern::is_catch_all),
            _ => false,
        });
        if !covered_by_catch_all && !variant.field_types.is_empty() {
            let sub_patterns: Vec<Vec<&Pattern>> = (0..variant.field_types.len())
                .map(|i| {
                    patterns
                        .iter()
                        .filter_map(|p| match &p.kind {
                            PatternKind::Constructor { name, args } if name == &variant.name => args.get(i),
                            _ => None,
                        })
                        .collect()
                })
                .collect();
            let mut variant_missing = false;
            for (i, column) in sub_patterns.iter().enumerate() {
                if let Coverage::Missing(_) = check_exhaustiveness(column, &variant.field_types[i], table) {
                    variant_missing = true;
                }
            }
            if variant_missing {
                missing.push(variant.name.clone());
            }
        }
    }
    if missing.is_empty() {
        Coverage::Exhaustive
    } else {
        Coverage::Missing(format!("[{}]", missing.join(", ")))
    }
}

fn check_tuple(patterns: &[&Pattern], elem_types: &[Ty], table: &SymbolTable) -> Coverage {
    let tuple_rows: Vec<&[Pattern]> = patterns
        .iter()
        .filter_map(|p| match &p.kind {
            PatternKind::Tuple { elements, .. } => Some(elements.as_slice()),
            _ => None,
        })
        .collect();
    if tuple_rows.iter().any(|row| row.iter().all(crate::pattern::is_catch_all)) {
        return Coverage::Exhaustive;
    }
    for (i, elem_ty) in elem_types.iter().enumerate() {
        let column: Vec<&Pattern> = tuple_rows.iter().filter_map(|row| row.get(i)).collect();
        if let Coverage::Missing(detail) = check_exhaustiveness(&column, elem_ty, table) {
            return Coverage::Missing(detail);
        }
    }
    Coverage::Exhaustive
}

fn check_union(patterns: &[&Pattern], members: &[Ty]) -> Coverage {
    let mut missing = Vec::new();
    for member in members {
        let is_nil = member.as_con_name() == Some("Nil");
        let covered = patterns.iter().any(|p| match &p.kind {
            PatternKind::Type { ty, .. } => ty_expr_names_match(ty, member),
            PatternKind::Literal(LiteralPattern::Nil) => is_nil,
            _ => false,
        });
        if !covered {
            missing.push(member.to_string());
        }
    }
    if missing.is_empty() {
        Coverage::Exhaustive
    } else {
        Coverage::Missing(format!("[{}]", missing.join(", ")))
    }
}

fn ty_expr_names_match(ty_expr: &mlc_ast::type_expr::TypeExpr, member: &Ty) -> bool {
    if let mlc_ast::type_expr::TypeExprKind::Name(name) = &ty_expr.kind {
        return member.as_con_name() == Some(name.as_str());
    }
    false
}

fn check_from_shape(patterns: &[&Pattern], table: &SymbolTable) -> Coverage {
    // The scrutinee type never resolved past a bare type variable (e.g. an
    // unannotated parameter); deduce a candidate shape from the patterns
    // themselves rather than refuse to check at all.
    for p in patterns {
        match &p.kind {
            PatternKind::Literal(lit) => {
                let ty = match lit {
                    LiteralPattern::Bool(_) => Ty::bool_ty(),
                    LiteralPattern::Int(_) => return Coverage::Missing("other Int values".to_string()),
                    LiteralPattern::Float(_) => return Coverage::Missing("other Float values".to_string()),
                    LiteralPattern::Char(_) => return Coverage::Missing("other Char values".to_string()),
                    LiteralPattern::Nil => Ty::nil(),
                };
                return check_exhaustiveness(patterns, &ty, table);
            }
            PatternKind::List { .. } => return check_list(patterns, None),
            PatternKind::Constructor { name, .. } => {
                if let Some(sym) = table.find(name) {
                    if let mlc_symbols::SymbolKind::Constructor { owner_type, .. } = sym.kind {
                        return check_adt(patterns, &owner_type, table);
                    }
                }
            }
            _ => {}
        }
    }
    Coverage::Exhaustive
}
