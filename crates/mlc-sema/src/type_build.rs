//! `BuildType`: turns a parsed `TypeExpr` into a `Ty` against the current
//! symbol table (spec.md §4.3, "Annotated expression").

use indexmap::IndexMap;
use mlc_ast::type_expr::{TypeExpr, TypeExprKind};
use mlc_symbols::SymbolTable;
use mlc_types::Ty;

#[must_use]
pub fn build_type(expr: &TypeExpr, table: &SymbolTable) -> Ty {
    match &expr.kind {
        TypeExprKind::Name(name) => table.resolve_type(name),
        TypeExprKind::App(name, args) => {
            let constructor = table.resolve_type(name);
            let args = args.iter().map(|a| build_type(a, table)).collect();
            Ty::app(constructor, args)
        }
        TypeExprKind::Func { params, ret, variadic, default_count } => {
            let params = params.iter().map(|p| build_type(p, table)).collect();
            let ret = build_type(ret, table);
            Ty::func(params, ret, *variadic, *default_count, vec![])
        }
        TypeExprKind::Tuple(elems) => Ty::tuple(elems.iter().map(|e| build_type(e, table)).collect()),
        TypeExprKind::Record { fields, is_open } => {
            let fields: IndexMap<String, Ty> = fields.iter().map(|(name, ty)| (name.clone(), build_type(ty, table))).collect();
            Ty::record(fields, *is_open)
        }
        TypeExprKind::Union(members) => Ty::union(members.iter().map(|m| build_type(m, table)).collect()),
    }
}
