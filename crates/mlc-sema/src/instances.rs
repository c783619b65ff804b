//! Instance declaration checking (spec.md §4.4).

use crate::context::InferenceContext;
use crate::engine::infer_function;
use crate::type_build::build_type;
use mlc_ast::stmt::InstanceDeclaration;
use mlc_common::diag::codes;
use mlc_common::Span;
use mlc_symbols::{SymbolKind, SymbolTable};
use mlc_types::{unify_allow_extra, Subst};

pub fn check_instance_declaration(decl: &InstanceDeclaration, span: Span, table: &SymbolTable, ctx: &mut InferenceContext) {
    let Some(trait_sym) = table.find(&decl.trait_name) else {
        ctx.error(codes::TYPE_ERROR, span, format!("trait `{}` is not declared", decl.trait_name));
        return;
    };
    let SymbolKind::Trait(trait_info) = trait_sym.kind else {
        ctx.error(codes::TYPE_ERROR, span, format!("`{}` is not a trait", decl.trait_name));
        return;
    };

    let target_ty = build_type(&decl.target, table);
    let Some(target_name) = target_ty.resolve_alias().as_con_name().map(str::to_string) else {
        ctx.internal_error(span, "instance target does not resolve to a nominal type");
        return;
    };

    for super_trait in &trait_info.super_traits {
        if !table.is_implementation_exists(super_trait, &target_name) {
            ctx.error(
                codes::TYPE_ERROR,
                span,
                format!("type `{target_name}` must implement super-trait `{super_trait}` of `{}`", decl.trait_name),
            );
        }
    }

    if trait_info.is_hkt && decl.type_params.is_empty() {
        let kind = table.get_kind(&target_name);
        let is_star = match &kind {
            Some(k) => k.is_star(),
            None => true,
        };
        if is_star {
            ctx.error(
                codes::TYPE_ERROR,
                span,
                format!(
                    "type {target_name} has kind *, but trait {} requires kind * -> *",
                    decl.trait_name
                ),
            );
            return;
        }
    }

    if let Err(e) = table.register_implementation(&decl.trait_name, &target_name) {
        ctx.error(codes::REDEFINITION, span, e.to_string());
        return;
    }

    let implemented: Vec<&str> = decl.methods.iter().map(|m| m.name.as_str()).collect();
    for (method_name, _) in &trait_info.required_methods {
        if !implemented.contains(&method_name.as_str()) {
            ctx.error(
                codes::TYPE_ERROR,
                span,
                format!("instance `{}` for `{target_name}` is missing required method `{method_name}`", decl.trait_name),
            );
        }
    }

    for method in &decl.methods {
        let scheme = infer_function(method, table, ctx);
        if let Some((_, required_scheme)) = trait_info.required_methods.iter().find(|(n, _)| n == &method.name) {
            let instance = mlc_types::instantiate(required_scheme, &mut ctx.tyvars);
            let subst_target = Subst::single(
                trait_info.type_params.first().cloned().unwrap_or_default(),
                target_ty.clone(),
            );
            let expected = subst_target.apply(&instance);
            if let Err(e) = unify_allow_extra(&expected, &scheme.ty) {
                ctx.error(
                    codes::TYPE_ERROR,
                    span,
                    format!("method `{}` of instance `{}` for `{target_name}` does not match the trait signature: {e}", method.name, decl.trait_name),
                );
            }
        }
        table.register_instance_method(&decl.trait_name, &target_name, &method.name, scheme.clone());
        if decl.trait_name == "Optional" && method.name == "unwrap" {
            if let mlc_types::TyKind::Func { ret, .. } = scheme.ty.kind() {
                table.register_optional_unwrap_return(&target_name, ret.clone());
            }
        }
    }
}
