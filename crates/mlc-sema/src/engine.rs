//! The two-pass analysis driver and the syntax-directed `infer` dispatcher
//! (spec.md §4.2, §4.3, §5).

use crate::context::InferenceContext;
use crate::dispatch::{dispatch_binary, dispatch_null_coalesce, operator_as_function};
use crate::module::ModuleLoader;
use crate::type_build::build_type;
use mlc_ast::expr::{Expr, ExprKind};
use mlc_ast::stmt::{FunctionStatement, ImportStatement, Program, StmtKind, TypeDeclarationKind, VariantDecl};
use mlc_common::diag::codes;
use mlc_common::Span;
use mlc_symbols::{SymbolTable, TraitInfo, VariantInfo};
use mlc_types::{unify, unify_allow_extra, Kind, Scheme, Subst, Ty};

/// Dispatches inference over a single expression node, recording its
/// resolved type into `ctx` before returning it.
pub fn infer(expr: &Expr, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (ty, subst) = infer_uncached(expr, table, ctx);
    ctx.record_type(expr.id, ty.clone());
    (ty, subst)
}

fn infer_uncached(expr: &Expr, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    match &expr.kind {
        ExprKind::Identifier(name) => crate::expr::infer_identifier(name, expr.span, table, ctx),
        ExprKind::IntLiteral(_) => (Ty::int(), Subst::empty()),
        ExprKind::FloatLiteral(_) => (Ty::float(), Subst::empty()),
        ExprKind::BigIntLiteral(_) => (Ty::bigint(), Subst::empty()),
        ExprKind::RationalLiteral { .. } => (Ty::rational(), Subst::empty()),
        ExprKind::BoolLiteral(_) => (Ty::bool_ty(), Subst::empty()),
        ExprKind::CharLiteral(_) => (Ty::char_ty(), Subst::empty()),
        ExprKind::StringLiteral(_) => (Ty::string(), Subst::empty()),
        ExprKind::InterpolatedString(parts) => crate::expr::infer_interpolated_string(parts, table, ctx),
        ExprKind::BytesLiteral(_) => (Ty::bytes(), Subst::empty()),
        ExprKind::BitsLiteral(_) => (Ty::bits(), Subst::empty()),
        ExprKind::NilLiteral => (Ty::nil(), Subst::empty()),

        ExprKind::ListLiteral(elements) => crate::expr::infer_list_literal(elements, expr.span, table, ctx),
        ExprKind::MapLiteral(entries) => crate::expr::infer_map_literal(entries, expr.span, table, ctx),
        ExprKind::TupleLiteral(elements) => crate::expr::infer_tuple_literal(elements, table, ctx),
        ExprKind::RecordLiteral { fields, spread_base } => {
            crate::expr::infer_record_literal(fields, spread_base.as_deref(), table, ctx)
        }

        ExprKind::If { condition, consequence, alternative } => {
            crate::control_flow::infer_if(condition, consequence, alternative.as_deref(), table, ctx)
        }
        ExprKind::For { binding, iterable_or_condition, body } => {
            crate::control_flow::infer_for(binding.as_ref(), iterable_or_condition, body, table, ctx)
        }
        ExprKind::Match { scrutinee, arms } => crate::control_flow::infer_match(scrutinee, arms, expr.span, table, ctx),
        ExprKind::Block(stmts) => crate::control_flow::infer_block(stmts, table, ctx),

        ExprKind::Break(value) => crate::control_flow::infer_break(value.as_deref(), table, ctx),
        ExprKind::Continue => crate::control_flow::infer_continue(),

        ExprKind::Assign { target, value } => infer_assign(target, value, expr.span, table, ctx),
        ExprKind::PatternAssign { pattern, value } => infer_pattern_assign(pattern, value, table, ctx),
        ExprKind::Annotated { expr: inner, ty } => infer_annotated(inner, ty, expr.span, table, ctx),

        ExprKind::Prefix { op, expr: operand } => infer_prefix(op, operand, expr.span, table, ctx),
        ExprKind::Infix { op, left, right } => infer_infix(op, left, right, expr.span, table, ctx),
        ExprKind::Postfix { op, expr: operand } => infer_postfix(op, operand, table, ctx),

        ExprKind::Call { callee, args } => crate::call::infer_call(callee, args, expr.span, table, ctx),
        ExprKind::TypeApplication { callee, type_args } => infer_type_application(callee, type_args, table, ctx),
        ExprKind::FunctionLiteral { type_params, params, return_ty, body } => {
            infer_function_literal(type_params, params, return_ty.as_ref(), body, table, ctx)
        }
        ExprKind::Spread(inner) => infer(inner, table, ctx),
        ExprKind::Member { receiver, field, optional } => {
            crate::member::infer_member(receiver, field, *optional, expr.span, table, ctx)
        }
        ExprKind::Index { receiver, index } => crate::member::infer_index(receiver, index, expr.span, table, ctx),
        ExprKind::OperatorAsFunction(op) => (operator_as_function(op, table, ctx), Subst::empty()),
    }
}

fn infer_assign(target: &Expr, value: &Expr, span: mlc_common::Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    if let ExprKind::Identifier(name) = &target.kind {
        if table.find(name).is_some_and(|sym| sym.is_constant()) {
            ctx.error(codes::REDEFINITION, span, format!("`{name}` is a constant and cannot be reassigned"));
        }
    }
    let (target_ty, s0) = infer(target, table, ctx);
    let (value_ty, s1) = infer(value, table, ctx);
    let subst = s1.compose(&s0);
    if let Err(e) = unify(&subst.apply(&target_ty), &subst.apply(&value_ty)) {
        ctx.error(codes::ASSIGNMENT_MISMATCH, span, e.to_string());
    }
    (Ty::nil(), subst)
}

fn infer_pattern_assign(pattern: &mlc_ast::pattern::Pattern, value: &Expr, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (value_ty, s0) = infer(value, table, ctx);
    let s1 = crate::pattern::infer_pattern(pattern, &s0.apply(&value_ty), table, ctx);
    (Ty::nil(), s1.compose(&s0))
}

fn infer_annotated(inner: &Expr, ty: &mlc_ast::type_expr::TypeExpr, span: mlc_common::Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (inner_ty, subst) = infer(inner, table, ctx);
    let built = build_type(ty, table);
    match unify_allow_extra(&built, &subst.apply(&inner_ty)) {
        Ok(s) => (built, s.compose(&subst)),
        Err(e) => {
            ctx.error(codes::TYPE_ERROR, span, format!("annotation does not match inferred type: {e}"));
            (built, subst)
        }
    }
}

fn infer_prefix(op: &str, operand: &Expr, span: mlc_common::Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let (operand_ty, subst) = infer(operand, table, ctx);
    let resolved = subst.apply(&operand_ty);
    match op {
        "!" => {
            if let Err(e) = unify(&resolved, &Ty::bool_ty()) {
                ctx.error(codes::TYPE_ERROR, span, format!("`!` requires Bool: {e}"));
            }
            (Ty::bool_ty(), subst)
        }
        "-" | "+" => (resolved, subst),
        "~" => (resolved, subst),
        _ => {
            ctx.internal_error(span, format!("unknown prefix operator `{op}`"));
            (ctx.fresh(), subst)
        }
    }
}

/// The surface grammar carries a `PostfixExpression` node family, but no
/// postfix operator is defined over the type system (spec.md's inbound node
/// list names it without assigning semantics) — it type-checks as identity
/// over its operand.
fn infer_postfix(_op: &str, operand: &Expr, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    infer(operand, table, ctx)
}

fn infer_infix(op: &str, left: &Expr, right: &Expr, span: mlc_common::Span, table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    match op {
        "&&" | "||" => {
            let (left_ty, s0) = infer(left, table, ctx);
            let (right_ty, s1) = infer(right, table, ctx);
            let mut subst = s1.compose(&s0);
            for (ty, e) in [(&left_ty, left), (&right_ty, right)] {
                if let Err(err) = unify(&subst.apply(ty), &Ty::bool_ty()) {
                    ctx.error(codes::TYPE_ERROR, e.span, format!("`{op}` requires Bool: {err}"));
                }
            }
            (Ty::bool_ty(), subst)
        }
        "??" => {
            let (left_ty, s0) = infer(left, table, ctx);
            let (right_ty, s1) = infer(right, table, ctx);
            let subst = s1.compose(&s0);
            let (ty, s2) = dispatch_null_coalesce(&subst.apply(&left_ty), &subst.apply(&right_ty), table, ctx, span);
            (ty, s2.compose(&subst))
        }
        "::" => {
            let (head_ty, s0) = infer(left, table, ctx);
            let (tail_ty, s1) = infer(right, table, ctx);
            let mut subst = s1.compose(&s0);
            let list_ty = Ty::list(subst.apply(&head_ty));
            match unify(&subst.apply(&tail_ty), &list_ty) {
                Ok(s) => {
                    subst = s.compose(&subst);
                    (subst.apply(&list_ty), subst)
                }
                Err(e) => {
                    ctx.error(codes::TYPE_ERROR, span, format!("`::` requires a matching List tail: {e}"));
                    (list_ty, subst)
                }
            }
        }
        "++" => {
            let (left_ty, s0) = infer(left, table, ctx);
            let (right_ty, s1) = infer(right, table, ctx);
            let mut subst = s1.compose(&s0);
            let left_resolved = subst.apply(&left_ty).resolve_alias();
            match unify(&subst.apply(&right_ty), &left_resolved) {
                Ok(s) => {
                    subst = s.compose(&subst);
                    (subst.apply(&left_resolved), subst)
                }
                Err(_) => {
                    ctx.error(codes::TYPE_ERROR, span, format!("right operand of ++ must be {left_resolved}"));
                    (left_resolved, subst)
                }
            }
        }
        _ => {
            let (left_ty, s0) = infer(left, table, ctx);
            let (right_ty, s1) = infer(right, table, ctx);
            let subst = s1.compose(&s0);
            let result = dispatch_binary(op, &subst.apply(&left_ty), &subst.apply(&right_ty), table, ctx, span);
            (result, subst)
        }
    }
}

/// `name<Args>` — explicit instantiation of a polymorphic value or
/// constructor. When `callee` names a scheme directly in scope, its
/// parameters are substituted positionally with `type_args` rather than
/// with fresh variables; any other callee shape just falls back to ordinary
/// inference (there is nothing generic left to apply explicit args to).
fn infer_type_application(callee: &Expr, type_args: &[mlc_ast::type_expr::TypeExpr], table: &SymbolTable, ctx: &mut InferenceContext) -> (Ty, Subst) {
    let built_args: Vec<Ty> = type_args.iter().map(|t| build_type(t, table)).collect();

    if let mlc_ast::expr::ExprKind::Identifier(name) = &callee.kind {
        if let Some(sym) = table.find(name) {
            let scheme = match sym.kind {
                mlc_symbols::SymbolKind::Value(s) | mlc_symbols::SymbolKind::Constructor { scheme: s, .. } => Some(s),
                _ => None,
            };
            if let Some(scheme) = scheme {
                let mut subst = Subst::empty();
                for (param, arg) in scheme.params.iter().zip(built_args.iter()) {
                    subst.insert(param.clone(), arg.clone());
                }
                for param in scheme.params.iter().skip(built_args.len()) {
                    subst.insert(param.clone(), ctx.fresh());
                }
                return (subst.apply(&scheme.ty), Subst::empty());
            }
        }
    }

    infer(callee, table, ctx)
}

fn infer_function_literal(
    type_params: &[String],
    params: &[mlc_ast::expr::Param],
    return_ty: Option<&mlc_ast::type_expr::TypeExpr>,
    body: &Expr,
    table: &SymbolTable,
    ctx: &mut InferenceContext,
) -> (Ty, Subst) {
    let lambda_scope = table.new_enclosed();
    bind_type_params(type_params, &lambda_scope, ctx);

    let mut param_tys = Vec::with_capacity(params.len());
    let mut variadic = false;
    let mut default_count = 0;
    for param in params {
        let ty = match &param.ty {
            Some(t) => build_type(t, &lambda_scope),
            None => ctx.fresh(),
        };
        if param.variadic {
            variadic = true;
        }
        if param.default.is_some() {
            default_count += 1;
        }
        let bound_ty = if param.variadic { Ty::list(ty.clone()) } else { ty.clone() };
        let _ = lambda_scope.define_value(&param.name, Scheme::monomorphic(bound_ty));
        param_tys.push(ty);
    }

    let (body_ty, subst) = infer(body, &lambda_scope, ctx);
    let body_ty = subst.apply(&body_ty);
    let param_tys: Vec<Ty> = param_tys.iter().map(|t| subst.apply(t)).collect();

    let ret_ty = match return_ty {
        Some(t) => {
            let built = build_type(t, &lambda_scope);
            if let Err(e) = unify(&built, &body_ty) {
                ctx.error(codes::TYPE_ERROR, body.span, format!("function body does not match declared return type: {e}"));
            }
            built
        }
        None => body_ty,
    };

    (Ty::func(param_tys, ret_ty, variadic, default_count, vec![]), subst)
}

/// Binds each name in `type_params` as a type alias for a fresh type
/// variable in `scope`, so `build_type` resolves a bare generic name (e.g.
/// `T`) to a variable rather than treating it as an undeclared nominal type.
fn bind_type_params(type_params: &[String], scope: &SymbolTable, ctx: &mut InferenceContext) {
    for tp in type_params {
        let fresh_name = ctx.tyvars.fresh_name();
        let _ = scope.define_type_alias(tp, Kind::Star, Ty::var(fresh_name));
    }
}

/// Infers and generalizes a top-level (or instance-method) function
/// declaration. Unlike a lambda literal, a named function generalizes over
/// every type variable free in its inferred type (spec.md §4.2): there is no
/// enclosing monomorphic binding to restrict it against.
pub fn infer_function(stmt: &FunctionStatement, table: &SymbolTable, ctx: &mut InferenceContext) -> Scheme {
    let fn_scope = table.new_enclosed();
    bind_type_params(&stmt.type_params, &fn_scope, ctx);

    let mut param_tys = Vec::with_capacity(stmt.params.len());
    let mut variadic = false;
    let mut default_count = 0;
    for param in &stmt.params {
        let ty = match &param.ty {
            Some(t) => build_type(t, &fn_scope),
            None => ctx.fresh(),
        };
        if param.variadic {
            variadic = true;
        }
        if param.default.is_some() {
            default_count += 1;
        }
        let bound_ty = if param.variadic { Ty::list(ty.clone()) } else { ty.clone() };
        let _ = fn_scope.define_value(&param.name, Scheme::monomorphic(bound_ty));
        param_tys.push(ty);
    }

    let (body_ty, subst) = infer(&stmt.body, &fn_scope, ctx);
    let body_ty = subst.apply(&body_ty);
    let param_tys: Vec<Ty> = param_tys.iter().map(|t| subst.apply(t)).collect();

    let ret_ty = match &stmt.return_ty {
        Some(t) => {
            let built = build_type(t, &fn_scope);
            if let Err(e) = unify(&built, &body_ty) {
                ctx.error(
                    codes::TYPE_ERROR,
                    stmt.body.span,
                    format!("function `{}` body does not match declared return type: {e}", stmt.name),
                );
            }
            built
        }
        None => body_ty,
    };

    let func_ty = Ty::func(param_tys, ret_ty, variadic, default_count, vec![]);
    let mut params: Vec<String> = mlc_types::ftv::free_vars(&func_ty).into_iter().collect();
    params.sort();
    Scheme { params, ty: func_ty }
}

/// Pass 1 (spec.md §5): pre-registers every top-level name so mutually
/// recursive declarations resolve regardless of source order, then resolves
/// as much of each signature as annotations allow.
pub fn analyze_headers(program: &Program, table: &SymbolTable, ctx: &mut InferenceContext, loader: &mut dyn ModuleLoader) {
    for stmt in &program.stmts {
        match &stmt.kind {
            StmtKind::Function(f) => register_function_header(f, stmt.span, table, ctx),
            StmtKind::Constant(c) => register_constant_header(c, stmt.span, table, ctx),
            StmtKind::TypeDecl(t) => register_type_decl(t, table, ctx),
            StmtKind::TraitDecl(t) => register_trait_header(t, table, ctx),
            StmtKind::Import(imp) => import_headers(imp, stmt.span, table, ctx, loader),
            StmtKind::InstanceDecl(_) | StmtKind::Expression(_) | StmtKind::Package(_) => {}
        }
    }
}

/// Resolves an `import` during Pass 1 (spec.md §4.3 Pass 1, §6 module
/// loader). A selective import merges each named export into the current
/// scope, preserving the source module as `origin_module`; a whole-module
/// import binds a module alias instead, so member access goes through
/// `pkg.name` rather than flattening every export into scope.
fn import_headers(imp: &ImportStatement, span: Span, table: &SymbolTable, ctx: &mut InferenceContext, loader: &mut dyn ModuleLoader) {
    let Some(handle) = loader.get_module(&imp.path).or_else(|| loader.get_module_by_package_name(&imp.path)) else {
        ctx.error(codes::UNDEFINED_SYMBOL, span, format!("cannot resolve module `{}`", imp.path));
        return;
    };
    if handle.headers_analyzing() {
        // Mutually recursive import: the other module's header pass is
        // already running further up the call stack. Nothing to merge yet.
        return;
    }

    let module_name = handle.name().to_string();
    let foreign = handle.symbol_table();
    let exports = handle.exports().clone();

    match &imp.selective {
        Some(items) => {
            for item in items {
                if !exports.contains(&item.name) {
                    ctx.error(codes::UNDEFINED_SYMBOL, span, format!("module `{module_name}` does not export `{}`", item.name));
                    continue;
                }
                let Some(sym) = foreign.find(&item.name) else { continue };
                let local_name = item.alias.as_deref().unwrap_or(&item.name);
                if let Err(e) = table.define_imported(local_name, sym.kind, &module_name) {
                    ctx.error(codes::REDEFINITION, span, e.to_string());
                }
            }
        }
        None => {
            let alias = imp.alias.as_deref().unwrap_or(&module_name);
            if let Err(e) = table.register_module_alias(alias, &module_name) {
                ctx.error(codes::REDEFINITION, span, e.to_string());
            }
        }
    }
}

fn register_function_header(f: &FunctionStatement, span: mlc_common::Span, table: &SymbolTable, ctx: &mut InferenceContext) {
    if table.define_pending(&f.name).is_err() {
        ctx.error(codes::REDEFINITION, span, format!("`{}` is already declared", f.name));
        return;
    }
    let sig_scope = table.new_enclosed();
    bind_type_params(&f.type_params, &sig_scope, ctx);
    let params: Vec<Ty> = f
        .params
        .iter()
        .map(|p| match &p.ty {
            Some(t) => {
                let built = build_type(t, &sig_scope);
                if p.variadic { Ty::list(built) } else { built }
            }
            None => ctx.fresh(),
        })
        .collect();
    let variadic = f.params.last().is_some_and(|p| p.variadic);
    let default_count = f.params.iter().filter(|p| p.default.is_some()).count();
    let ret = f.return_ty.as_ref().map_or_else(|| ctx.fresh(), |t| build_type(t, &sig_scope));
    let func_ty = Ty::func(params, ret, variadic, default_count, vec![]);
    let mut scheme_params: Vec<String> = mlc_types::ftv::free_vars(&func_ty).into_iter().collect();
    scheme_params.sort();
    table.resolve_pending(&f.name, Scheme { params: scheme_params, ty: func_ty });
}

fn register_constant_header(c: &mlc_ast::stmt::ConstantDeclaration, span: mlc_common::Span, table: &SymbolTable, ctx: &mut InferenceContext) {
    if table.define_pending(&c.name).is_err() {
        ctx.error(codes::REDEFINITION, span, format!("`{}` is already declared", c.name));
        return;
    }
    if let Some(ty) = &c.ty {
        let built = build_type(ty, table);
        table.resolve_pending_constant(&c.name, Scheme::monomorphic(built));
    }
}

fn register_type_decl(decl: &mlc_ast::stmt::TypeDeclaration, table: &SymbolTable, ctx: &mut InferenceContext) {
    match &decl.kind {
        TypeDeclarationKind::Alias(type_expr) => {
            let scope = table.new_enclosed();
            bind_type_params(&decl.type_params, &scope, ctx);
            let underlying = build_type(type_expr, &scope);
            let kind = arity_kind(decl.type_params.len());
            let _ = table.define_type_alias(&decl.name, kind, underlying);
        }
        TypeDeclarationKind::Adt(variant_decls) => register_adt(&decl.name, &decl.type_params, variant_decls, table, ctx),
    }
}

fn arity_kind(arity: usize) -> Kind {
    (0..arity).fold(Kind::Star, |acc, _| Kind::arrow(Kind::Star, acc))
}

fn register_adt(name: &str, type_params: &[String], variant_decls: &[VariantDecl], table: &SymbolTable, ctx: &mut InferenceContext) {
    let kind = arity_kind(type_params.len());
    let scope = table.new_enclosed();
    bind_type_params(type_params, &scope, ctx);
    let type_param_vars: Vec<String> = type_params
        .iter()
        .map(|tp| scope.resolve_type(tp).resolve_alias().as_var().unwrap_or(tp).to_string())
        .collect();

    if table.define_type_adt(name, kind, Vec::new(), type_param_vars).is_err() {
        ctx.error(codes::REDEFINITION, mlc_common::Span::new(0, 0), format!("type `{name}` is already declared"));
        return;
    }

    let variants: Vec<VariantInfo> = variant_decls
        .iter()
        .map(|v| VariantInfo {
            name: v.name.clone(),
            field_types: v.fields.iter().map(|f| build_type(f, &scope)).collect(),
        })
        .collect();
    table.finalize_type_adt(name, variants.clone());

    let self_ty = if type_params.is_empty() {
        Ty::con(name)
    } else {
        let args: Vec<Ty> = type_params.iter().map(|tp| scope.resolve_type(tp)).collect();
        Ty::app(Ty::con(name), args)
    };

    for variant in &variants {
        let ctor_ty = if variant.field_types.is_empty() {
            self_ty.clone()
        } else {
            Ty::func(variant.field_types.clone(), self_ty.clone(), false, 0, vec![])
        };
        let mut params: Vec<String> = mlc_types::ftv::free_vars(&ctor_ty).into_iter().collect();
        params.sort();
        let scheme = Scheme { params, ty: ctor_ty };
        let _ = table.define_constructor(&variant.name, name, scheme, variant.field_types.len());
    }
}

fn register_trait_header(decl: &mlc_ast::stmt::TraitDeclaration, table: &SymbolTable, ctx: &mut InferenceContext) {
    let scope = table.new_enclosed();
    bind_type_params(&decl.type_params, &scope, ctx);

    let required_methods: Vec<(String, Scheme)> = decl
        .methods
        .iter()
        .map(|m| (m.name.clone(), Scheme::monomorphic(build_type(&m.ty, &scope))))
        .collect();

    let info = TraitInfo {
        type_params: decl.type_params.clone(),
        super_traits: decl.super_traits.clone(),
        required_methods,
        default_methods: Vec::new(),
        operators: decl.operators.clone(),
        is_hkt: trait_is_hkt(decl),
    };
    let _ = table.define_trait(&decl.name, info);
    for op in &decl.operators {
        let _ = table.register_operator_trait(op, &decl.name);
    }
}

/// A trait is higher-kinded when any required method's signature applies
/// its own type parameter to an argument (e.g. `Monad<F>`'s `bind: (F<A>,
/// ...) -> F<B>` applies `F`), rather than using it bare as a value type.
fn trait_is_hkt(decl: &mlc_ast::stmt::TraitDeclaration) -> bool {
    let Some(first_param) = decl.type_params.first() else {
        return false;
    };
    decl.methods.iter().any(|m| type_expr_applies_name(&m.ty, first_param))
}

fn type_expr_applies_name(expr: &mlc_ast::type_expr::TypeExpr, name: &str) -> bool {
    use mlc_ast::type_expr::TypeExprKind;
    match &expr.kind {
        TypeExprKind::App(ctor, args) => ctor == name || args.iter().any(|a| type_expr_applies_name(a, name)),
        TypeExprKind::Func { params, ret, .. } => {
            params.iter().any(|p| type_expr_applies_name(p, name)) || type_expr_applies_name(ret, name)
        }
        TypeExprKind::Tuple(elems) | TypeExprKind::Union(elems) => elems.iter().any(|e| type_expr_applies_name(e, name)),
        TypeExprKind::Record { fields, .. } => fields.iter().any(|(_, t)| type_expr_applies_name(t, name)),
        TypeExprKind::Name(_) => false,
    }
}

/// Pass 2 (spec.md §5): infers every function body, finalizes constants,
/// registers trait default methods, and checks instance declarations.
pub fn analyze_bodies(program: &Program, table: &SymbolTable, ctx: &mut InferenceContext, loader: &mut dyn ModuleLoader) {
    for stmt in &program.stmts {
        match &stmt.kind {
            StmtKind::Function(f) => {
                let scheme = infer_function(f, table, ctx);
                table.resolve_pending(&f.name, scheme);
            }
            StmtKind::Constant(c) => {
                let (value_ty, subst) = infer(&c.value, table, ctx);
                let value_ty = subst.apply(&value_ty);
                let final_ty = match &c.ty {
                    Some(annotated) => {
                        let built = build_type(annotated, table);
                        if let Err(e) = unify(&built, &value_ty) {
                            ctx.error(codes::ASSIGNMENT_MISMATCH, stmt.span, format!("constant `{}` does not match its declared type: {e}", c.name));
                        }
                        built
                    }
                    None => value_ty,
                };
                table.resolve_pending_constant(&c.name, Scheme::monomorphic(final_ty));
            }
            StmtKind::TraitDecl(t) => {
                for default_method in &t.default_methods {
                    let scheme = infer_function(default_method, table, ctx);
                    table.register_trait_default_method(&t.name, &default_method.name, scheme);
                }
            }
            StmtKind::InstanceDecl(decl) => crate::instances::check_instance_declaration(decl, stmt.span, table, ctx),
            StmtKind::Expression(e) => {
                let _ = infer(e, table, ctx);
            }
            StmtKind::Import(imp) => import_bodies(imp, stmt.span, ctx, loader),
            StmtKind::TypeDecl(_) | StmtKind::Package(_) => {}
        }
    }
}

/// Pass 2's half of import resolution: by this point the symbols a Pass 1
/// import merged in are already in `table` (headers and bodies share the
/// same table across both passes), so there is nothing left to merge. This
/// only re-confirms the imported module actually finished its own body
/// analysis, surfacing a cyclic import that never resolved.
fn import_bodies(imp: &ImportStatement, span: Span, ctx: &mut InferenceContext, loader: &mut dyn ModuleLoader) {
    let Some(handle) = loader.get_module(&imp.path).or_else(|| loader.get_module_by_package_name(&imp.path)) else {
        ctx.error(codes::UNDEFINED_SYMBOL, span, format!("cannot resolve module `{}`", imp.path));
        return;
    };
    if !handle.bodies_analyzed() && !handle.bodies_analyzing() {
        ctx.error(codes::UNDEFINED_SYMBOL, span, format!("module `{}` never completed analysis", handle.name()));
    }
}
