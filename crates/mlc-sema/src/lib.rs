//! Inference engine — component C of the semantic analysis core.
//!
//! Drives the two-pass analysis (spec.md §5) over a `Program`: a headers
//! pass that pre-registers every top-level name, then a bodies pass that
//! infers every function body and checks every instance declaration against
//! its trait. [`analyze`] is the sole public entry point.

pub mod builtins;
pub mod call;
pub mod context;
pub mod control_flow;
pub mod dispatch;
pub mod engine;
pub mod exhaustiveness;
pub mod expr;
pub mod instances;
pub mod member;
pub mod module;
pub mod pattern;
pub mod suggest;
pub mod type_build;

pub use context::InferenceContext;
pub use module::{ModuleHandle, ModuleLoader, NullModuleLoader, ReexportSpec};

use mlc_ast::{NodeId, Program};
use mlc_common::diag::finalize;
use mlc_common::{AnalysisOptions, Diagnostic};
use mlc_symbols::SymbolTable;
use mlc_types::Ty;
use rustc_hash::FxHashMap;
use tracing::info_span;

/// Everything a caller gets back from [`analyze`]: every expression node's
/// resolved type, the populated symbol table, and the diagnostics collected
/// across both passes (deduplicated and sorted, spec.md §3).
pub struct AnalysisResult {
    pub typed_nodes: FxHashMap<NodeId, Ty>,
    pub symbol_table: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the full two-pass analysis over `program`. `loader` resolves any
/// cross-module imports the program's `ImportStatement`s name; pass
/// [`NullModuleLoader`] for a self-contained program with no imports.
#[must_use]
pub fn analyze(program: &Program, loader: &mut dyn ModuleLoader, options: AnalysisOptions) -> AnalysisResult {
    let _span = info_span!("analyze", stmts = program.stmts.len()).entered();

    let table = SymbolTable::new();
    builtins::register_builtins(&table);
    let mut ctx = InferenceContext::new(options);

    {
        let _headers = info_span!("analyze_headers").entered();
        engine::analyze_headers(program, &table, &mut ctx, loader);
    }
    {
        let _bodies = info_span!("analyze_bodies").entered();
        engine::analyze_bodies(program, &table, &mut ctx, loader);
    }

    let diagnostics = finalize(std::mem::take(&mut ctx.diagnostics));
    tracing::debug!(diagnostic_count = diagnostics.len(), "analysis complete");

    AnalysisResult {
        typed_nodes: ctx.into_typed_nodes(),
        symbol_table: table,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlc_ast::expr::{Expr, ExprKind};
    use mlc_ast::stmt::{ConstantDeclaration, Stmt, StmtKind};
    use mlc_common::Span;

    fn node(id: u32, kind: ExprKind) -> Expr {
        Expr { id: NodeId(id), span: Span::new(0, 0), kind }
    }

    #[test]
    fn constant_without_annotation_infers_from_value() {
        let program = Program {
            stmts: vec![Stmt {
                id: NodeId(0),
                span: Span::new(0, 0),
                kind: StmtKind::Constant(ConstantDeclaration {
                    name: "answer".to_string(),
                    ty: None,
                    value: node(1, ExprKind::IntLiteral(42)),
                }),
            }],
        };
        let mut loader = NullModuleLoader;
        let result = analyze(&program, &mut loader, AnalysisOptions::default());
        assert!(result.diagnostics.is_empty());
        assert!(result.symbol_table.is_defined("answer"));
    }

    #[test]
    fn undefined_identifier_is_reported() {
        let program = Program {
            stmts: vec![Stmt {
                id: NodeId(0),
                span: Span::new(0, 0),
                kind: StmtKind::Expression(node(1, ExprKind::Identifier("nope".to_string()))),
            }],
        };
        let mut loader = NullModuleLoader;
        let result = analyze(&program, &mut loader, AnalysisOptions::default());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, mlc_common::diag::codes::UNDECLARED_VARIABLE);
    }
}
