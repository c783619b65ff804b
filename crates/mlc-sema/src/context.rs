//! The per-analysis inference context (spec.md §3, "Inference Context").

use mlc_ast::NodeId;
use mlc_common::diag::{codes, Diagnostic};
use mlc_common::{AnalysisOptions, Span};
use mlc_types::{Ty, TyVarGen};
use rustc_hash::FxHashMap;

/// Carries everything that must stay consistent across both analysis
/// passes of a single `analyze` call: the fresh-variable counter (so
/// Headers and Bodies never mint colliding names), the typed-node map, the
/// active-constraint table used while checking a polymorphic function body
/// against its own type parameters, and the accumulated diagnostics.
pub struct InferenceContext {
    pub tyvars: TyVarGen,
    typed_nodes: FxHashMap<NodeId, Ty>,
    constraints: FxHashMap<String, Vec<String>>,
    /// Stack of enclosing loops' accumulated `break` value type, one frame
    /// per nested `for`. `Break` unifies into the top frame; the `for` that
    /// pushed it pops and reads it back once its body has been inferred.
    loop_return_stack: Vec<Option<Ty>>,
    pub diagnostics: Vec<Diagnostic>,
    pub options: AnalysisOptions,
}

impl InferenceContext {
    #[must_use]
    pub fn new(options: AnalysisOptions) -> Self {
        Self {
            tyvars: TyVarGen::new(),
            typed_nodes: FxHashMap::default(),
            constraints: FxHashMap::default(),
            loop_return_stack: Vec::new(),
            diagnostics: Vec::new(),
            options,
        }
    }

    /// Opens a new loop frame for a `for` expression's `break` values.
    pub fn push_loop(&mut self) {
        self.loop_return_stack.push(None);
    }

    /// Closes the innermost loop frame, returning the unified type of every
    /// `break <value>` seen inside it (or `None` if the loop never broke
    /// with a value).
    pub fn pop_loop(&mut self) -> Option<Ty> {
        self.loop_return_stack.pop().flatten()
    }

    /// Records a `break`'s value type into the innermost loop frame,
    /// widening to a union if a prior `break` in the same loop disagreed.
    pub fn record_break(&mut self, ty: Ty) {
        let Some(frame) = self.loop_return_stack.last_mut() else {
            return;
        };
        *frame = Some(match frame.take() {
            None => ty,
            Some(existing) => match mlc_types::unify(&existing, &ty) {
                Ok(_) => existing,
                Err(_) => Ty::union(vec![existing, ty]),
            },
        });
    }

    pub fn fresh(&mut self) -> Ty {
        self.tyvars.fresh()
    }

    /// Records the inferred type of `node`. Insert-only in spirit: a
    /// concrete type already on file is never clobbered by a bare type
    /// variable arriving later from a different inference path (spec.md
    /// §5: "guarded against overwriting an already-resolved type with a
    /// less-resolved one").
    pub fn record_type(&mut self, node: NodeId, ty: Ty) {
        let keep_existing = self.typed_nodes.get(&node).is_some_and(|existing| !existing.is_var() && ty.is_var());
        if !keep_existing {
            self.typed_nodes.insert(node, ty);
        }
    }

    #[must_use]
    pub fn type_of(&self, node: NodeId) -> Option<&Ty> {
        self.typed_nodes.get(&node)
    }

    #[must_use]
    pub fn into_typed_nodes(self) -> FxHashMap<NodeId, Ty> {
        self.typed_nodes
    }

    pub fn add_constraint(&mut self, type_var: &str, trait_name: &str) {
        let entry = self.constraints.entry(type_var.to_string()).or_default();
        if !entry.iter().any(|t| t == trait_name) {
            entry.push(trait_name.to_string());
        }
    }

    #[must_use]
    pub fn constraints_for(&self, type_var: &str) -> &[String] {
        self.constraints.get(type_var).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn has_constraint(&self, type_var: &str, trait_name: &str) -> bool {
        self.constraints_for(type_var).iter().any(|t| t == trait_name)
    }

    pub fn error(&mut self, code: &'static str, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(code, span, message.into()));
    }

    pub fn error_with_hint(&mut self, code: &'static str, span: Span, message: impl Into<String>, hint: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(code, span, message.into()).with_hint(hint.into()));
    }

    /// Reports an internal invariant violation as `A003` rather than
    /// panicking the analysis (spec.md §9, "Exceptions/errors").
    pub fn internal_error(&mut self, span: Span, detail: impl Into<String>) {
        self.error(codes::TYPE_ERROR, span, format!("internal error: {}", detail.into()));
    }
}
