//! Structured diagnostics for the semantic analysis core.
//!
//! Diagnostics are never raised as panics for expected failures — every
//! component that can fail returns `(result, diagnostics)` or pushes into a
//! shared diagnostic sink. Diagnostics are deduplicated by `(line, col, code)`
//! and sorted by position before being handed back from `analyze`.

use crate::span::Span;

/// Reserved error codes for the core (spec.md §6).
pub mod codes {
    /// Undeclared variable.
    pub const UNDECLARED_VARIABLE: &str = "A001";
    /// Undeclared type.
    pub const UNDECLARED_TYPE: &str = "A002";
    /// Type error: catch-all for unification and semantic failures.
    pub const TYPE_ERROR: &str = "A003";
    /// Redefinition of an existing (non-pending) name.
    pub const REDEFINITION: &str = "A004";
    /// Assignment type mismatch.
    pub const ASSIGNMENT_MISMATCH: &str = "A005";
    /// Undefined symbol (identifier lookup failed).
    pub const UNDEFINED_SYMBOL: &str = "A006";
    /// Non-exhaustive match.
    pub const NON_EXHAUSTIVE: &str = "A007";
    /// Naming-convention violation.
    pub const NAMING_CONVENTION: &str = "A008";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: &'static str,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn error(code: &'static str, span: Span, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            span,
            message: message.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// `(line, col)` sort/dedup key using a 0-sized placeholder for files
    /// with no source text available (tests construct `Program`s directly
    /// rather than parsing source, per spec.md's "parsing is out of scope").
    #[must_use]
    pub fn dedup_key(&self) -> (u32, u32, &'static str) {
        (self.span.start, self.span.end, self.code)
    }
}

/// Deduplicate by `(start, end, code)` and sort by position, matching
/// spec.md §3's "Deduplicated per (line, column, code) … sorted by position".
#[must_use]
pub fn finalize(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by_key(|d| (d.span.start, d.span.end, d.code));
    diagnostics.dedup_by_key(|d| d.dedup_key());
    diagnostics
}

/// Format a message template by replacing `{0}`, `{1}`, … with `args`,
/// matching `tsz-common::diagnostics::format_message`'s convention.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_dedups_same_position_and_code() {
        let d1 = Diagnostic::error(codes::TYPE_ERROR, Span::new(0, 3), "first");
        let d2 = Diagnostic::error(codes::TYPE_ERROR, Span::new(0, 3), "second");
        let out = finalize(vec![d1, d2]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "first");
    }

    #[test]
    fn finalize_sorts_by_position() {
        let a = Diagnostic::error(codes::TYPE_ERROR, Span::new(10, 12), "later");
        let b = Diagnostic::error(codes::TYPE_ERROR, Span::new(0, 2), "earlier");
        let out = finalize(vec![a, b]);
        assert_eq!(out[0].message, "earlier");
        assert_eq!(out[1].message, "later");
    }

    #[test]
    fn format_message_substitutes_positional_args() {
        let msg = format_message("Missing cases: {0}", &["None"]);
        assert_eq!(msg, "Missing cases: None");
    }
}
