//! Analysis-wide configuration.
//!
//! The core has very little to configure — there is no file-loading or CLI
//! surface in scope (spec.md §1). `AnalysisOptions` holds only the knobs the
//! inference engine and pattern engine actually branch on, grounded on the
//! shape of `tsz-common::checker_options::CheckerOptions`.

/// Configuration threaded through a single `analyze` call.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Whether a `Call` with fewer arguments than required (and no variadic
    /// tail) yields a partial-application function type instead of an error.
    /// Defaults to `true` per spec.md §4.3's Call rule.
    pub allow_partial_application: bool,

    /// Guard against pathological union blowup during `NormalizeUnion`.
    /// Unions wider than this are still normalized, but a diagnostic hint is
    /// attached rather than the analysis recursing unbounded.
    pub max_union_members: usize,

    /// Maximum Levenshtein edit distance considered when suggesting a
    /// misspelled identifier for `A001`/`A006`. Spec.md §4.3 fixes this at 2.
    pub suggestion_edit_distance: u8,

    /// Maximum number of suggestions attached to an undefined-symbol hint.
    pub suggestion_limit: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            allow_partial_application: true,
            max_union_members: 64,
            suggestion_edit_distance: 2,
            suggestion_limit: 3,
        }
    }
}
