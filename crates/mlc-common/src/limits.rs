//! Centralized limits and thresholds.
//!
//! Mirrors `tsz-common::limits`'s role: a single place to tune recursion
//! guards rather than scattering magic numbers across the crates that need
//! them.

/// Maximum recursion depth for `unify`/`apply` over a single pair of types.
/// Protects against cyclic/self-referential type terms slipping past the
/// occurs-check (e.g. through an adversarially constructed alias chain).
pub const MAX_UNIFY_DEPTH: usize = 256;

/// Maximum recursion depth for the exhaustiveness checker's column-wise
/// specialization. Generic ADTs nested arbitrarily deep would otherwise
/// blow the stack before producing a diagnostic.
pub const MAX_EXHAUSTIVENESS_DEPTH: usize = 128;

/// Maximum number of fresh type variables a single `analyze` call may mint
/// before it is considered runaway (e.g. an accidental infinite loop in a
/// recursive instantiation). Not a hard error — just the `TyVarGen` starting
/// point at which callers may want to bail out early in tests.
pub const MAX_FRESH_VARS_HINT: usize = 1_000_000;
