//! Type algebra & unification — component A of the semantic analysis core.
//!
//! This crate has no dependency on the symbol table or the inference
//! engine (spec.md §2: "A has no dependencies"). It provides:
//! - [`ty::Ty`] / [`ty::TyKind`] — the type algebra
//! - [`kind::Kind`] — the kind algebra
//! - [`subst::Subst`] — substitutions, `apply`/`compose`
//! - [`tyvar::TyVarGen`] — the fresh-variable counter
//! - [`unify`] — `unify`/`unify_allow_extra`
//! - [`scheme::Scheme`] / `instantiate`
//! - [`ftv`] — free type variable computation
//! - [`union_ty`] — `NormalizeUnion`

pub mod kind;
pub mod ty;
pub mod tyvar;
pub mod subst;
pub mod ftv;
pub mod union_ty;
pub mod scheme;
pub mod unify;

pub use kind::Kind;
pub use scheme::{instantiate, Scheme};
pub use subst::Subst;
pub use ty::{Constraint, Ty, TyKind};
pub use tyvar::TyVarGen;
pub use unify::{unify, unify_allow_extra, UnifyError};
