//! Free type variable collection.

use crate::scheme::Scheme;
use crate::ty::{Ty, TyKind};
use rustc_hash::FxHashSet;

/// Collects every free (unbound) type variable name occurring in `ty`.
#[must_use]
pub fn free_vars(ty: &Ty) -> FxHashSet<String> {
    let mut out = FxHashSet::default();
    collect(ty, &mut out);
    out
}

/// Free variables of a scheme: those occurring in its body but not among
/// its quantified parameters.
#[must_use]
pub fn free_vars_scheme(scheme: &Scheme) -> FxHashSet<String> {
    let mut vars = free_vars(&scheme.ty);
    for param in &scheme.params {
        vars.remove(param);
    }
    vars
}

/// Free variables of a whole typing environment (used by let-generalization
/// to determine which variables must stay monomorphic, spec.md §4.2).
#[must_use]
pub fn free_vars_env<'a>(schemes: impl Iterator<Item = &'a Scheme>) -> FxHashSet<String> {
    let mut out = FxHashSet::default();
    for scheme in schemes {
        out.extend(free_vars_scheme(scheme));
    }
    out
}

fn collect(ty: &Ty, out: &mut FxHashSet<String>) {
    match ty.kind() {
        TyKind::Var(name) => {
            out.insert(name.clone());
        }
        TyKind::Con { underlying, .. } => {
            if let Some(u) = underlying {
                collect(u, out);
            }
        }
        TyKind::App { constructor, args } => {
            collect(constructor, out);
            for a in args {
                collect(a, out);
            }
        }
        TyKind::Func { params, ret, .. } => {
            for p in params {
                collect(p, out);
            }
            collect(ret, out);
        }
        TyKind::Tuple(elems) => {
            for e in elems {
                collect(e, out);
            }
        }
        TyKind::Record { fields, .. } => {
            for v in fields.values() {
                collect(v, out);
            }
        }
        TyKind::Union(members) => {
            for m in members {
                collect(m, out);
            }
        }
        TyKind::Type(inner) => collect(inner, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_nested_variables() {
        let ty = Ty::func(vec![Ty::var("t0")], Ty::list(Ty::var("t1")), false, 0, vec![]);
        let vars = free_vars(&ty);
        assert!(vars.contains("t0"));
        assert!(vars.contains("t1"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn scheme_excludes_quantified_params() {
        let scheme = Scheme { params: vec!["t0".into()], ty: Ty::func(vec![Ty::var("t0")], Ty::var("t1"), false, 0, vec![]) };
        let vars = free_vars_scheme(&scheme);
        assert!(!vars.contains("t0"));
        assert!(vars.contains("t1"));
    }
}
