//! Polymorphic type schemes and instantiation (let-generalization).

use crate::subst::Subst;
use crate::ty::Ty;
use crate::tyvar::TyVarGen;

/// A `forall params. ty` scheme produced by generalizing a `let`-bound
/// expression's inferred type over the variables free in it but not in the
/// surrounding environment (spec.md §4.2).
#[derive(Clone, Debug, PartialEq)]
pub struct Scheme {
    pub params: Vec<String>,
    pub ty: Ty,
}

impl Scheme {
    /// A scheme with no quantified parameters — an ordinary monomorphic
    /// type, wrapped so it can live in the same environment slot as a
    /// generalized one.
    #[must_use]
    pub fn monomorphic(ty: Ty) -> Self {
        Self { params: Vec::new(), ty }
    }
}

/// Replaces every quantified parameter in `scheme` with a fresh type
/// variable, yielding a fresh monomorphic instance usable at a particular
/// call site.
#[must_use]
pub fn instantiate(scheme: &Scheme, gen: &mut TyVarGen) -> Ty {
    if scheme.params.is_empty() {
        return scheme.ty.clone();
    }
    let mut subst = Subst::empty();
    for param in &scheme.params {
        subst.insert(param.clone(), gen.fresh());
    }
    subst.apply(&scheme.ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiate_replaces_each_param_with_a_distinct_fresh_var() {
        let scheme = Scheme {
            params: vec!["t0".into()],
            ty: Ty::func(vec![Ty::var("t0")], Ty::var("t0"), false, 0, vec![]),
        };
        let mut gen = TyVarGen::new();
        let instance = instantiate(&scheme, &mut gen);
        assert_eq!(instance.to_string(), "(t0) -> t0");

        let mut gen2 = TyVarGen::new();
        let _ = gen2.fresh();
        let instance2 = instantiate(&scheme, &mut gen2);
        assert_eq!(instance2.to_string(), "(t1) -> t1");
    }

    #[test]
    fn monomorphic_instantiation_is_identity() {
        let scheme = Scheme::monomorphic(Ty::int());
        let mut gen = TyVarGen::new();
        assert_eq!(instantiate(&scheme, &mut gen), Ty::int());
    }
}
