//! Substitutions: `apply` and `compose` (spec.md §4.2).

use crate::ty::{Ty, TyKind};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// A finite mapping from type variable name to replacement type.
#[derive(Clone, Debug, Default)]
pub struct Subst(FxHashMap<String, Ty>);

impl Subst {
    #[must_use]
    pub fn empty() -> Self {
        Self(FxHashMap::default())
    }

    #[must_use]
    pub fn single(var: impl Into<String>, ty: Ty) -> Self {
        let mut map = FxHashMap::default();
        map.insert(var.into(), ty);
        Self(map)
    }

    pub fn insert(&mut self, var: impl Into<String>, ty: Ty) {
        self.0.insert(var.into(), ty);
    }

    #[must_use]
    pub fn get(&self, var: &str) -> Option<&Ty> {
        self.0.get(var)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Ty)> {
        self.0.iter()
    }

    /// Capture-free application: substitutes every free variable in `ty`
    /// with its mapping, recursing through every `TyKind` variant including
    /// an alias's `underlying` slot, so an aliased type stays consistent
    /// with its structural form after substitution.
    #[must_use]
    pub fn apply(&self, ty: &Ty) -> Ty {
        if self.0.is_empty() {
            return ty.clone();
        }
        match ty.kind() {
            TyKind::Var(name) => self.0.get(name).cloned().unwrap_or_else(|| ty.clone()),
            TyKind::Con { name, module, underlying } => {
                let new_underlying = underlying.as_ref().map(|u| self.apply(u));
                match (&new_underlying, underlying) {
                    (Some(new_u), Some(old_u)) if new_u == old_u => ty.clone(),
                    (None, None) => ty.clone(),
                    _ => Ty::con_full(name.clone(), module.clone(), new_underlying),
                }
            }
            TyKind::App { constructor, args } => {
                let new_constructor = self.apply(constructor);
                let new_args: Vec<Ty> = args.iter().map(|a| self.apply(a)).collect();
                Ty::app(new_constructor, new_args)
            }
            TyKind::Func { params, ret, variadic, default_count, constraints } => {
                let new_params = params.iter().map(|p| self.apply(p)).collect();
                let new_ret = self.apply(ret);
                Ty::func(new_params, new_ret, *variadic, *default_count, constraints.clone())
            }
            TyKind::Tuple(elems) => Ty::tuple(elems.iter().map(|e| self.apply(e)).collect()),
            TyKind::Record { fields, is_open } => {
                let new_fields: IndexMap<String, Ty> =
                    fields.iter().map(|(k, v)| (k.clone(), self.apply(v))).collect();
                Ty::record(new_fields, *is_open)
            }
            TyKind::Union(members) => Ty::union(members.iter().map(|m| self.apply(m)).collect()),
            TyKind::Type(inner) => Ty::type_of(self.apply(inner)),
        }
    }

    /// `(self ∘ s1)(x) = self(s1(x))`: applies `s1` first, then `self`'s
    /// bindings to the result, and finally folds in `self`'s own bindings
    /// for variables `s1` did not touch.
    #[must_use]
    pub fn compose(&self, s1: &Subst) -> Subst {
        let mut result: FxHashMap<String, Ty> =
            s1.0.iter().map(|(k, v)| (k.clone(), self.apply(v))).collect();
        for (k, v) in &self.0 {
            result.entry(k.clone()).or_insert_with(|| v.clone());
        }
        Subst(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_substitutes_free_variable() {
        let s = Subst::single("t0", Ty::int());
        assert_eq!(s.apply(&Ty::var("t0")), Ty::int());
        assert_eq!(s.apply(&Ty::list(Ty::var("t0"))), Ty::list(Ty::int()));
    }

    #[test]
    fn compose_applies_outer_after_inner() {
        let s1 = Subst::single("t0", Ty::var("t1"));
        let s2 = Subst::single("t1", Ty::int());
        let composed = s2.compose(&s1);
        assert_eq!(composed.apply(&Ty::var("t0")), Ty::int());
    }

    #[test]
    fn apply_preserves_alias_underlying() {
        let alias = Ty::con_full("Box", None, Some(Ty::var("t0")));
        let s = Subst::single("t0", Ty::int());
        let applied = s.apply(&alias);
        assert_eq!(applied.resolve_alias(), Ty::int());
    }
}
