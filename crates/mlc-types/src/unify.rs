//! Unification (spec.md §4.1).

use crate::subst::Subst;
use crate::ty::{Ty, TyKind};
use mlc_common::limits::MAX_UNIFY_DEPTH;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { expected: String, found: String },
    OccursCheck { var: String, ty: String },
    ArityMismatch { expected: usize, found: usize },
    MissingField { field: String, record: String },
    DepthExceeded,
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnifyError::Mismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            UnifyError::OccursCheck { var, ty } => {
                write!(f, "infinite type: {var} occurs in {ty}")
            }
            UnifyError::ArityMismatch { expected, found } => {
                write!(f, "arity mismatch: expected {expected} arguments, found {found}")
            }
            UnifyError::MissingField { field, record } => {
                write!(f, "record {record} has no field `{field}`")
            }
            UnifyError::DepthExceeded => write!(f, "type is too deeply nested to unify"),
        }
    }
}

/// Unifies `a` and `b`, requiring an exact structural match for records
/// (neither side may carry fields the other lacks unless declared open on
/// both sides with identical field sets).
pub fn unify(a: &Ty, b: &Ty) -> Result<Subst, UnifyError> {
    unify_inner(a, b, false, 0)
}

/// Unifies `a` and `b`, allowing width subtyping: if either side is an
/// open record, extra fields present only on the other side are permitted
/// (spec.md §4.1, `UnifyAllowExtra`). Used when checking that an argument's
/// record type satisfies a parameter's open record annotation.
pub fn unify_allow_extra(a: &Ty, b: &Ty) -> Result<Subst, UnifyError> {
    unify_inner(a, b, true, 0)
}

fn unify_inner(a: &Ty, b: &Ty, allow_extra: bool, depth: usize) -> Result<Subst, UnifyError> {
    if depth > MAX_UNIFY_DEPTH {
        return Err(UnifyError::DepthExceeded);
    }

    if a == b {
        return Ok(Subst::empty());
    }

    match (a.kind(), b.kind()) {
        (TyKind::Var(name), _) => bind_var(name, b),
        (_, TyKind::Var(name)) => bind_var(name, a),

        (TyKind::Con { underlying: Some(u), .. }, _) => unify_inner(u, b, allow_extra, depth + 1),
        (_, TyKind::Con { underlying: Some(u), .. }) => unify_inner(a, u, allow_extra, depth + 1),

        (TyKind::Con { name: n1, .. }, TyKind::Con { name: n2, .. }) => {
            if n1 == n2 {
                Ok(Subst::empty())
            } else {
                mismatch(a, b)
            }
        }

        (TyKind::App { constructor: c1, args: a1 }, TyKind::App { constructor: c2, args: a2 }) => {
            if a1.len() != a2.len() {
                return Err(UnifyError::ArityMismatch { expected: a1.len(), found: a2.len() });
            }
            let mut subst = unify_inner(c1, c2, allow_extra, depth + 1)?;
            for (x, y) in a1.iter().zip(a2.iter()) {
                let s = unify_inner(&subst.apply(x), &subst.apply(y), allow_extra, depth + 1)?;
                subst = s.compose(&subst);
            }
            Ok(subst)
        }

        (
            TyKind::Func { params: p1, ret: r1, variadic: v1, default_count: d1, .. },
            TyKind::Func { params: p2, ret: r2, variadic: v2, default_count: d2, .. },
        ) => unify_func(p1, r1, *v1, *d1, p2, r2, *v2, *d2, allow_extra, depth),

        (TyKind::Tuple(e1), TyKind::Tuple(e2)) => {
            if e1.len() != e2.len() {
                return Err(UnifyError::ArityMismatch { expected: e1.len(), found: e2.len() });
            }
            let mut subst = Subst::empty();
            for (x, y) in e1.iter().zip(e2.iter()) {
                let s = unify_inner(&subst.apply(x), &subst.apply(y), allow_extra, depth + 1)?;
                subst = s.compose(&subst);
            }
            Ok(subst)
        }

        (
            TyKind::Record { fields: f1, is_open: open1 },
            TyKind::Record { fields: f2, is_open: open2 },
        ) => unify_records(f1, *open1, f2, *open2, allow_extra, depth, a, b),

        (TyKind::Union(members), _) if !matches!(b.kind(), TyKind::Union(_)) => {
            unify_union_with_member(members, b, allow_extra, depth)
        }
        (_, TyKind::Union(members)) if !matches!(a.kind(), TyKind::Union(_)) => {
            unify_union_with_member(members, a, allow_extra, depth)
        }
        (TyKind::Union(m1), TyKind::Union(m2)) => {
            // Both unions: every member of m2 must unify with some member of m1.
            for y in m2 {
                unify_union_with_member(m1, y, allow_extra, depth)?;
            }
            Ok(Subst::empty())
        }

        (TyKind::Type(i1), TyKind::Type(i2)) => unify_inner(i1, i2, allow_extra, depth + 1),

        _ => mismatch(a, b),
    }
}

#[allow(clippy::too_many_arguments)]
fn unify_func(
    p1: &[Ty],
    r1: &Ty,
    v1: bool,
    d1: usize,
    p2: &[Ty],
    r2: &Ty,
    v2: bool,
    d2: usize,
    allow_extra: bool,
    depth: usize,
) -> Result<Subst, UnifyError> {
    // A variadic or defaulted side may have fewer required parameters than
    // the other; anything beyond the shorter list is only checked pairwise
    // up to the common length, matching the call-site arity rules in
    // spec.md §4.3 rather than requiring identical parameter counts.
    let required1 = p1.len().saturating_sub(d1);
    let required2 = p2.len().saturating_sub(d2);
    let compatible_arity = v1 || v2 || p1.len() == p2.len() || (required1.max(required2) <= p1.len().min(p2.len()));
    if !compatible_arity {
        return Err(UnifyError::ArityMismatch { expected: p1.len(), found: p2.len() });
    }

    let mut subst = Subst::empty();
    for (x, y) in p1.iter().zip(p2.iter()) {
        let s = unify_inner(&subst.apply(x), &subst.apply(y), allow_extra, depth + 1)?;
        subst = s.compose(&subst);
    }
    let s = unify_inner(&subst.apply(r1), &subst.apply(r2), allow_extra, depth + 1)?;
    Ok(s.compose(&subst))
}

#[allow(clippy::too_many_arguments)]
fn unify_records(
    f1: &indexmap::IndexMap<String, Ty>,
    open1: bool,
    f2: &indexmap::IndexMap<String, Ty>,
    open2: bool,
    allow_extra: bool,
    depth: usize,
    a: &Ty,
    b: &Ty,
) -> Result<Subst, UnifyError> {
    let mut subst = Subst::empty();
    for (name, ty1) in f1 {
        match f2.get(name) {
            Some(ty2) => {
                let s = unify_inner(&subst.apply(ty1), &subst.apply(ty2), allow_extra, depth + 1)?;
                subst = s.compose(&subst);
            }
            None => {
                if !open2 {
                    return Err(UnifyError::MissingField { field: name.clone(), record: b.to_string() });
                }
            }
        }
    }
    for name in f2.keys() {
        if !f1.contains_key(name) && !open1 && !allow_extra {
            return Err(UnifyError::MissingField { field: name.clone(), record: a.to_string() });
        }
    }
    Ok(subst)
}

fn unify_union_with_member(members: &[Ty], other: &Ty, allow_extra: bool, depth: usize) -> Result<Subst, UnifyError> {
    for member in members {
        if let Ok(s) = unify_inner(member, other, allow_extra, depth + 1) {
            return Ok(s);
        }
    }
    mismatch(&Ty::union(members.to_vec()), other)
}

fn bind_var(name: &str, ty: &Ty) -> Result<Subst, UnifyError> {
    if let Some(other) = ty.as_var() {
        if other == name {
            return Ok(Subst::empty());
        }
    }
    if occurs(name, ty) {
        return Err(UnifyError::OccursCheck { var: name.to_string(), ty: ty.to_string() });
    }
    Ok(Subst::single(name.to_string(), ty.clone()))
}

fn occurs(name: &str, ty: &Ty) -> bool {
    crate::ftv::free_vars(ty).contains(name)
}

fn mismatch(a: &Ty, b: &Ty) -> Result<Subst, UnifyError> {
    Err(UnifyError::Mismatch { expected: a.to_string(), found: b.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_var_with_concrete_type() {
        let subst = unify(&Ty::var("t0"), &Ty::int()).unwrap();
        assert_eq!(subst.apply(&Ty::var("t0")), Ty::int());
    }

    #[test]
    fn occurs_check_rejects_infinite_type() {
        let t = Ty::var("t0");
        let list_of_t = Ty::list(t.clone());
        assert!(matches!(unify(&t, &list_of_t), Err(UnifyError::OccursCheck { .. })));
    }

    #[test]
    fn mismatched_constructors_fail() {
        assert!(unify(&Ty::int(), &Ty::bool_ty()).is_err());
    }

    #[test]
    fn open_record_allows_extra_fields_on_the_other_side() {
        let mut f1 = indexmap::IndexMap::new();
        f1.insert("x".to_string(), Ty::int());
        let open = Ty::record(f1, true);

        let mut f2 = indexmap::IndexMap::new();
        f2.insert("x".to_string(), Ty::int());
        f2.insert("y".to_string(), Ty::bool_ty());
        let wider = Ty::record(f2, false);

        assert!(unify(&open, &wider).is_ok());
    }

    #[test]
    fn closed_record_rejects_missing_field() {
        let mut f1 = indexmap::IndexMap::new();
        f1.insert("x".to_string(), Ty::int());
        f1.insert("y".to_string(), Ty::bool_ty());
        let closed = Ty::record(f1, false);

        let mut f2 = indexmap::IndexMap::new();
        f2.insert("x".to_string(), Ty::int());
        let smaller = Ty::record(f2, false);

        assert!(unify(&closed, &smaller).is_err());
    }

    #[test]
    fn union_unifies_with_a_matching_member() {
        let u = Ty::union(vec![Ty::int(), Ty::bool_ty()]);
        assert!(unify(&u, &Ty::bool_ty()).is_ok());
    }

    #[test]
    fn type_alias_unifies_with_its_structural_form() {
        let string_ty = Ty::string();
        let list_char = Ty::list(Ty::char_ty());
        assert!(unify(&string_ty, &list_char).is_ok());
    }
}
