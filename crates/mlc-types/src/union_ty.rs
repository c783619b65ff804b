//! Union normalization (spec.md §3 invariant: flattened, deduplicated,
//! insertion-order-stable, collapsing singletons).

use crate::ty::{Ty, TyKind};

/// Builds the normalized form of a union of `members`:
/// - nested unions are flattened into the outer one
/// - duplicate members (by structural/string form) are removed, keeping
///   the first occurrence's position
/// - a union with exactly one distinct member collapses to that member
/// - an empty union is not representable; callers must never construct one
#[must_use]
pub fn normalize_union(members: Vec<Ty>) -> Ty {
    let mut flat = Vec::with_capacity(members.len());
    flatten_into(members, &mut flat);

    let mut seen = std::collections::HashSet::new();
    let mut deduped = Vec::with_capacity(flat.len());
    for member in flat {
        let key = member.to_string();
        if seen.insert(key) {
            deduped.push(member);
        }
    }

    match deduped.len() {
        0 => unreachable!("normalize_union called with no members"),
        1 => deduped.into_iter().next().unwrap(),
        _ => Ty::new_union_unchecked(deduped),
    }
}

fn flatten_into(members: Vec<Ty>, out: &mut Vec<Ty>) {
    for member in members {
        match member.kind() {
            TyKind::Union(nested) => flatten_into(nested.clone(), out),
            _ => out.push(member),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_union_collapses() {
        let u = normalize_union(vec![Ty::int()]);
        assert_eq!(u, Ty::int());
    }

    #[test]
    fn duplicates_are_removed_preserving_order() {
        let u = normalize_union(vec![Ty::int(), Ty::bool_ty(), Ty::int()]);
        assert_eq!(u.to_string(), "Int | Bool");
    }

    #[test]
    fn nested_unions_flatten() {
        let inner = normalize_union(vec![Ty::bool_ty(), Ty::char_ty()]);
        let outer = normalize_union(vec![Ty::int(), inner]);
        assert_eq!(outer.to_string(), "Int | Bool | Char");
    }
}
