//! Pre-registered primitive kinds, builtin traits, and builtin value
//! bindings installed into the root symbol table before analysis begins
//! (spec.md §3 invariants + §9 Q3).

use mlc_symbols::{SymbolTable, TraitInfo};
use mlc_types::{Kind, Scheme, Ty};

const EQUAL_OPS: &[&str] = &["==", "!="];
const ORDER_OPS: &[&str] = &["<", ">", "<=", ">="];
const NUMERIC_OPS: &[&str] = &["+", "-", "*", "/", "%", "**"];
const BITWISE_OPS: &[&str] = &["&", "|", "^", "<<", ">>"];
const CONCAT_OPS: &[&str] = &["++"];
const SEMIGROUP_OPS: &[&str] = &["<>"];
const MONAD_OPS: &[&str] = &[">>="];
const APPLICATIVE_OPS: &[&str] = &["<*>"];
const FUNCTOR_OPS: &[&str] = &["<$>"];

/// Installs the standing builtins that every analysis starts from. Called
/// once against the freshly created root `SymbolTable`, before Pass 1.
pub fn register_builtins(table: &SymbolTable) {
    register_kinds(table);
    register_traits(table);
    register_primitive_instances(table);
    register_builtin_values(table);
}

fn register_kinds(table: &SymbolTable) {
    table.register_kind("List", Kind::arrow(Kind::Star, Kind::Star));
    table.register_kind("Option", Kind::arrow(Kind::Star, Kind::Star));
    table.register_kind("Map", Kind::arrow(Kind::Star, Kind::arrow(Kind::Star, Kind::Star)));
}

fn register_traits(table: &SymbolTable) {
    let simple = |operators: &[&str]| TraitInfo {
        type_params: vec!["T".to_string()],
        super_traits: Vec::new(),
        required_methods: Vec::new(),
        default_methods: Vec::new(),
        operators: operators.iter().map(|s| s.to_string()).collect(),
        is_hkt: false,
    };

    let _ = table.define_trait("Equal", simple(EQUAL_OPS));
    let _ = table.define_trait("Order", simple(ORDER_OPS));
    let _ = table.define_trait("Numeric", simple(NUMERIC_OPS));
    let _ = table.define_trait("Bitwise", simple(BITWISE_OPS));
    let _ = table.define_trait("Concat", simple(CONCAT_OPS));
    let _ = table.define_trait("Semigroup", simple(SEMIGROUP_OPS));

    let hkt = |operators: &[&str]| TraitInfo {
        type_params: vec!["F".to_string()],
        super_traits: Vec::new(),
        required_methods: Vec::new(),
        default_methods: Vec::new(),
        operators: operators.iter().map(|s| s.to_string()).collect(),
        is_hkt: true,
    };
    let _ = table.define_trait("Monad", hkt(MONAD_OPS));
    let _ = table.define_trait("Applicative", hkt(APPLICATIVE_OPS));
    let _ = table.define_trait("Functor", hkt(FUNCTOR_OPS));
    let _ = table.define_trait("Optional", hkt(&[]));

    for ops in [EQUAL_OPS, ORDER_OPS, NUMERIC_OPS, BITWISE_OPS, CONCAT_OPS, SEMIGROUP_OPS, MONAD_OPS, APPLICATIVE_OPS, FUNCTOR_OPS] {
        let trait_name = trait_name_for_ops(ops);
        for op in ops {
            let _ = table.register_operator_trait(op, trait_name);
        }
    }
}

fn trait_name_for_ops(ops: &[&str]) -> &'static str {
    match ops {
        EQUAL_OPS => "Equal",
        ORDER_OPS => "Order",
        NUMERIC_OPS => "Numeric",
        BITWISE_OPS => "Bitwise",
        CONCAT_OPS => "Concat",
        SEMIGROUP_OPS => "Semigroup",
        MONAD_OPS => "Monad",
        APPLICATIVE_OPS => "Applicative",
        FUNCTOR_OPS => "Functor",
        _ => "Equal",
    }
}

/// The primitive-type instances the core ships with, so ordinary arithmetic
/// and comparison on `Int`/`Float`/etc. dispatch through the trait system
/// exactly like a user instance would (spec.md §4.4's "primitive chain" is
/// the fallback *after* this; registering these up front lets the uniform
/// path handle the common case).
fn register_primitive_instances(table: &SymbolTable) {
    for ty in ["Int", "Float", "BigInt", "Rational"] {
        let _ = table.register_implementation("Numeric", ty);
        let _ = table.register_implementation("Equal", ty);
        let _ = table.register_implementation("Order", ty);
    }
    for ty in ["Bool", "Char"] {
        let _ = table.register_implementation("Equal", ty);
        let _ = table.register_implementation("Order", ty);
    }
    for ty in ["List", "Bytes", "String"] {
        let _ = table.register_implementation("Concat", ty);
        let _ = table.register_implementation("Equal", ty);
    }
    let _ = table.register_implementation("Order", "Bytes");
}

/// `debug`, `trace`, and `typeOf` (spec.md §9, Q3): typed as ordinary
/// polymorphic builtins. The evaluator — out of this core's scope — is
/// expected to give `debug`/`trace` their side-effecting behavior and
/// `typeOf` its runtime type-reflection behavior; this core only commits to
/// their static signatures.
fn register_builtin_values(table: &SymbolTable) {
    let a = Ty::var("t_builtin_a");
    let identity = Scheme { params: vec!["t_builtin_a".to_string()], ty: Ty::func(vec![a.clone()], a, false, 0, vec![]) };
    let _ = table.define_value("debug", identity.clone());
    let _ = table.define_value("trace", identity);

    let b = Ty::var("t_builtin_b");
    let type_of = Scheme {
        params: vec!["t_builtin_b".to_string()],
        ty: Ty::func(vec![Ty::type_of(b.clone())], Ty::type_of(b), false, 0, vec![]),
    };
    let _ = table.define_value("typeOf", type_of);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_instances_are_preregistered() {
        let table = SymbolTable::new();
        register_builtins(&table);
        assert!(table.is_implementation_exists("Numeric", "Int"));
        assert!(table.is_implementation_exists("Equal", "Bool"));
    }

    #[test]
    fn operator_trait_mapping_is_preregistered() {
        let table = SymbolTable::new();
        register_builtins(&table);
        assert_eq!(table.get_trait_for_operator("+").as_deref(), Some("Numeric"));
        assert_eq!(table.get_trait_for_operator("==").as_deref(), Some("Equal"));
    }

    #[test]
    fn list_kind_is_arity_one() {
        let table = SymbolTable::new();
        register_builtins(&table);
        assert_eq!(table.get_kind("List").unwrap().arity(), 1);
    }
}
