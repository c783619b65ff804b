//! Symbol records stored in a [`crate::table::Frame`].

use mlc_types::{Kind, Scheme, Ty};

/// What kind of declaration a symbol names. Distinguished so lookup helpers
/// (`GetVariants`, `GetTypeAlias`, ...) can refuse to answer across kinds —
/// e.g. asking for the variants of a symbol that names a function.
#[derive(Clone, Debug, PartialEq)]
pub enum SymbolKind {
    /// A value binding: a function, constant, or pattern-bound name.
    Value(Scheme),
    /// A nominal type declared with `type Name = V1 | V2 ...` (an ADT).
    /// `type_param_vars` names the fresh type variables (spec.md §4.2's
    /// generalization scheme) that `variants`' field types were built
    /// against, in declaration order, so a parametrized use site (`App`)
    /// can substitute its own type arguments in for them.
    TypeAdt { kind: Kind, variants: Vec<VariantInfo>, type_param_vars: Vec<String> },
    /// A structural alias declared with `type Name = <type expr>`.
    TypeAlias { kind: Kind, underlying: Ty },
    /// A trait declaration.
    Trait(TraitInfo),
    /// A single ADT constructor, callable as a value and usable in pattern
    /// matching (`Constructor` patterns resolve against this).
    Constructor { owner_type: String, scheme: Scheme, field_count: usize },
    /// A symbol that has been pre-registered by the headers pass but whose
    /// signature has not yet been resolved — `Find` returns it, but
    /// inference must not use its scheme until the bodies pass resolves it.
    Pending,
    /// An alias introduced by `import path as alias`, pointing back at the
    /// module it was imported from so cross-module identity is preserved.
    ModuleAlias { target_module: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariantInfo {
    pub name: String,
    pub field_types: Vec<Ty>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct TraitInfo {
    pub type_params: Vec<String>,
    pub super_traits: Vec<String>,
    pub required_methods: Vec<(String, Scheme)>,
    pub default_methods: Vec<(String, Scheme)>,
    pub operators: Vec<String>,
    pub is_hkt: bool,
}

/// A symbol table entry: its kind plus the module that originally declared
/// it, and whether it was bound with `const` (spec.md §3's binding tuple:
/// `(kind, type, origin_module, is_constant, is_pending)`). `origin_module`
/// is preserved across re-exports so two different import paths to the same
/// declaration compare as identical.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub origin_module: Option<String>,
    pub is_constant: bool,
}

impl Symbol {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind, origin_module: Option<String>, is_constant: bool) -> Self {
        Self { name: name.into(), kind, origin_module, is_constant }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.kind, SymbolKind::Pending)
    }

    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.is_constant
    }
}
