//! The public symbol table API used by the inference engine.

use crate::error::SymbolError;
use crate::frame::{self, Frame};
use crate::registry::Registry;
use crate::symbol::{Symbol, SymbolKind, TraitInfo, VariantInfo};
use mlc_types::{Kind, Scheme, Ty};
use std::cell::RefCell;
use std::rc::Rc;

/// A scoped symbol table: a chain of [`Frame`]s for lexical lookup, plus a
/// shared [`Registry`] for the cross-cutting trait/instance/kind data that
/// isn't scoped to any one frame. Cloning a `SymbolTable` clones the handle,
/// not the scope chain — `new_enclosed` is the only way to get a child scope.
#[derive(Clone)]
pub struct SymbolTable {
    frame: Rc<RefCell<Frame>>,
    registry: Rc<RefCell<Registry>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self { frame: Frame::root(), registry: Rc::new(RefCell::new(Registry::new())) }
    }

    /// Opens a new child scope sharing this table's registry. The returned
    /// table is independent for lexical lookups (`Define` in the child does
    /// not leak back to the parent) but shares trait/instance/kind state.
    #[must_use]
    pub fn new_enclosed(&self) -> Self {
        Self { frame: Frame::child_of(&self.frame), registry: Rc::clone(&self.registry) }
    }

    fn define(&self, name: &str, kind: SymbolKind, origin_module: Option<String>, is_constant: bool) -> Result<(), SymbolError> {
        if frame::is_defined_in_current(&self.frame, name) {
            return Err(SymbolError::Redefinition { name: name.to_string() });
        }
        self.frame
            .borrow_mut()
            .symbols
            .insert(name.to_string(), Symbol::new(name, kind, origin_module, is_constant));
        Ok(())
    }

    pub fn define_value(&self, name: &str, scheme: Scheme) -> Result<(), SymbolError> {
        self.define(name, SymbolKind::Value(scheme), None, false)
    }

    /// Defines a `const` binding (spec.md §4.2): identical to `define_value`
    /// except the resulting symbol is marked constant, so `infer_assign`
    /// refuses to reassign it.
    pub fn define_constant(&self, name: &str, scheme: Scheme) -> Result<(), SymbolError> {
        self.define(name, SymbolKind::Value(scheme), None, true)
    }

    pub fn define_value_imported(&self, name: &str, scheme: Scheme, origin_module: &str) -> Result<(), SymbolError> {
        self.define(name, SymbolKind::Value(scheme), Some(origin_module.to_string()), false)
    }

    pub fn define_pending(&self, name: &str) -> Result<(), SymbolError> {
        self.define(name, SymbolKind::Pending, None, false)
    }

    /// Replaces a previously-pending symbol with its resolved value, used
    /// when the bodies pass discovers the real scheme for a forward
    /// declaration the headers pass only stubbed out.
    pub fn resolve_pending(&self, name: &str, scheme: Scheme) {
        if let Some(sym) = self.frame.borrow_mut().symbols.get_mut(name) {
            sym.kind = SymbolKind::Value(scheme);
        }
    }

    /// Same as `resolve_pending`, but for a top-level `const` whose header
    /// was pre-registered pending: the resolved symbol is marked constant so
    /// `infer_assign` refuses to reassign it.
    pub fn resolve_pending_constant(&self, name: &str, scheme: Scheme) {
        if let Some(sym) = self.frame.borrow_mut().symbols.get_mut(name) {
            sym.kind = SymbolKind::Value(scheme);
            sym.is_constant = true;
        }
    }

    /// Refines an in-scope binding's type in place (spec.md §4.2 `Update`),
    /// used to widen an open record row as new fields are discovered through
    /// member access. Fails if `name` does not resolve in this scope chain.
    pub fn update(&self, name: &str, ty: Ty) -> Result<(), SymbolError> {
        let found = frame::update(&self.frame, name, |sym| {
            sym.kind = SymbolKind::Value(Scheme::monomorphic(ty));
        });
        if found {
            Ok(())
        } else {
            Err(SymbolError::Unresolved { name: name.to_string() })
        }
    }

    pub fn define_type_adt(&self, name: &str, kind: Kind, variants: Vec<VariantInfo>, type_param_vars: Vec<String>) -> Result<(), SymbolError> {
        self.registry.borrow_mut().register_kind(name, kind.clone());
        self.define(name, SymbolKind::TypeAdt { kind, variants, type_param_vars }, None, false)
    }

    /// Replaces an ADT's variant list after it was pre-registered empty, so
    /// a variant's field types can reference the ADT's own name (direct or
    /// mutual recursion) before its full variant list is known.
    pub fn finalize_type_adt(&self, name: &str, variants: Vec<VariantInfo>) {
        if let Some(sym) = self.frame.borrow_mut().symbols.get_mut(name) {
            if let SymbolKind::TypeAdt { variants: slot, .. } = &mut sym.kind {
                *slot = variants;
            }
        }
    }

    pub fn define_type_alias(&self, name: &str, kind: Kind, underlying: Ty) -> Result<(), SymbolError> {
        self.registry.borrow_mut().register_kind(name, kind.clone());
        self.define(name, SymbolKind::TypeAlias { kind, underlying }, None, false)
    }

    pub fn define_constructor(&self, name: &str, owner_type: &str, scheme: Scheme, field_count: usize) -> Result<(), SymbolError> {
        self.define(name, SymbolKind::Constructor { owner_type: owner_type.to_string(), scheme, field_count }, None, false)
    }

    pub fn define_trait(&self, name: &str, info: TraitInfo) -> Result<(), SymbolError> {
        self.define(name, SymbolKind::Trait(info), None, false)
    }

    pub fn register_module_alias(&self, alias: &str, target_module: &str) -> Result<(), SymbolError> {
        self.define(alias, SymbolKind::ModuleAlias { target_module: target_module.to_string() }, None, false)
    }

    /// Re-registers a symbol carried in from another module's table under
    /// the importing scope (spec.md §4.2 "Module origin"): same kind, with
    /// `origin_module` set so the same symbol imported again via a
    /// different path is recognized as identical rather than a conflict.
    pub fn define_imported(&self, name: &str, kind: SymbolKind, origin_module: &str) -> Result<(), SymbolError> {
        self.define(name, kind, Some(origin_module.to_string()), false)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<Symbol> {
        frame::lookup(&self.frame, name)
    }

    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Every name visible from this scope, innermost shadowing first —
    /// used by "did you mean" suggestions, which need to enumerate
    /// candidates rather than look one up by exact name.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        frame::names(&self.frame)
    }

    #[must_use]
    pub fn get_variants(&self, type_name: &str) -> Option<Vec<VariantInfo>> {
        match self.find(type_name)?.kind {
            SymbolKind::TypeAdt { variants, .. } => Some(variants),
            _ => None,
        }
    }

    /// The fresh type variables `type_name`'s own generic parameters were
    /// bound to at declaration time, in declaration order — used to
    /// substitute a parametrized use site's actual type arguments into its
    /// variants' field types (spec.md §4.5, generic ADT exhaustiveness).
    #[must_use]
    pub fn get_adt_type_params(&self, type_name: &str) -> Option<Vec<String>> {
        match self.find(type_name)?.kind {
            SymbolKind::TypeAdt { type_param_vars, .. } => Some(type_param_vars),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_type_alias(&self, type_name: &str) -> Option<Ty> {
        match self.find(type_name)?.kind {
            SymbolKind::TypeAlias { underlying, .. } => Some(underlying),
            _ => None,
        }
    }

    /// Resolves a bare type name to its `Ty` node: an alias resolves to its
    /// underlying structural form wrapped as a named `Con`, an ADT resolves
    /// to a nominal `Con`, and anything else (a type parameter in scope,
    /// for instance) resolves to a type variable of the same name.
    #[must_use]
    pub fn resolve_type(&self, type_name: &str) -> Ty {
        match self.find(type_name).map(|s| s.kind) {
            Some(SymbolKind::TypeAlias { underlying, .. }) => Ty::con_full(type_name, None, Some(underlying)),
            Some(SymbolKind::TypeAdt { .. }) => Ty::con(type_name),
            _ => Ty::con(type_name),
        }
    }

    #[must_use]
    pub fn get_kind(&self, type_name: &str) -> Option<Kind> {
        self.registry.borrow().get_kind(type_name).cloned()
    }

    pub fn register_kind(&self, type_name: &str, kind: Kind) {
        self.registry.borrow_mut().register_kind(type_name, kind);
    }

    #[must_use]
    pub fn is_hkt_trait(&self, trait_name: &str) -> bool {
        match self.find(trait_name).map(|s| s.kind) {
            Some(SymbolKind::Trait(info)) => info.is_hkt,
            _ => false,
        }
    }

    pub fn register_implementation(&self, trait_name: &str, type_name: &str) -> Result<(), SymbolError> {
        self.registry.borrow_mut().register_implementation(trait_name, type_name)
    }

    #[must_use]
    pub fn is_implementation_exists(&self, trait_name: &str, type_name: &str) -> bool {
        self.registry.borrow().implementation_exists(trait_name, type_name)
    }

    #[must_use]
    pub fn traits_implemented_by(&self, type_name: &str) -> Vec<String> {
        self.registry.borrow().traits_implemented_by(type_name).to_vec()
    }

    pub fn register_instance_method(&self, trait_name: &str, type_name: &str, method: &str, scheme: Scheme) {
        self.registry.borrow_mut().register_instance_method(trait_name, type_name, method, scheme);
    }

    #[must_use]
    pub fn get_instance_method(&self, trait_name: &str, type_name: &str, method: &str) -> Option<Scheme> {
        self.registry.borrow().get_instance_method(trait_name, type_name, method).cloned()
    }

    pub fn register_extension_method(&self, type_name: &str, method: &str, scheme: Scheme) {
        self.registry.borrow_mut().register_extension_method(type_name, method, scheme);
    }

    #[must_use]
    pub fn get_extension_method(&self, type_name: &str, method: &str) -> Option<Scheme> {
        self.registry.borrow().get_extension_method(type_name, method).cloned()
    }

    pub fn register_operator_trait(&self, operator: &str, trait_name: &str) -> Result<(), SymbolError> {
        self.registry.borrow_mut().register_operator_trait(operator, trait_name)
    }

    #[must_use]
    pub fn get_trait_for_operator(&self, operator: &str) -> Option<String> {
        self.registry.borrow().get_trait_for_operator(operator).map(str::to_string)
    }

    #[must_use]
    pub fn get_trait_super_traits(&self, trait_name: &str) -> Vec<String> {
        match self.find(trait_name).map(|s| s.kind) {
            Some(SymbolKind::Trait(info)) => info.super_traits,
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn get_trait_required_methods(&self, trait_name: &str) -> Vec<(String, Scheme)> {
        match self.find(trait_name).map(|s| s.kind) {
            Some(SymbolKind::Trait(info)) => info.required_methods,
            _ => Vec::new(),
        }
    }

    pub fn register_trait_default_method(&self, trait_name: &str, method: &str, scheme: Scheme) {
        if let Some(sym) = self.frame.borrow_mut().symbols.get_mut(trait_name) {
            if let SymbolKind::Trait(info) = &mut sym.kind {
                info.default_methods.push((method.to_string(), scheme));
                return;
            }
        }
        // Trait may be defined in an enclosing frame; walk up to find it.
        register_default_in_ancestor(&self.frame, trait_name, method, scheme);
    }

    pub fn register_optional_unwrap_return(&self, type_name: &str, ty: Ty) {
        self.registry.borrow_mut().register_optional_unwrap_return(type_name, ty);
    }

    #[must_use]
    pub fn get_optional_unwrap_return_type(&self, type_name: &str) -> Option<Ty> {
        self.registry.borrow().get_optional_unwrap_return_type(type_name).cloned()
    }
}

fn register_default_in_ancestor(frame: &Rc<RefCell<Frame>>, trait_name: &str, method: &str, scheme: Scheme) {
    let mut current = Rc::clone(frame);
    loop {
        let found = {
            let mut borrowed = current.borrow_mut();
            if let Some(sym) = borrowed.symbols.get_mut(trait_name) {
                if let SymbolKind::Trait(info) = &mut sym.kind {
                    info.default_methods.push((method.to_string(), scheme.clone()));
                    true
                } else {
                    false
                }
            } else {
                false
            }
        };
        if found {
            return;
        }
        let parent = current.borrow().parent.clone();
        match parent {
            Some(p) => current = p,
            None => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlc_types::Scheme;

    #[test]
    fn define_then_find_in_same_scope() {
        let table = SymbolTable::new();
        table.define_value("x", Scheme::monomorphic(Ty::int())).unwrap();
        assert!(table.is_defined("x"));
    }

    #[test]
    fn redefinition_in_same_scope_fails() {
        let table = SymbolTable::new();
        table.define_value("x", Scheme::monomorphic(Ty::int())).unwrap();
        let err = table.define_value("x", Scheme::monomorphic(Ty::bool_ty())).unwrap_err();
        assert_eq!(err, SymbolError::Redefinition { name: "x".to_string() });
    }

    #[test]
    fn enclosed_scope_sees_parent_bindings_but_parent_does_not_see_child() {
        let parent = SymbolTable::new();
        parent.define_value("x", Scheme::monomorphic(Ty::int())).unwrap();
        let child = parent.new_enclosed();
        assert!(child.is_defined("x"));

        child.define_value("y", Scheme::monomorphic(Ty::bool_ty())).unwrap();
        assert!(!parent.is_defined("y"));
    }

    #[test]
    fn shadowing_in_child_scope_does_not_error() {
        let parent = SymbolTable::new();
        parent.define_value("x", Scheme::monomorphic(Ty::int())).unwrap();
        let child = parent.new_enclosed();
        assert!(child.define_value("x", Scheme::monomorphic(Ty::bool_ty())).is_ok());
    }

    #[test]
    fn duplicate_instance_is_rejected() {
        let table = SymbolTable::new();
        table.register_implementation("Eq", "Int").unwrap();
        let err = table.register_implementation("Eq", "Int").unwrap_err();
        assert_eq!(err, SymbolError::DuplicateImplementation { trait_name: "Eq".into(), type_name: "Int".into() });
    }

    #[test]
    fn registry_state_is_shared_across_enclosed_scopes() {
        let parent = SymbolTable::new();
        let child = parent.new_enclosed();
        child.register_implementation("Eq", "Int").unwrap();
        assert!(parent.is_implementation_exists("Eq", "Int"));
    }

    #[test]
    fn pending_symbol_resolves_to_a_value() {
        let table = SymbolTable::new();
        table.define_pending("f").unwrap();
        assert!(table.find("f").unwrap().is_pending());
        table.resolve_pending("f", Scheme::monomorphic(Ty::int()));
        assert!(!table.find("f").unwrap().is_pending());
    }
}
