//! Cross-scope registries: kinds, trait instances, extension methods, and
//! operator dispatch. These are not lexically scoped — an instance
//! registered anywhere in a module is visible everywhere in it — so they
//! live alongside the frame chain rather than inside any one [`crate::frame::Frame`].

use crate::error::SymbolError;
use mlc_types::{Kind, Scheme, Ty};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Default)]
pub struct Registry {
    kinds: FxHashMap<String, Kind>,
    implementations: FxHashSet<(String, String)>,
    /// Reverse index of `implementations`: every trait a given type has an
    /// instance for, in registration order. Lets member-access resolution
    /// search a type's instance methods without the caller already knowing
    /// which trait to ask (spec.md §4.3 Member rule, step (b)).
    traits_by_type: FxHashMap<String, Vec<String>>,
    instance_methods: FxHashMap<(String, String, String), Scheme>,
    extension_methods: FxHashMap<(String, String), Scheme>,
    operator_traits: FxHashMap<String, String>,
    /// The return type `Optional::unwrap` (or equivalent) yields for a
    /// given optional-wrapped type, used by `?.` chaining (spec.md §4.4).
    optional_unwrap_return: FxHashMap<String, Ty>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_kind(&mut self, type_name: impl Into<String>, kind: Kind) {
        self.kinds.insert(type_name.into(), kind);
    }

    #[must_use]
    pub fn get_kind(&self, type_name: &str) -> Option<&Kind> {
        self.kinds.get(type_name)
    }

    #[must_use]
    pub fn is_hkt(&self, type_name: &str) -> bool {
        self.kinds.get(type_name).is_some_and(|k| !k.is_star())
    }

    pub fn register_implementation(&mut self, trait_name: &str, type_name: &str) -> Result<(), SymbolError> {
        let key = (trait_name.to_string(), type_name.to_string());
        if self.implementations.contains(&key) {
            return Err(SymbolError::DuplicateImplementation {
                trait_name: trait_name.to_string(),
                type_name: type_name.to_string(),
            });
        }
        self.implementations.insert(key);
        self.traits_by_type.entry(type_name.to_string()).or_default().push(trait_name.to_string());
        Ok(())
    }

    #[must_use]
    pub fn implementation_exists(&self, trait_name: &str, type_name: &str) -> bool {
        self.implementations.contains(&(trait_name.to_string(), type_name.to_string()))
    }

    #[must_use]
    pub fn traits_implemented_by(&self, type_name: &str) -> &[String] {
        self.traits_by_type.get(type_name).map_or(&[], Vec::as_slice)
    }

    pub fn register_instance_method(&mut self, trait_name: &str, type_name: &str, method: &str, scheme: Scheme) {
        self.instance_methods
            .insert((trait_name.to_string(), type_name.to_string(), method.to_string()), scheme);
    }

    #[must_use]
    pub fn get_instance_method(&self, trait_name: &str, type_name: &str, method: &str) -> Option<&Scheme> {
        self.instance_methods.get(&(trait_name.to_string(), type_name.to_string(), method.to_string()))
    }

    pub fn register_extension_method(&mut self, type_name: &str, method: &str, scheme: Scheme) {
        self.extension_methods.insert((type_name.to_string(), method.to_string()), scheme);
    }

    #[must_use]
    pub fn get_extension_method(&self, type_name: &str, method: &str) -> Option<&Scheme> {
        self.extension_methods.get(&(type_name.to_string(), method.to_string()))
    }

    pub fn register_operator_trait(&mut self, operator: &str, trait_name: &str) -> Result<(), SymbolError> {
        if let Some(existing) = self.operator_traits.get(operator) {
            if existing != trait_name {
                return Err(SymbolError::OperatorAlreadyBound {
                    operator: operator.to_string(),
                    trait_name: existing.clone(),
                });
            }
            return Ok(());
        }
        self.operator_traits.insert(operator.to_string(), trait_name.to_string());
        Ok(())
    }

    #[must_use]
    pub fn get_trait_for_operator(&self, operator: &str) -> Option<&str> {
        self.operator_traits.get(operator).map(String::as_str)
    }

    pub fn register_optional_unwrap_return(&mut self, type_name: &str, ty: Ty) {
        self.optional_unwrap_return.insert(type_name.to_string(), ty);
    }

    #[must_use]
    pub fn get_optional_unwrap_return_type(&self, type_name: &str) -> Option<&Ty> {
        self.optional_unwrap_return.get(type_name)
    }
}
