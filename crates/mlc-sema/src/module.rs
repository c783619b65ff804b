//! The module-loader external-collaborator interface (spec.md §6).

use mlc_symbols::SymbolTable;
use rustc_hash::{FxHashMap, FxHashSet};

/// A selective re-export: `export { name as alias } from "path"`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReexportSpec {
    pub name: String,
    pub alias: Option<String>,
    pub from_path: String,
}

/// A loaded module, exposing the four-flag cyclic-import protocol
/// described in spec.md §5: entering a module already mid-pass returns
/// immediately instead of recursing, so mutually recursive modules resolve
/// without infinite loops.
pub trait ModuleHandle {
    fn name(&self) -> &str;
    fn exports(&self) -> &FxHashSet<String>;
    fn symbol_table(&self) -> SymbolTable;
    fn files(&self) -> &[String];
    fn headers_analyzing(&self) -> bool;
    fn headers_analyzed(&self) -> bool;
    fn bodies_analyzing(&self) -> bool;
    fn bodies_analyzed(&self) -> bool;
    fn trait_defaults(&self) -> &FxHashMap<String, Vec<String>>;
    fn reexport_specs(&self) -> &[ReexportSpec];
    fn add_export(&mut self, name: &str);
    fn set_headers_analyzing(&mut self, v: bool);
    fn set_headers_analyzed(&mut self, v: bool);
    fn set_bodies_analyzing(&mut self, v: bool);
    fn set_bodies_analyzed(&mut self, v: bool);
}

/// Resolves import paths and package-qualified names to a loaded module.
/// Reading from disk, caching parsed files, and recursing into a module's
/// own header/body analysis are all the loader's responsibility — the core
/// only calls back into it (spec.md §1: module file loading is an external
/// collaborator).
pub trait ModuleLoader {
    fn get_module(&mut self, path: &str) -> Option<&mut dyn ModuleHandle>;
    fn get_module_by_package_name(&mut self, name: &str) -> Option<&mut dyn ModuleHandle>;
}

/// A `ModuleLoader` that resolves nothing — usable for analyzing a single
/// self-contained module (no imports), such as in tests.
#[derive(Default)]
pub struct NullModuleLoader;

impl ModuleLoader for NullModuleLoader {
    fn get_module(&mut self, _path: &str) -> Option<&mut dyn ModuleHandle> {
        None
    }

    fn get_module_by_package_name(&mut self, _name: &str) -> Option<&mut dyn ModuleHandle> {
        None
    }
}
