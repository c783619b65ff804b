//! Symbol table — component B of the semantic analysis core.
//!
//! A scoped stack of frames (spec.md §4.2: "Find walks the scope chain
//! outward"), with a shared registry for the cross-cutting trait/instance/
//! kind/operator state that every scope in a module can see. Grounded on
//! the scope-stack shape of the teacher's binder crate, adapted from its
//! arena-indexed, `Arc<RwLock<_>>`-backed concurrent scopes to a
//! single-threaded `Rc<RefCell<_>>` parent-linked chain, since this core
//! analyzes one module at a time (spec.md §5).

mod error;
mod frame;
mod registry;
mod symbol;
mod table;

pub use error::SymbolError;
pub use symbol::{Symbol, SymbolKind, TraitInfo, VariantInfo};
pub use table::SymbolTable;
