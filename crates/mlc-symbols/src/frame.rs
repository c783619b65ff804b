//! A single lexical scope frame, linked to its parent.

use crate::symbol::Symbol;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// One scope's bindings, parent-linked so lookup walks outward to enclosing
/// scopes. Wrapped in `Rc<RefCell<_>>` since a single-threaded analysis pass
/// shares each frame between the scope that owns it and any closure that
/// captured it (spec.md §5: the analysis core is single-threaded).
pub struct Frame {
    pub(crate) parent: Option<Rc<RefCell<Frame>>>,
    pub(crate) symbols: FxHashMap<String, Symbol>,
}

impl Frame {
    #[must_use]
    pub fn root() -> Rc<RefCell<Frame>> {
        Rc::new(RefCell::new(Frame { parent: None, symbols: FxHashMap::default() }))
    }

    #[must_use]
    pub fn child_of(parent: &Rc<RefCell<Frame>>) -> Rc<RefCell<Frame>> {
        Rc::new(RefCell::new(Frame { parent: Some(Rc::clone(parent)), symbols: FxHashMap::default() }))
    }
}

/// Walks from `frame` outward through parents, returning the first symbol
/// named `name`, or `None` if it reaches the root without finding one.
#[must_use]
pub fn lookup(frame: &Rc<RefCell<Frame>>, name: &str) -> Option<Symbol> {
    let mut current = Rc::clone(frame);
    loop {
        if let Some(sym) = current.borrow().symbols.get(name) {
            return Some(sym.clone());
        }
        let parent = current.borrow().parent.clone();
        match parent {
            Some(p) => current = p,
            None => return None,
        }
    }
}

#[must_use]
pub fn is_defined_in_current(frame: &Rc<RefCell<Frame>>, name: &str) -> bool {
    frame.borrow().symbols.contains_key(name)
}

/// Collects every name visible from `frame`, walking outward through
/// parents. A name shadowed by an inner frame is reported once, from the
/// innermost frame that binds it.
#[must_use]
pub fn names(frame: &Rc<RefCell<Frame>>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    let mut current = Rc::clone(frame);
    loop {
        for name in current.borrow().symbols.keys() {
            if seen.insert(name.clone()) {
                out.push(name.clone());
            }
        }
        let parent = current.borrow().parent.clone();
        match parent {
            Some(p) => current = p,
            None => return out,
        }
    }
}

/// Walks from `frame` outward through parents, rewriting the innermost
/// binding named `name` in place with `f`. Returns `false` if no frame in
/// the chain defines `name`, leaving every frame untouched.
pub fn update(frame: &Rc<RefCell<Frame>>, name: &str, f: impl FnOnce(&mut Symbol)) -> bool {
    let mut current = Rc::clone(frame);
    loop {
        if current.borrow().symbols.contains_key(name) {
            f(current.borrow_mut().symbols.get_mut(name).expect("just checked contains_key"));
            return true;
        }
        let parent = current.borrow().parent.clone();
        match parent {
            Some(p) => current = p,
            None => return false,
        }
    }
}
