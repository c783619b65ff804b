//! Stable node identity.

/// A stable small integer identifying a syntax-tree node, assigned by the
/// (external) parser. The typed-node map produced by `analyze` is keyed by
/// this id rather than by a pointer, so the typed tree can outlive any
/// particular arena the parser used internally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
