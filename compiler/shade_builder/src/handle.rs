//! Handles: mutable references to "the node that currently holds a
//! variable's value".
//!
//! A [`Handle`] is a `Copy` index into the context's handle table. Copying
//! the handle aliases the variable; use
//! [`ShaderContext::copy`](crate::ShaderContext::copy) for value semantics.

use shade_ir::{NodeId, Swizzle, ValueType};
use smallvec::SmallVec;

/// Reference to a variable, array element or swizzle of a context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Handle(u32);

impl Handle {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        Handle(index)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a handle refers to.
#[derive(Clone, Debug)]
pub(crate) enum HandleKind {
    /// Expression result or plain local: writes rebind, nothing observes them.
    Value,
    /// Declared storage or builtin variable.
    Storage,
    /// Local array, or a local promoted to a named variable.
    Variable,
    /// `base[index]`.
    Element { base: Handle, index: NodeId },
    /// `base.letters`.
    Swizzle { base: Handle, swizzle: Swizzle },
}

impl HandleKind {
    /// Writes through persistent handles become `assign` nodes.
    pub(crate) fn is_persistent(&self) -> bool {
        !matches!(self, Self::Value)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct HandleData {
    pub kind: HandleKind,
    pub ty: ValueType,
    pub dims: SmallVec<[u32; 2]>,
    /// Value handles: the current value. Roots: the latest write event, or
    /// `origin` before the first write. Derived handles: the path they were
    /// created with.
    pub node: NodeId,
    /// Declaration node of storage and variables.
    pub origin: NodeId,
    /// Handles this one was derived from, nearest first, root last.
    pub chain: SmallVec<[Handle; 2]>,
    /// Consumers that read this root since its last write.
    pub reads: Vec<NodeId>,
    /// Last value built by a read: `(key, value)` where `key` is the node
    /// (or base value) the read was computed from.
    pub read_cache: Option<(NodeId, NodeId)>,
    pub writable: bool,
}

impl HandleData {
    pub(crate) fn new(kind: HandleKind, ty: ValueType, dims: &[u32], node: NodeId) -> Self {
        HandleData {
            kind,
            ty,
            dims: SmallVec::from_slice(dims),
            node,
            origin: node,
            chain: SmallVec::new(),
            reads: Vec::new(),
            read_cache: None,
            writable: true,
        }
    }

    /// The outermost handle this one was derived from.
    pub(crate) fn root(&self, this: Handle) -> Handle {
        self.chain.last().copied().unwrap_or(this)
    }
}
