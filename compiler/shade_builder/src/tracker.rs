//! Write tracking for persistent handles.
//!
//! The graph itself is append-only, so a write never mutates a node.
//! Instead, a write appends an event node and moves the root handle onto
//! it. Reads and later writes reach the event through junction
//! (`Dependency`) nodes, which is how the scheduler learns the order.
//!
//! # Design
//!
//! Each root (storage, builtin output, local variable) keeps:
//! - `node`: its latest write event, or its declaration before any write
//! - `reads`: consumers built from it since that write
//!
//! A read of a written root is `junction(node, origin)`: it forces the
//! write and then names the declaration. A write takes the root's pending
//! reads as fences and chains them in front of its place, so every
//! consumer of the old value is evaluated before the location changes.
//! Derived handles (elements, swizzles) never store state of their own;
//! each read rebuilds their path over the current value of their base, and
//! each write through them moves the root.

use rustc_hash::FxHashSet;
use shade_ir::{Node, NodeId, OpKind};
use smallvec::SmallVec;

use crate::context::ShaderContext;
use crate::error::BuildError;
use crate::handle::{Handle, HandleData, HandleKind};

impl ShaderContext<'_> {
    pub(crate) fn root(&self, h: Handle) -> Result<Handle, BuildError> {
        Ok(self.data(h)?.root(h))
    }

    /// The node an expression uses for the current value of `h`.
    pub(crate) fn read(&mut self, h: Handle) -> Result<NodeId, BuildError> {
        let data = self.data(h)?;
        match data.kind {
            HandleKind::Value => Ok(data.node),
            HandleKind::Storage | HandleKind::Variable => {
                let (node, origin) = (data.node, data.origin);
                if node == origin {
                    return Ok(origin);
                }
                if let Some((key, value)) = data.read_cache {
                    if key == node {
                        return Ok(value);
                    }
                }
                let junction = Node::dependency(data.ty, &data.dims, node, origin);
                let junction = self.arena.push(junction);
                self.handles[h.index()].read_cache = Some((node, junction));
                Ok(junction)
            }
            HandleKind::Element { base, .. } | HandleKind::Swizzle { base, .. } => {
                let cached = data.read_cache;
                let base_value = self.read(base)?;
                if let Some((key, value)) = cached {
                    if key == base_value {
                        return Ok(value);
                    }
                }
                let path = self.path_over(h, base_value);
                self.handles[h.index()].read_cache = Some((base_value, path));
                Ok(path)
            }
        }
    }

    /// Lookup or member node selecting `h` out of `base_value`.
    fn path_over(&mut self, h: Handle, base_value: NodeId) -> NodeId {
        let data = &self.handles[h.index()];
        let path = match &data.kind {
            HandleKind::Element { index, .. } => {
                Node::array_lookup(data.ty, &data.dims, base_value, *index)
            }
            HandleKind::Swizzle { swizzle, .. } => {
                Node::member(data.ty, base_value, swizzle.letters())
            }
            HandleKind::Value | HandleKind::Storage | HandleKind::Variable => {
                unreachable!("only derived handles have paths")
            }
        };
        self.arena.push(path)
    }

    /// Current value of `h`, detached from later writes.
    ///
    /// Values read out of writable variables are captured in a local so a
    /// later write cannot change what the snapshot prints as.
    pub(crate) fn snapshot(&mut self, h: Handle) -> Result<NodeId, BuildError> {
        let value = self.read(h)?;
        if !self.is_tracked(h)? {
            return Ok(value);
        }
        let data = self.data(h)?;
        let captured = Node::variable(data.ty, &data.dims, value);
        let captured = self.arena.push(captured);
        self.note_read(h, captured);
        Ok(captured)
    }

    /// Whether writes can happen to the root of `h`.
    fn is_tracked(&self, h: Handle) -> Result<bool, BuildError> {
        let root = self.data(self.root(h)?)?;
        Ok(root.kind.is_persistent() && root.writable)
    }

    /// Records that `consumer` was built from the current value of `h`.
    pub(crate) fn note_read(&mut self, h: Handle, consumer: NodeId) {
        if let Ok(true) = self.is_tracked(h) {
            if let Ok(root) = self.root(h) {
                self.handles[root.index()].reads.push(consumer);
            }
        }
    }

    /// Points a value handle at a new node. Nothing else observes it.
    pub(crate) fn rebind(&mut self, h: Handle, node: NodeId) {
        let data = &mut self.handles[h.index()];
        debug_assert!(!data.kind.is_persistent(), "rebind of a tracked handle");
        data.node = node;
        data.read_cache = None;
    }

    /// Turns a plain local into a variable declaration.
    ///
    /// The declaration starts from the local's current value; a local that
    /// never had one gets a fresh uninitialized declaration so other values
    /// sharing the old node stay unaffected.
    pub(crate) fn promote(&mut self, h: Handle, name: Option<String>) -> Result<(), BuildError> {
        let data = self.data(h)?;
        debug_assert!(matches!(data.kind, HandleKind::Value));
        let (ty, dims, current) = (data.ty, data.dims.clone(), data.node);
        let mut decl = if self.is_uninitialized(current) {
            Node::uninitialized(ty)
        } else {
            Node::variable(ty, &dims, current)
        };
        decl.name = name;
        let decl = self.arena.push(decl);
        tracing::trace!(?decl, "promoted local to variable");

        let data = &mut self.handles[h.index()];
        data.kind = HandleKind::Variable;
        data.node = decl;
        data.origin = decl;
        data.read_cache = None;
        data.writable = true;
        Ok(())
    }

    /// Promotes the root of a derived write target if it is a plain local.
    pub(crate) fn promote_root(&mut self, target: Handle) -> Result<(), BuildError> {
        let root = self.root(target)?;
        if matches!(self.data(root)?.kind, HandleKind::Value) {
            self.promote(root, None)?;
        }
        Ok(())
    }

    /// Records a write through the persistent handle `target`.
    ///
    /// `build` receives the target's type, dimensions and the place to
    /// write (fenced behind every pending read) and returns the event node.
    /// `rhs` is the value written, if any; fences it already depends on
    /// are not repeated.
    pub(crate) fn write(
        &mut self,
        target: Handle,
        rhs: Option<NodeId>,
        build: impl FnOnce(shade_ir::ValueType, &[u32], NodeId) -> Node,
    ) -> Result<NodeId, BuildError> {
        let root = self.root(target)?;
        let place = self.read(target)?;
        let fences = std::mem::take(&mut self.handles[root.index()].reads);

        let data = self.data(target)?;
        let (ty, dims) = (data.ty, data.dims.clone());
        let mut prior = place;
        for fence in fences {
            let covered = rhs.is_some_and(|r| self.depends_on(r, fence))
                || self.depends_on(prior, fence);
            if !covered {
                prior = self.arena.push(Node::dependency(ty, &dims, fence, prior));
            }
        }

        let event = self.arena.push(build(ty, &dims, prior));
        let root_data = &mut self.handles[root.index()];
        root_data.node = event;
        root_data.read_cache = None;
        tracing::trace!(?event, ?root, "recorded write");
        Ok(event)
    }

    /// Whether `target` is reachable from `from` along operand edges.
    pub(crate) fn depends_on(&self, from: NodeId, target: NodeId) -> bool {
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut seen = FxHashSet::default();
        stack.push(from);
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            // Operands always precede their users.
            if id < target || !seen.insert(id) {
                continue;
            }
            stack.extend(self.arena[id].operands.iter().copied());
        }
        false
    }

    /// Creates an element or swizzle handle over `base`.
    pub(crate) fn derive(
        &mut self,
        base: Handle,
        kind: HandleKind,
        ty: shade_ir::ValueType,
        dims: &[u32],
    ) -> Result<Handle, BuildError> {
        let base_data = self.data(base)?;
        let writable = base_data.writable;
        let mut chain: SmallVec<[Handle; 2]> = SmallVec::with_capacity(base_data.chain.len() + 1);
        chain.push(base);
        chain.extend(base_data.chain.iter().copied());

        let base_value = self.read(base)?;
        let mut data = HandleData::new(kind, ty, dims, NodeId::INVALID);
        data.chain = chain;
        data.writable = writable;
        let h = self.alloc(data);
        let path = self.path_over(h, base_value);
        let data = &mut self.handles[h.index()];
        data.node = path;
        data.origin = path;
        data.read_cache = Some((base_value, path));
        Ok(h)
    }

    /// Whether `node` is a local with no value.
    pub(crate) fn is_uninitialized(&self, node: NodeId) -> bool {
        self.arena[node].op == OpKind::Uninitialized
    }
}
