//! Linearization of the node graph.
//!
//! A depth-first post-order walk from the roots visits every reachable node
//! once. Declarations (storage and builtin variables) are collected apart
//! from the body; everything else lands in the body in dependency order.
//! The walk also records what the printer needs to decide which nodes
//! become statements.
//!
//! # Design
//!
//! Nodes are reached in two modes:
//! - **value**: the node's value is an operand. Junctions are transparent
//!   here: their first operand is forced and their second is the value.
//! - **place**: the node is the target of a write (operand 0 of an assign
//!   or increment). Lookups and members are walked as a path over their
//!   base instead of being evaluated.
//!
//! "Forcing" a node visits it and pins it, so the printer emits it as a
//! statement at its position in the order instead of inlining it at a use
//! that may come after a write.

use rustc_hash::{FxHashMap, FxHashSet};
use shade_ir::{NodeArena, NodeId, OpKind, StorageQualifier};

use crate::stack::ensure_sufficient_stack;

/// Output of the walk.
#[derive(Debug, Default)]
pub(crate) struct Schedule {
    /// Storage and builtin nodes, grouped by qualifier (builtins last).
    pub decls: Vec<NodeId>,
    /// All other visited nodes except junctions, in post-order.
    pub body: Vec<NodeId>,
    /// Value uses per node, with junctions resolved.
    pub fan_in: FxHashMap<NodeId, u32>,
    /// Nodes that must be printed as statements at their position.
    pub pinned: FxHashSet<NodeId>,
    /// Values assigned by a write.
    pub write_rhs: FxHashSet<NodeId>,
    /// Uninitialized locals whose value is read directly.
    pub uninitialized_reads: FxHashSet<NodeId>,
}

impl Schedule {
    pub(crate) fn fan_in(&self, id: NodeId) -> u32 {
        self.fan_in.get(&id).copied().unwrap_or(0)
    }
}

pub(crate) fn schedule(arena: &NodeArena, roots: impl IntoIterator<Item = NodeId>) -> Schedule {
    let mut scheduler = Scheduler {
        arena,
        visited: FxHashSet::default(),
        out: Schedule::default(),
    };
    for root in roots {
        scheduler.value(root);
    }
    let mut out = scheduler.out;
    out.decls.sort_by_key(|&id| decl_group(arena, id));
    tracing::debug!(
        nodes = arena.len(),
        decls = out.decls.len(),
        body = out.body.len(),
        "scheduled graph"
    );
    out
}

/// Sort key of a declaration: qualifier order, builtins after all storage.
fn decl_group(arena: &NodeArena, id: NodeId) -> (bool, Option<StorageQualifier>) {
    match arena[id].op {
        OpKind::Storage(q) => (false, Some(q)),
        _ => (true, None),
    }
}

struct Scheduler<'a> {
    arena: &'a NodeArena,
    visited: FxHashSet<NodeId>,
    out: Schedule,
}

impl Scheduler<'_> {
    /// Schedules `id` as a value and returns the node that carries it.
    fn value(&mut self, id: NodeId) -> NodeId {
        ensure_sufficient_stack(|| self.value_inner(id))
    }

    fn value_inner(&mut self, id: NodeId) -> NodeId {
        let arena = self.arena;
        let node = &arena[id];
        if node.op == OpKind::Dependency {
            self.force(node.operand(0));
            return self.value(node.operand(1));
        }
        if !self.visited.insert(id) {
            return id;
        }

        match node.op {
            OpKind::Assign(_) => {
                self.place(node.operand(0));
                let rhs = self.use_value(node.operand(1));
                self.out.write_rhs.insert(rhs);
            }
            OpKind::Unary(op) if op.is_increment() => self.place(node.operand(0)),
            _ => {
                for &operand in &node.operands {
                    self.use_value(operand);
                }
            }
        }

        if node.op.is_declaration() {
            self.out.decls.push(id);
        } else {
            self.out.body.push(id);
        }
        id
    }

    /// Schedules `id` as an operand and counts the use.
    fn use_value(&mut self, id: NodeId) -> NodeId {
        if self.arena[id].op == OpKind::Uninitialized {
            self.out.uninitialized_reads.insert(id);
        }
        let carrier = self.value(id);
        *self.out.fan_in.entry(carrier).or_default() += 1;
        carrier
    }

    fn force(&mut self, id: NodeId) {
        let carrier = self.value(id);
        self.out.pinned.insert(carrier);
    }

    /// Schedules the target path of a write.
    fn place(&mut self, id: NodeId) {
        ensure_sufficient_stack(|| {
            let arena = self.arena;
            let node = &arena[id];
            match node.op {
                OpKind::Dependency => {
                    self.force(node.operand(0));
                    self.place(node.operand(1));
                }
                OpKind::ArrayLookup => {
                    self.place(node.operand(0));
                    self.use_value(node.operand(1));
                }
                OpKind::Member => self.place(node.operand(0)),
                op if op.is_location() => {
                    self.value(id);
                }
                // The printer rejects writes to computed values.
                _ => self.force(id),
            }
        });
    }
}
