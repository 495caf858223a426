//! Shade IR - Expression DAG for GLSL generation
//!
//! This crate contains the data structures shared by the builder and the
//! GLSL backend:
//! - Value types (`ScalarKind` × `Shape`) with GLSL spelling
//! - Operator tables (binary, unary, compound assignment, storage qualifiers)
//! - Literal payloads (up to 16 scalar slots)
//! - Swizzle selections (`xyzw` / `rgba` / `stpq`)
//! - Nodes, node IDs and the node arena
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: operands are `NodeId(u32)` indices into a
//!   push-only [`NodeArena`], never shared pointers.
//! - **Append-only Graph**: a node's op, operands and type are fixed when it
//!   is pushed. Mutation semantics (assignment, aliasing) live in the
//!   builder, which only ever appends nodes.
//! - **Types at Construction**: all type propagation happens when a node is
//!   built; the backend never recomputes a type.

mod keywords;
mod literal;
mod node;
mod operators;
mod swizzle;
mod types;

pub use keywords::is_reserved;
pub use literal::{Literal, Scalar, MAX_LITERAL_SLOTS};
pub use node::{Node, NodeArena, NodeId, OpKind};
pub use operators::{
    AssignOp, BinaryOp, StorageQualifier, UnaryOp, POSTFIX_PRECEDENCE, PREFIX_PRECEDENCE,
};
pub use swizzle::{Swizzle, SwizzleError, SwizzleSet};
pub use types::{ScalarKind, Shape, ValueType};
