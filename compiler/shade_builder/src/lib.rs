//! Shade Builder - Expression graph construction with write tracking
//!
//! The builder is the only way nodes enter a graph. It owns a
//! [`NodeArena`](shade_ir::NodeArena) through a [`ShaderContext`] and hands
//! out [`Handle`]s, small copyable references to "whatever node currently
//! holds this variable's value".
//!
//! # Handles
//!
//! - **Values**: expression results and plain locals. Assigning to one
//!   rebinds it; no node is recorded.
//! - **Variables**: storage declarations, builtin outputs, local arrays and
//!   named locals. Assigning to one records an `assign` node and moves the
//!   variable onto it.
//! - **Elements and swizzles**: `a[i]` and `v.xy` derived from another
//!   handle. Writing through them writes their root variable; a plain local
//!   written this way becomes a variable.
//!
//! # Design
//!
//! - Types are checked when a node is built; misuse is a [`BuildError`].
//! - Reads of written variables go through junction nodes, and writes are
//!   fenced behind every pending read, so the graph alone fixes the order
//!   of side effects.
//! - [`ShaderContext::roots`] lists the current node of every externally
//!   observable variable; the printer starts from there.

mod context;
mod error;
mod handle;
mod tracker;
mod typing;

pub use context::ShaderContext;
pub use error::BuildError;
pub use handle::Handle;
