//! Shade Builtins - GLSL builtin catalog
//!
//! Read-only tables consulted by the builder:
//! - Builtin function signatures, resolved by name and argument types
//! - Implementation-limit constants (`gl_MaxDrawBuffers`, ...)
//! - Pipeline-stage variables (`gl_Position`, `gl_FragCoord`, ...)
//!
//! # Design
//!
//! One [`BuiltinCatalog`] is built per target [`GlslVersion`] and passed to
//! the builder by reference. Entries carry the version that introduced
//! them; a catalog only exposes entries available at its version. There is
//! no global state.

mod catalog;
mod functions;
mod variables;
mod version;

pub use catalog::BuiltinCatalog;
pub use functions::{Param, Ret, Signature};
pub use variables::{BuiltinVariable, VariableAccess};
pub use version::{GlslVersion, ShaderStage};
