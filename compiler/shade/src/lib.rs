//! Shade - GLSL shaders as expression graphs
//!
//! Build a shader by calling [`ShaderContext`] operations, then print it
//! with [`generate`]:
//!
//! ```text
//! let catalog = BuiltinCatalog::default();
//! let mut ctx = ShaderContext::new(&catalog, ShaderStage::Fragment);
//! let n = ctx.declare(StorageQualifier::In, ValueType::vec3(), "normal")?;
//! let l = ctx.declare(StorageQualifier::In, ValueType::vec3(), "light")?;
//! let out = ctx.declare(StorageQualifier::Out, ValueType::FLOAT, "NdotL")?;
//! let d = ctx.call("dot", &[n, l])?;
//! ctx.assign(AssignOp::Assign, out, d)?;
//! let shader = generate(&ctx, &CodegenConfig::default())?;
//! ```
//!
//! # Crates
//!
//! - [`shade_ir`]: nodes, types, operators, literals, swizzles
//! - [`shade_builtins`]: builtin functions and pipeline variables
//! - [`shade_builder`]: graph construction and write tracking
//! - [`shade_glsl`]: scheduling and printing

use std::sync::Once;

pub use shade_builder::{BuildError, Handle, ShaderContext};
pub use shade_builtins::{BuiltinCatalog, GlslVersion, ShaderStage};
pub use shade_glsl::{generate, CodegenConfig, CodegenError, Diagnostic, GeneratedShader, Indent};
pub use shade_ir::{
    AssignOp, BinaryOp, Scalar, ScalarKind, Shape, StorageQualifier, UnaryOp, ValueType,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=shade_glsl=debug` or
/// `RUST_LOG=shade_builder=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
