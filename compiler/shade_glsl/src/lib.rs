//! Shade GLSL - Scheduling and printing of shade graphs
//!
//! Turns the graph held by a [`ShaderContext`] into GLSL source text.
//!
//! # Architecture
//!
//! ```text
//! ShaderContext (arena + roots)
//!        ↓
//!    schedule      (post-order walk: declarations, body, fan-in, pins)
//!        ↓
//!     Printer      (statements, inlined expressions, identifiers)
//!        ↓
//!  GeneratedShader (source text + diagnostics)
//! ```
//!
//! Output layout:
//!
//! ```text
//! #version 330            (optional)
//!
//! uniform ...;            (one group per qualifier)
//!
//! out ...;
//!
//! void main(void)
//! {
//!     statements
//! }
//! ```

mod config;
mod emit;
mod error;
mod literal;
mod names;
mod schedule;
mod stack;
mod writer;

use shade_builder::ShaderContext;

pub use config::{CodegenConfig, Indent};
pub use error::{CodegenError, Diagnostic, GeneratedShader};

use emit::Printer;
use names::NameAllocator;

/// Prints the shader built in `ctx`.
///
/// Only nodes reachable from the context's roots are printed. Generation is
/// deterministic: the same sequence of builder calls always produces the
/// same text.
pub fn generate(
    ctx: &ShaderContext<'_>,
    config: &CodegenConfig,
) -> Result<GeneratedShader, CodegenError> {
    let arena = ctx.arena();
    let schedule = schedule::schedule(arena, ctx.roots());

    let taken = arena
        .iter()
        .filter_map(|(_, node)| node.name.clone())
        .chain(ctx.catalog().function_names().into_iter().map(str::to_owned))
        .chain(std::iter::once(config.entry_point.clone()));
    let printer = Printer::new(arena, &schedule, config, NameAllocator::new(taken));
    let (code, diagnostics) = printer.print()?;

    tracing::debug!(
        bytes = code.len(),
        diagnostics = diagnostics.len(),
        "generated shader"
    );
    Ok(GeneratedShader { code, diagnostics })
}
