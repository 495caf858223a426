//! Generation results, diagnostics and errors.

use std::fmt;

use thiserror::Error;

/// Printed shader plus any recoverable findings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedShader {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedShader {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// A recoverable problem in the graph. Generation still succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// A local was read before anything was assigned to it. It is still
    /// declared, with an `// uninitialized` marker.
    UninitializedRead { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UninitializedRead { name } => {
                write!(f, "`{name}` is read before it is assigned")
            }
        }
    }
}

/// Fatal generation failure: the graph could not be ordered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("internal scheduler error: {0}")]
    Internal(String),
}
