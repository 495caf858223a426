//! Printer configuration.

use shade_builtins::GlslVersion;

/// Indentation unit for the function body.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(u8),
}

impl Indent {
    pub(crate) fn unit(self) -> String {
        match self {
            Indent::Tab => "\t".to_owned(),
            Indent::Spaces(n) => " ".repeat(usize::from(n)),
        }
    }
}

/// Options for [`generate`](crate::generate).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CodegenConfig {
    /// `#version` header; omitted when `None`.
    pub version: Option<GlslVersion>,
    pub indent: Indent,
    /// When false, every computed value gets its own statement.
    pub inline_expressions: bool,
    pub entry_point: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            version: None,
            indent: Indent::Tab,
            inline_expressions: true,
            entry_point: "main".to_owned(),
        }
    }
}

impl CodegenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_version(mut self, version: GlslVersion) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_inline_expressions(mut self, inline: bool) -> Self {
        self.inline_expressions = inline;
        self
    }

    #[must_use]
    pub fn with_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = name.into();
        self
    }
}
