//! Indented text output.

use crate::config::Indent;

pub(crate) struct GlslWriter {
    unit: String,
    level: usize,
    output: String,
}

impl GlslWriter {
    pub(crate) fn new(indent: Indent) -> Self {
        GlslWriter {
            unit: indent.unit(),
            level: 0,
            output: String::with_capacity(1024),
        }
    }

    pub(crate) fn indent(&mut self) {
        self.level += 1;
    }

    pub(crate) fn dedent(&mut self) {
        debug_assert!(self.level > 0, "dedent called with zero indent");
        self.level = self.level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.level {
            self.output.push_str(&self.unit);
        }
    }

    /// Writes one line at the current indentation.
    pub(crate) fn writeln(&mut self, line: &str) {
        self.write_indent();
        self.output.push_str(line);
        self.output.push('\n');
    }

    pub(crate) fn newline(&mut self) {
        self.output.push('\n');
    }

    pub(crate) fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
