//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// Methods take `&mut self` and return it, so emitters can thread one
/// builder through many calls and still chain within a call.
///
/// # Example
///
/// ```
/// use thriftgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::go();
/// builder
///     .push_line("func Ping() {")
///     .push_indent()
///     .push_line("return")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "func Ping() {\n\treturn\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with tab indentation (Go).
    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    /// Create a new CodeBuilder with 2-space indentation (JavaScript, dot).
    pub fn javascript() -> Self {
        Self::new(Indent::JAVASCRIPT)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a line comment, one comment line per line of `text`.
    pub fn push_comment(&mut self, prefix: &str, text: &str) -> &mut Self {
        for line in text.lines() {
            self.write_indent();
            self.buffer.push_str(prefix);
            if !line.trim().is_empty() {
                self.buffer.push(' ');
                self.buffer.push_str(line.trim_end());
            }
            self.buffer.push('\n');
        }
        self
    }

    /// Add a `/** ... */` documentation block.
    pub fn push_doc_block(&mut self, text: &str) -> &mut Self {
        self.push_line("/**");
        self.push_comment(" *", text);
        self.push_line(" */")
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::go();
        builder.push_line("var x = 1");
        assert_eq!(builder.build(), "var x = 1\n");
    }

    #[test]
    fn test_indentation_per_language() {
        let mut go = CodeBuilder::go();
        go.push_line("func main() {")
            .push_indent()
            .push_line("ping()")
            .push_dedent()
            .push_line("}");
        assert_eq!(go.build(), "func main() {\n\tping()\n}\n");

        let mut js = CodeBuilder::javascript();
        js.push_line("const Color = {")
            .push_indent()
            .push_line("'RED' : 1,")
            .push_blank()
            .push_dedent()
            .push_line("};");
        assert_eq!(js.build(), "const Color = {\n  'RED' : 1,\n\n};\n");
    }

    #[test]
    fn test_multiline_comment() {
        let mut builder = CodeBuilder::go();
        builder.push_indent().push_comment("//", "first line\n\nthird line");
        assert_eq!(builder.build(), "\t// first line\n\t//\n\t// third line\n");
    }

    #[test]
    fn test_doc_block() {
        let mut builder = CodeBuilder::javascript();
        builder.push_doc_block("Adds two numbers");
        assert_eq!(builder.build(), "/**\n * Adds two numbers\n */\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::javascript();
        builder.push_dedent().push_line("x");
        assert_eq!(builder.build(), "x\n");
    }
}
