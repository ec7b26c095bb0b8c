//! Output buffer for declaration text.

/// Line terminator of the emitted declarations.
pub const NEWLINE: &str = "\r\n";

/// Accumulates declaration text, one indented line at a time.
#[derive(Debug)]
pub struct DeclWriter<'a> {
    indent_unit: &'a str,
    output: String,
}

impl<'a> DeclWriter<'a> {
    pub fn new(indent_unit: &'a str) -> Self {
        Self {
            indent_unit,
            output: String::new(),
        }
    }

    /// The indentation string for a nesting depth.
    pub fn indent(&self, depth: usize) -> String {
        self.indent_unit.repeat(depth)
    }

    pub fn line(&mut self, depth: usize, text: &str) {
        self.output.push_str(&self.indent(depth));
        self.output.push_str(text);
        self.output.push_str(NEWLINE);
    }

    pub fn blank_line(&mut self) {
        self.output.push_str(NEWLINE);
    }

    /// Write a `/** ... */` block: the description lines, then one line per
    /// tag. Nothing is written when both are empty.
    pub fn doc_block(&mut self, depth: usize, description: &str, tags: &[String]) {
        let description = description.trim();
        if description.is_empty() && tags.is_empty() {
            return;
        }

        self.line(depth, "/**");
        for text in description.lines() {
            self.doc_line(depth, text.trim_end());
        }
        for tag in tags {
            self.doc_line(depth, &single_line(tag));
        }
        self.line(depth, " */");
    }

    fn doc_line(&mut self, depth: usize, text: &str) {
        let text = text.replace("*/", "*\\/");
        if text.is_empty() {
            self.line(depth, " *");
        } else {
            self.line(depth, &format!(" * {}", text));
        }
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Collapse line breaks into spaces, for doc tags.
pub fn single_line(text: &str) -> String {
    text.split(&['\r', '\n'][..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
