//! Indentation-tracking text buffer for generated source

const INDENT_WIDTH: usize = 4;

/// Accumulates source lines, indenting each by the current block depth
#[derive(Debug, Default)]
pub struct SourceWriter {
    buffer: String,
    depth:  usize,
}

impl SourceWriter {
    /// Empty buffer at depth zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.buffer
                .extend(std::iter::repeat_n(' ', self.depth * INDENT_WIDTH));
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Write an empty line
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Write `header {` and indent what follows
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Dedent and write the closing brace
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Close the current block and open a chained one: `} else {`
    pub fn chain(&mut self, header: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("}} {} {{", header.as_ref()));
        self.depth += 1;
    }

    /// The accumulated text
    pub fn finish(self) -> String {
        self.buffer
    }
}
