use std::ops::{Deref, DerefMut};

const INDENT: &str = "    ";

/// Line-oriented text buffer with brace blocks
///
/// Blank lines never carry indentation.
#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` on its own line at the current depth
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Write `header`, open a brace and indent until the guard drops
    pub fn block(&mut self, header: impl AsRef<str>) -> Block<'_> {
        self.line(header);
        self.open()
    }

    /// Open a brace block without a header line
    pub fn open(&mut self) -> Block<'_> {
        self.line("{");
        self.depth += 1;
        Block { writer: self }
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Open brace scope; writes the closing brace when dropped
#[derive(Debug)]
pub struct Block<'a> {
    writer: &'a mut SourceWriter,
}

impl Deref for Block<'_> {
    type Target = SourceWriter;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl DerefMut for Block<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}

impl Drop for Block<'_> {
    fn drop(&mut self) {
        self.writer.depth = self.writer.depth.saturating_sub(1);
        self.writer.line("}");
    }
}
