// src/output/types.rs
//! Type definitions for corpus output.

use std::path::PathBuf;

/// One line of the corpus: text at a tree depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub depth: usize,
    pub text: String,
}

impl OutputLine {
    pub fn new(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }

    /// The line as written to the corpus: indentation, text, newline.
    pub fn render(&self, indent_unit: usize) -> String {
        let indent = self.depth * indent_unit;
        let mut rendered = String::with_capacity(indent + self.text.len() + 1);
        rendered.extend(std::iter::repeat(' ').take(indent));
        rendered.push_str(&self.text);
        rendered.push('\n');
        rendered
    }
}

/// Where the corpus went once a sink finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputReport {
    pub path: Option<PathBuf>,
    pub lines_written: usize,
    pub bytes_written: usize,
}
