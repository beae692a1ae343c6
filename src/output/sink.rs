// src/output/sink.rs
//! Ordered line sinks for the corpus.
//!
//! The crawler only ever appends. [`BufferedSink`] keeps lines in memory and
//! writes the file once at the end; [`WriteThroughSink`] puts every line on
//! disk as soon as it is emitted, so an interrupted run still leaves its
//! output behind. [`MemorySink`] never touches the filesystem.

use super::types::{OutputLine, OutputReport};
use super::writer;
use crate::error::AppError;
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::PathBuf;

/// An append-only destination for corpus lines.
pub trait OutputSink {
    fn emit(&mut self, line: OutputLine) -> Result<(), AppError>;

    /// Flushes whatever is pending. Called once at the end of a run.
    fn finish(&mut self) -> Result<OutputReport, AppError>;

    fn lines_emitted(&self) -> usize;
}

/// Collects the corpus in memory and writes it when finished.
pub struct BufferedSink {
    path: PathBuf,
    append: bool,
    indent_unit: usize,
    lines: Vec<OutputLine>,
}

impl BufferedSink {
    pub fn new(path: impl Into<PathBuf>, indent_unit: usize, append: bool) -> Self {
        Self {
            path: path.into(),
            append,
            indent_unit,
            lines: Vec::new(),
        }
    }
}

impl OutputSink for BufferedSink {
    fn emit(&mut self, line: OutputLine) -> Result<(), AppError> {
        self.lines.push(line);
        Ok(())
    }

    fn finish(&mut self) -> Result<OutputReport, AppError> {
        let content: String = self
            .lines
            .iter()
            .map(|line| line.render(self.indent_unit))
            .collect();
        let bytes_written = writer::write_file(&self.path, &content, self.append)?;
        Ok(OutputReport {
            path: Some(self.path.clone()),
            lines_written: self.lines.len(),
            bytes_written,
        })
    }

    fn lines_emitted(&self) -> usize {
        self.lines.len()
    }
}

/// Writes each line to disk the moment it is emitted.
pub struct WriteThroughSink {
    path: PathBuf,
    indent_unit: usize,
    out: LineWriter<File>,
    lines: usize,
    bytes: usize,
}

impl WriteThroughSink {
    /// Opens (and unless `append`, truncates) the corpus file right away.
    pub fn create(path: impl Into<PathBuf>, indent_unit: usize, append: bool) -> Result<Self, AppError> {
        let path = path.into();
        let file = writer::open_output(&path, append)?;
        Ok(Self {
            path,
            indent_unit,
            out: LineWriter::new(file),
            lines: 0,
            bytes: 0,
        })
    }

    fn write_error(&self, source: std::io::Error) -> AppError {
        AppError::OutputWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl OutputSink for WriteThroughSink {
    fn emit(&mut self, line: OutputLine) -> Result<(), AppError> {
        let rendered = line.render(self.indent_unit);
        if let Err(e) = self.out.write_all(rendered.as_bytes()) {
            return Err(self.write_error(e));
        }
        self.lines += 1;
        self.bytes += rendered.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<OutputReport, AppError> {
        if let Err(e) = self.out.flush() {
            return Err(self.write_error(e));
        }
        log::info!("Wrote file: {}", self.path.display());
        Ok(OutputReport {
            path: Some(self.path.clone()),
            lines_written: self.lines,
            bytes_written: self.bytes,
        })
    }

    fn lines_emitted(&self) -> usize {
        self.lines
    }
}

/// Keeps lines in memory only. Used by tests and library callers that
/// want the corpus as a value.
#[derive(Debug, Default)]
pub struct MemorySink {
    indent_unit: usize,
    lines: Vec<OutputLine>,
}

impl MemorySink {
    pub fn new(indent_unit: usize) -> Self {
        Self {
            indent_unit,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    /// The corpus exactly as a file sink would have written it.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.render(self.indent_unit))
            .collect()
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, line: OutputLine) -> Result<(), AppError> {
        self.lines.push(line);
        Ok(())
    }

    fn finish(&mut self) -> Result<OutputReport, AppError> {
        Ok(OutputReport {
            path: None,
            lines_written: self.lines.len(),
            bytes_written: self.render().len(),
        })
    }

    fn lines_emitted(&self) -> usize {
        self.lines.len()
    }
}
