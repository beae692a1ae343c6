// src/output/mod.rs
//! Corpus output: indented lines in traversal order.
//!
//! Sinks decide when lines reach the disk; the file I/O itself is
//! confined to `writer`.

mod sink;
mod types;
mod writer;

// Re-export the public interface
pub use sink::{BufferedSink, MemorySink, OutputSink, WriteThroughSink};
pub use types::{OutputLine, OutputReport};
pub(crate) use writer::ensure_parent_dir;
