// src/formatting/mod.rs
//! Renders Notion values into corpus text.
//!
//! Both renderers are pure and never fail; problems show up as inline
//! markers in the text they return.

mod block_text;
mod properties;

pub use block_text::block_text;
pub use properties::render_property;
