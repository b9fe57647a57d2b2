//! LaTeX output generation.

mod chart;
mod document;
mod text;

pub use chart::bar_chart;
pub use document::{Command, Document, Element, Package, SectionLevel};
pub use text::{escape, normalize_text, wrap_paragraphs, TEXT_WRAP_WIDTH};
