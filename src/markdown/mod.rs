//! Markdown support for section and note content
//!
//! Content is stored as plain Markdown. This module provides the toolbar
//! formatting commands applied to the raw text, a comrak-backed parser
//! (CommonMark + GFM strikethrough, autolinks and task lists), and a
//! read-only egui renderer for the preview mode.
//!
//! # Example
//! ```ignore
//! use crate::markdown::{apply_raw_format, MarkdownFormatCommand, MarkdownPreview};
//!
//! let result = apply_raw_format(&text, Some((0, 4)), MarkdownFormatCommand::Bold);
//! MarkdownPreview::new(&result.text).show(ui);
//! ```

pub mod formatting;
mod parser;
mod render;

pub use formatting::{
    apply_raw_format, detect_raw_formatting_state, FormatResult, FormattingState,
    MarkdownFormatCommand,
};
pub use parser::{parse_markdown, HeadingLevel, MarkdownDocument, MarkdownNodeType};
pub use render::MarkdownPreview;
