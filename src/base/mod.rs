//! Foundation types for the symbol graph.
//!
//! - [`FileId`] - Lightweight source file handles
//! - [`TextRange`], [`TextSize`] - Byte offsets into source text
//! - [`Position`], [`Span`] - 0-indexed line/column positions
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`Location`] - Where a node lives, or the explicit "no location" marker
//!
//! This module has NO dependencies on other symgraph modules.

mod file_id;
mod position;

pub use file_id::FileId;
pub use position::{LineIndex, Location, Position, Span};

pub use text_size::{TextRange, TextSize};
