//! # symgraph-base
//!
//! An engine-agnostic symbol graph over session-scoped semantic analysis.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! hir       → Symbol graph: files, declarations, type references, visitor
//!   ↓
//! engine    → Engine query interface, in-memory reference engine
//!   ↓
//! base      → Primitives (FileId, Position/Span, Location)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let graph = SymbolGraph::new(engine);
//! let file = graph.file(source_file);
//! for decl in file.declarations()? {
//!     println!("{} ({})", decl.simple_name()?, decl.kind());
//! }
//! ```

// ============================================================================
// MODULES (dependency order: base → engine → hir)
// ============================================================================

/// Foundation types: FileId, Position/Span, Location
pub mod base;

/// Engine interface consumed by the graph
pub mod engine;

/// High-level IR: lazily computed symbol graph
pub mod hir;

// Re-export foundation types
pub use base::{FileId, LineIndex, Location, Position, Span, TextRange, TextSize};

pub use hir::{AdapterError, AdapterResult, SymbolGraph};
