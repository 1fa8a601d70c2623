//! High-level IR (HIR) - the engine-agnostic symbol graph.
//!
//! Nodes wrap engine results behind durable pointers and compute every
//! property lazily, exactly once, inside a short-lived engine session.
//!
//! ## Key Types
//!
//! - [`SymbolGraph`] - Entry point: engine handle, options, live files
//! - [`FileNode`] - Root node for one source file
//! - [`DeclarationNode`] - Function, class or property declaration
//! - [`TypeReferenceNode`] - A type usage, resolvable to a [`Type`]
//! - [`SymbolNode`] - The closed sum of all node variants
//! - [`SymbolVisitor`] - Double dispatch over [`SymbolNode`] variants
//! - [`Memo`] - Compute-once property cell
//!
//! ## Property Access
//!
//! ```text
//! file.declarations()          ← memo miss
//!     │
//!     ▼
//! with_context(File(id))       ← open (or reuse) a session
//!     │
//!     ▼
//! scope_members → classify     ← any unsupported kind fails the whole list
//!     │
//!     ▼
//! DeclarationNode (pointer)    ← session closes, pointer survives
//!     │
//!     ▼
//! decl.return_type()           ← new session, restore_symbol(pointer)
//! ```

mod annotation;
mod classify;
mod declaration;
mod error;
mod file;
mod function;
mod graph;
mod memo;
mod node;
mod options;
mod parameter;
mod scoped;
mod type_ref;
mod types;
mod visitor;

pub use annotation::AnnotationNode;
pub use classify::{DeclarationKind, FunctionKind, classify, function_kind};
pub use declaration::{
    ClassDeclaration, Declaration, DeclarationCore, DeclarationNode, PropertyDeclaration,
};
pub use error::{AdapterError, AdapterResult};
pub use file::FileNode;
pub use function::FunctionDeclaration;
pub use graph::{NodeKey, SymbolGraph};
pub use memo::Memo;
pub use node::SymbolNode;
pub use options::AdapterOptions;
pub use parameter::{ParameterNode, TypeParameterNode};
pub use scoped::{Session, with_context};
pub use type_ref::TypeReferenceNode;
pub use types::{Modifier, Origin, Type, TypeArgument, Variance};
pub use visitor::SymbolVisitor;
