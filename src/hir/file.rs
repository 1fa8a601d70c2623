//! File nodes: the roots of the symbol graph.

use std::fmt;
use std::sync::{Arc, Weak};

use tracing::trace;

use crate::base::{FileId, Location, Span};
use crate::engine::{ContextEntity, SourceFile};

use super::annotation::AnnotationNode;
use super::declaration::{DeclarationNode, DeclarationOwner};
use super::error::AdapterResult;
use super::graph::{NodeKey, SymbolGraph};
use super::memo::Memo;
use super::types::Origin;
use super::visitor::SymbolVisitor;

/// A source file and its top-level declarations.
#[derive(Clone)]
pub struct FileNode {
    inner: Arc<FileInner>,
}

pub(crate) struct FileInner {
    graph: SymbolGraph,
    source: SourceFile,
    declarations: Memo<Vec<DeclarationNode>>,
    annotations: Memo<Vec<AnnotationNode>>,
}

impl FileNode {
    pub(crate) fn new(graph: SymbolGraph, source: SourceFile) -> Self {
        Self {
            inner: Arc::new(FileInner {
                graph,
                source,
                declarations: Memo::new(),
                annotations: Memo::new(),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<FileInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<FileInner> {
        Arc::downgrade(&self.inner)
    }

    pub fn id(&self) -> FileId {
        self.inner.source.id
    }

    pub fn package_name(&self) -> &str {
        &self.inner.source.package_name
    }

    pub fn file_name(&self) -> &str {
        &self.inner.source.file_name
    }

    /// Stable identifier of the file, usable as a lookup key.
    pub fn file_path(&self) -> &str {
        &self.inner.source.file_path
    }

    pub fn origin(&self) -> Origin {
        Origin::Source
    }

    pub fn location(&self) -> Location {
        Location::file(self.inner.source.file_path.clone(), Span::default())
    }

    pub fn parent(&self) -> Option<NodeKey> {
        None
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::File(self.id())
    }

    /// Top-level declarations of the file.
    ///
    /// Computed once. A single member of an unsupported kind fails the whole
    /// list; nothing is memoized in that case.
    pub fn declarations(&self) -> AdapterResult<&[DeclarationNode]> {
        self.inner
            .declarations
            .get_or_try_init(|| {
                trace!(file = %self.file_path(), "computing file declarations");
                let id = self.id();
                let graph = &self.inner.graph;
                let owner = DeclarationOwner::new(NodeKey::File(id), id, self.downgrade());
                graph.with_context(&ContextEntity::File(id), |session| {
                    let file_symbol = session.resolve_file_symbol(id)?;
                    session
                        .scope_members(file_symbol)?
                        .into_iter()
                        .map(|member| DeclarationNode::from_native(graph, session, member, &owner))
                        .collect()
                })
            })
            .map(Vec::as_slice)
    }

    /// File-level annotations.
    pub fn annotations(&self) -> AdapterResult<&[AnnotationNode]> {
        self.inner
            .annotations
            .get_or_try_init(|| {
                let id = self.id();
                let graph = &self.inner.graph;
                graph.with_context(&ContextEntity::File(id), |session| {
                    let file_symbol = session.resolve_file_symbol(id)?;
                    Ok(session
                        .annotations(file_symbol)?
                        .into_iter()
                        .map(|data| {
                            AnnotationNode::from_data(graph, data, Origin::Source, self.key())
                        })
                        .collect())
                })
            })
            .map(Vec::as_slice)
    }

    pub(crate) fn memoized_declarations(&self) -> &[DeclarationNode] {
        self.inner.declarations.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn memoized_annotations(&self) -> &[AnnotationNode] {
        self.inner.annotations.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        visitor.visit_file(self, data)
    }
}

impl PartialEq for FileNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for FileNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileNode")
            .field("path", &self.inner.source.file_path)
            .field("declarations", &self.inner.declarations)
            .finish()
    }
}
