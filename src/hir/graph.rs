//! The symbol graph entry point and node back-references.

use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::trace;

use crate::base::FileId;
use crate::engine::{ContextEntity, EngineRef, SourceFile, SymbolPointer, TypePointer};

use super::error::AdapterResult;
use super::file::{FileInner, FileNode};
use super::node::SymbolNode;
use super::options::AdapterOptions;
use super::scoped::{Session, with_context};

/// Non-owning reference to a node, resolved through [`SymbolGraph::lookup`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
    File(FileId),
    /// Declarations, value parameters and type parameters.
    Symbol(SymbolPointer),
    Type(TypePointer),
}

/// Shared handle every node keeps to reach the engine.
///
/// The graph only holds weak references to file nodes, so dropping the last
/// `FileNode` releases its whole subtree.
#[derive(Clone)]
pub struct SymbolGraph {
    inner: Arc<GraphInner>,
}

struct GraphInner {
    engine: EngineRef,
    options: AdapterOptions,
    files: RwLock<IndexMap<FileId, Weak<FileInner>>>,
}

impl SymbolGraph {
    pub fn new(engine: EngineRef) -> Self {
        Self::with_options(engine, AdapterOptions::default())
    }

    pub fn with_options(engine: EngineRef, options: AdapterOptions) -> Self {
        Self {
            inner: Arc::new(GraphInner {
                engine,
                options,
                files: RwLock::new(IndexMap::new()),
            }),
        }
    }

    pub fn engine(&self) -> &EngineRef {
        &self.inner.engine
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.inner.options
    }

    /// Get the node for a source file.
    ///
    /// Returns the live node for `source.id` if one exists, so repeated calls
    /// share memoized properties.
    pub fn file(&self, source: SourceFile) -> FileNode {
        // Fast path: read lock
        {
            let files = self.inner.files.read();
            if let Some(inner) = files.get(&source.id).and_then(Weak::upgrade) {
                return FileNode::from_inner(inner);
            }
        }

        let mut files = self.inner.files.write();
        if let Some(inner) = files.get(&source.id).and_then(Weak::upgrade) {
            return FileNode::from_inner(inner);
        }

        trace!(file = %source.file_path, "creating file node");
        let id = source.id;
        let node = FileNode::new(self.clone(), source);
        files.insert(id, node.downgrade());
        node
    }

    /// Get the node for a file known to the engine by id.
    pub fn file_by_id(&self, id: FileId) -> AdapterResult<FileNode> {
        if let Some(inner) = self.inner.files.read().get(&id).and_then(Weak::upgrade) {
            return Ok(FileNode::from_inner(inner));
        }
        let source = self.inner.engine.source_file(id)?;
        Ok(self.file(source))
    }

    /// Live file nodes, in creation order.
    pub fn files(&self) -> Vec<FileNode> {
        self.inner
            .files
            .read()
            .values()
            .filter_map(Weak::upgrade)
            .map(FileNode::from_inner)
            .collect()
    }

    /// Resolve a back-reference to a live node.
    ///
    /// Only nodes that have already been constructed are found; the lookup
    /// never triggers engine queries.
    pub fn lookup(&self, key: &NodeKey) -> Option<SymbolNode> {
        let mut stack: Vec<SymbolNode> = self.files().into_iter().map(SymbolNode::File).collect();
        while let Some(node) = stack.pop() {
            if node.key().as_ref() == Some(key) {
                return Some(node);
            }
            stack.extend(node.memoized_children());
        }
        None
    }

    /// Run `query` in a session for `context`.
    pub fn with_context<R>(
        &self,
        context: &ContextEntity,
        query: impl FnOnce(&Session<'_>) -> AdapterResult<R>,
    ) -> AdapterResult<R> {
        with_context(
            &self.inner.engine,
            context,
            self.inner.options.reuse_sessions,
            query,
        )
    }
}

impl std::fmt::Debug for SymbolGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolGraph")
            .field("options", &self.inner.options)
            .field("files", &self.inner.files.read().len())
            .finish()
    }
}
