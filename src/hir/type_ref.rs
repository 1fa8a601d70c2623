//! Type reference nodes.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::base::Location;
use crate::engine::{ContextEntity, NativeType, SymbolPointer, SyntaxAnchor, TypePointer};

use super::annotation::AnnotationNode;
use super::error::{AdapterError, AdapterResult};
use super::graph::{NodeKey, SymbolGraph};
use super::memo::Memo;
use super::scoped::Session;
use super::types::{Modifier, Origin, Type};
use super::visitor::SymbolVisitor;

/// A use of a type, e.g. a return type or a parameter type.
///
/// Holds a durable pointer to the engine type plus the symbol it was reached
/// from; [`resolve`](Self::resolve) reopens a session on that symbol.
#[derive(Clone)]
pub struct TypeReferenceNode {
    inner: Arc<TypeRefInner>,
}

struct TypeRefInner {
    graph: SymbolGraph,
    pointer: TypePointer,
    context: SymbolPointer,
    parent: NodeKey,
    resolved: Memo<Type>,
    annotations: Memo<Vec<AnnotationNode>>,
}

impl TypeReferenceNode {
    /// Wrap a native type obtained in `session`.
    pub(crate) fn from_native(
        graph: &SymbolGraph,
        session: &Session<'_>,
        ty: NativeType,
        context: SymbolPointer,
        parent: NodeKey,
    ) -> AdapterResult<Self> {
        let pointer = session.type_pointer(ty)?;
        Ok(Self {
            inner: Arc::new(TypeRefInner {
                graph: graph.clone(),
                pointer,
                context,
                parent,
                resolved: Memo::new(),
                annotations: Memo::new(),
            }),
        })
    }

    pub fn pointer(&self) -> TypePointer {
        self.inner.pointer
    }

    fn query<R>(
        &self,
        f: impl FnOnce(&Session<'_>, NativeType) -> AdapterResult<R>,
    ) -> AdapterResult<R> {
        let inner = &self.inner;
        inner
            .graph
            .with_context(&ContextEntity::Symbol(inner.context), |session| {
                let ty = session.restore_type(inner.pointer)?;
                f(session, ty)
            })
    }

    /// The referenced type.
    pub fn resolve(&self) -> AdapterResult<Type> {
        self.inner
            .resolved
            .get_or_try_init(|| self.query(|session, ty| session.render_type(ty)))
            .cloned()
    }

    /// Annotations written on this type usage.
    pub fn annotations(&self) -> AdapterResult<&[AnnotationNode]> {
        self.inner
            .annotations
            .get_or_try_init(|| {
                let key = self.key();
                self.query(|session, ty| {
                    Ok(session
                        .type_annotations(ty)?
                        .into_iter()
                        .map(|data| {
                            AnnotationNode::from_data(&self.inner.graph, data, Origin::Source, key)
                        })
                        .collect())
                })
            })
            .map(Vec::as_slice)
    }

    pub fn origin(&self) -> Origin {
        Origin::Source
    }

    pub fn parent(&self) -> Option<NodeKey> {
        Some(self.inner.parent)
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::Type(self.inner.pointer)
    }

    /// The syntax element of the reference. Not provided.
    pub fn element(&self) -> AdapterResult<SyntaxAnchor> {
        Err(AdapterError::NotImplemented("TypeReferenceNode::element"))
    }

    /// Source location of the reference. Not provided.
    pub fn location(&self) -> AdapterResult<Location> {
        Err(AdapterError::NotImplemented("TypeReferenceNode::location"))
    }

    /// Modifiers written on the reference (`suspend`, ...). Not provided.
    pub fn modifiers(&self) -> AdapterResult<IndexSet<Modifier>> {
        Err(AdapterError::NotImplemented("TypeReferenceNode::modifiers"))
    }

    pub(crate) fn memoized_annotations(&self) -> &[AnnotationNode] {
        self.inner.annotations.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        visitor.visit_type_reference(self, data)
    }
}

impl PartialEq for TypeReferenceNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TypeReferenceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeReferenceNode")
            .field("pointer", &self.inner.pointer)
            .field("resolved", &self.inner.resolved)
            .finish()
    }
}
