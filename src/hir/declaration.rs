//! Declaration nodes.
//!
//! A [`DeclarationNode`] is one of three variants, decided once from the
//! engine's symbol category when the node is built:
//!
//! ```text
//! NamedClassOrObject               → Class    (ClassDeclaration)
//! Function | Constructor | SAM     → Function (FunctionDeclaration)
//! Property                         → Property (PropertyDeclaration)
//! anything else                    → UnsupportedSymbolKind
//! ```
//!
//! Properties shared by all variants live in [`DeclarationCore`] and are
//! exposed through the [`Declaration`] trait.

use std::fmt;
use std::sync::{Arc, Weak};

use indexmap::IndexSet;
use smol_str::SmolStr;
use tracing::{trace, warn};

use crate::base::{FileId, Location};
use crate::engine::{ContextEntity, NativeSymbol, NativeSymbolKind, SymbolPointer};

use super::annotation::AnnotationNode;
use super::classify::{DeclarationKind, classify};
use super::error::{AdapterError, AdapterResult};
use super::file::{FileInner, FileNode};
use super::function::FunctionDeclaration;
use super::graph::{NodeKey, SymbolGraph};
use super::memo::Memo;
use super::parameter::TypeParameterNode;
use super::scoped::Session;
use super::type_ref::TypeReferenceNode;
use super::types::{Modifier, Origin};
use super::visitor::SymbolVisitor;

/// Where a declaration was enumerated from.
#[derive(Clone)]
pub(crate) struct DeclarationOwner {
    parent: NodeKey,
    file: FileId,
    file_node: Weak<FileInner>,
}

impl DeclarationOwner {
    pub(crate) fn new(parent: NodeKey, file: FileId, file_node: Weak<FileInner>) -> Self {
        Self {
            parent,
            file,
            file_node,
        }
    }

    fn nested(&self, parent: NodeKey) -> Self {
        Self {
            parent,
            ..self.clone()
        }
    }
}

/// State and properties shared by every declaration variant.
pub struct DeclarationCore {
    graph: SymbolGraph,
    pointer: SymbolPointer,
    kind: DeclarationKind,
    owner: DeclarationOwner,
    simple_name: Memo<SmolStr>,
    qualified_name: Memo<Option<SmolStr>>,
    origin: Memo<Origin>,
    location: Memo<Location>,
    annotations: Memo<Vec<AnnotationNode>>,
    modifiers: Memo<IndexSet<Modifier>>,
    doc_string: Memo<Option<String>>,
}

impl DeclarationCore {
    fn new(
        graph: SymbolGraph,
        pointer: SymbolPointer,
        kind: DeclarationKind,
        owner: DeclarationOwner,
    ) -> Self {
        Self {
            graph,
            pointer,
            kind,
            owner,
            simple_name: Memo::new(),
            qualified_name: Memo::new(),
            origin: Memo::new(),
            location: Memo::new(),
            annotations: Memo::new(),
            modifiers: Memo::new(),
            doc_string: Memo::new(),
        }
    }

    pub(crate) fn graph(&self) -> &SymbolGraph {
        &self.graph
    }

    pub(crate) fn key(&self) -> NodeKey {
        NodeKey::Symbol(self.pointer)
    }

    /// Run `f` against this declaration's native symbol in a fresh session.
    pub(crate) fn query<R>(
        &self,
        f: impl FnOnce(&Session<'_>, NativeSymbol) -> AdapterResult<R>,
    ) -> AdapterResult<R> {
        self.graph
            .with_context(&ContextEntity::Symbol(self.pointer), |session| {
                let symbol = session.restore_symbol(self.pointer)?;
                f(session, symbol)
            })
    }

    fn simple_name(&self) -> AdapterResult<&str> {
        self.simple_name
            .get_or_try_init(|| {
                let name = self.query(|session, symbol| match session.symbol_kind(symbol)? {
                    NativeSymbolKind::Constructor | NativeSymbolKind::SamConstructor => Ok(None),
                    _ => session.name(symbol),
                })?;
                Ok(name.unwrap_or_else(|| self.graph.options().constructor_name.clone()))
            })
            .map(SmolStr::as_str)
    }

    fn qualified_name(&self) -> AdapterResult<Option<&str>> {
        self.qualified_name
            .get_or_try_init(|| {
                self.query(|session, symbol| {
                    Ok(session.syntax_anchor(symbol)?.and_then(|anchor| anchor.fq_name))
                })
            })
            .map(Option::as_deref)
    }

    fn origin(&self) -> AdapterResult<Origin> {
        self.origin
            .get_or_try_init(|| {
                self.query(|session, symbol| session.origin(symbol).map(Origin::from))
            })
            .copied()
    }

    fn location(&self) -> AdapterResult<&Location> {
        self.location.get_or_try_init(|| {
            self.query(|session, symbol| {
                Ok(session
                    .syntax_anchor(symbol)?
                    .map_or(Location::NonExistent, |anchor| {
                        session.engine().location_of(&anchor)
                    }))
            })
        })
    }

    fn annotations(&self) -> AdapterResult<&[AnnotationNode]> {
        self.annotations
            .get_or_try_init(|| {
                let key = self.key();
                self.query(|session, symbol| {
                    let origin = Origin::from(session.origin(symbol)?);
                    Ok(session
                        .annotations(symbol)?
                        .into_iter()
                        .map(|data| AnnotationNode::from_data(&self.graph, data, origin, key))
                        .collect())
                })
            })
            .map(Vec::as_slice)
    }

    fn modifiers(&self) -> AdapterResult<&IndexSet<Modifier>> {
        self.modifiers.get_or_try_init(|| {
            self.query(|session, symbol| Ok(session.modifiers(symbol)?.into_iter().collect()))
        })
    }

    fn doc_string(&self) -> AdapterResult<Option<&str>> {
        self.doc_string
            .get_or_try_init(|| self.query(|session, symbol| session.doc_string(symbol)))
            .map(Option::as_deref)
    }

    fn containing_file(&self) -> AdapterResult<FileNode> {
        match self.owner.file_node.upgrade() {
            Some(inner) => Ok(FileNode::from_inner(inner)),
            None => self.graph.file_by_id(self.owner.file),
        }
    }

    /// Extension receiver shared by functions and properties.
    pub(crate) fn compute_extension_receiver(&self) -> AdapterResult<Option<TypeReferenceNode>> {
        self.query(|session, symbol| {
            if !session.is_extension(symbol)? {
                return Ok(None);
            }
            session
                .receiver_type(symbol)?
                .map(|ty| {
                    TypeReferenceNode::from_native(
                        &self.graph,
                        session,
                        ty,
                        self.pointer,
                        self.key(),
                    )
                })
                .transpose()
        })
    }

    /// Declared type (return type of functions, type of properties).
    pub(crate) fn compute_return_type(&self) -> AdapterResult<TypeReferenceNode> {
        self.query(|session, symbol| {
            let ty = session.return_type(symbol)?;
            TypeReferenceNode::from_native(&self.graph, session, ty, self.pointer, self.key())
        })
    }

    pub(crate) fn compute_type_parameters(&self) -> AdapterResult<Vec<TypeParameterNode>> {
        self.query(|session, symbol| self.type_parameters_in(session, symbol))
    }

    /// Type parameters of `symbol`, built inside an already open session.
    pub(crate) fn type_parameters_in(
        &self,
        session: &Session<'_>,
        symbol: NativeSymbol,
    ) -> AdapterResult<Vec<TypeParameterNode>> {
        session
            .type_parameters(symbol)?
            .into_iter()
            .map(|param| {
                TypeParameterNode::from_native(
                    &self.graph,
                    session,
                    param,
                    self.pointer,
                    self.key(),
                )
            })
            .collect()
    }

    pub(crate) fn memoized_annotations(&self) -> &[AnnotationNode] {
        self.annotations.get().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Debug for DeclarationCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationCore")
            .field("pointer", &self.pointer)
            .field("kind", &self.kind)
            .field("simple_name", &self.simple_name)
            .finish()
    }
}

/// Properties every declaration exposes.
pub trait Declaration {
    fn core(&self) -> &DeclarationCore;

    /// Decided when the node was built and never re-derived.
    fn kind(&self) -> DeclarationKind {
        self.core().kind
    }

    fn pointer(&self) -> SymbolPointer {
        self.core().pointer
    }

    /// Name of the declaration; unnamed symbols get the configured
    /// constructor name.
    fn simple_name(&self) -> AdapterResult<&str> {
        self.core().simple_name()
    }

    /// Absent when the declaration has no syntax to derive it from.
    fn qualified_name(&self) -> AdapterResult<Option<&str>> {
        self.core().qualified_name()
    }

    fn package_name(&self) -> AdapterResult<SmolStr> {
        let file = self.containing_file()?;
        Ok(SmolStr::new(file.package_name()))
    }

    fn origin(&self) -> AdapterResult<Origin> {
        self.core().origin()
    }

    fn location(&self) -> AdapterResult<&Location> {
        self.core().location()
    }

    fn annotations(&self) -> AdapterResult<&[AnnotationNode]> {
        self.core().annotations()
    }

    fn modifiers(&self) -> AdapterResult<&IndexSet<Modifier>> {
        self.core().modifiers()
    }

    fn doc_string(&self) -> AdapterResult<Option<&str>> {
        self.core().doc_string()
    }

    fn containing_file(&self) -> AdapterResult<FileNode> {
        self.core().containing_file()
    }

    fn parent(&self) -> Option<NodeKey> {
        Some(self.core().owner.parent)
    }

    /// The enclosing declaration. Not provided.
    fn parent_declaration(&self) -> AdapterResult<Option<DeclarationNode>> {
        Err(AdapterError::NotImplemented("Declaration::parent_declaration"))
    }
}

/// A declaration in the graph.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclarationNode {
    Function(FunctionDeclaration),
    Class(ClassDeclaration),
    Property(PropertyDeclaration),
}

impl DeclarationNode {
    /// Classify `symbol` and build the matching variant.
    pub(crate) fn from_native(
        graph: &SymbolGraph,
        session: &Session<'_>,
        symbol: NativeSymbol,
        owner: &DeclarationOwner,
    ) -> AdapterResult<Self> {
        let native_kind = session.symbol_kind(symbol)?;
        let kind = match classify(native_kind) {
            Ok(kind) => kind,
            Err(unsupported) => {
                let name = session
                    .name(symbol)?
                    .unwrap_or_else(|| SmolStr::new_static("<anonymous>"));
                warn!(symbol = %name, kind = %unsupported, "unsupported symbol kind");
                return Err(AdapterError::unsupported(name, unsupported));
            }
        };
        let pointer = session.symbol_pointer(symbol)?;
        trace!(?pointer, %kind, "building declaration node");

        let core = DeclarationCore::new(graph.clone(), pointer, kind, owner.clone());
        Ok(match kind {
            DeclarationKind::Function => DeclarationNode::Function(FunctionDeclaration::new(core)),
            DeclarationKind::Class => DeclarationNode::Class(ClassDeclaration::new(core)),
            DeclarationKind::Property => DeclarationNode::Property(PropertyDeclaration::new(core)),
        })
    }

    pub fn as_function(&self) -> Option<&FunctionDeclaration> {
        match self {
            DeclarationNode::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDeclaration> {
        match self {
            DeclarationNode::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDeclaration> {
        match self {
            DeclarationNode::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        match self {
            DeclarationNode::Function(function) => function.accept(visitor, data),
            DeclarationNode::Class(class) => class.accept(visitor, data),
            DeclarationNode::Property(property) => property.accept(visitor, data),
        }
    }
}

impl Declaration for DeclarationNode {
    fn core(&self) -> &DeclarationCore {
        match self {
            DeclarationNode::Function(function) => function.core(),
            DeclarationNode::Class(class) => class.core(),
            DeclarationNode::Property(property) => property.core(),
        }
    }
}

// ============================================================================
// CLASS
// ============================================================================

/// A named class, interface or object.
#[derive(Clone)]
pub struct ClassDeclaration {
    inner: Arc<ClassInner>,
}

struct ClassInner {
    core: DeclarationCore,
    declarations: Memo<Vec<DeclarationNode>>,
    type_parameters: Memo<Vec<TypeParameterNode>>,
}

impl ClassDeclaration {
    fn new(core: DeclarationCore) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                core,
                declarations: Memo::new(),
                type_parameters: Memo::new(),
            }),
        }
    }

    /// Member declarations, with the same all-or-nothing classification as
    /// file declarations.
    pub fn declarations(&self) -> AdapterResult<&[DeclarationNode]> {
        self.inner
            .declarations
            .get_or_try_init(|| {
                let core = &self.inner.core;
                let owner = core.owner.nested(core.key());
                core.query(|session, symbol| {
                    session
                        .scope_members(symbol)?
                        .into_iter()
                        .map(|member| {
                            DeclarationNode::from_native(core.graph(), session, member, &owner)
                        })
                        .collect()
                })
            })
            .map(Vec::as_slice)
    }

    pub fn type_parameters(&self) -> AdapterResult<&[TypeParameterNode]> {
        self.inner
            .type_parameters
            .get_or_try_init(|| self.inner.core.compute_type_parameters())
            .map(Vec::as_slice)
    }

    pub(crate) fn memoized_declarations(&self) -> &[DeclarationNode] {
        self.inner.declarations.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn memoized_type_parameters(&self) -> &[TypeParameterNode] {
        self.inner.type_parameters.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        visitor.visit_class_declaration(self, data)
    }
}

impl Declaration for ClassDeclaration {
    fn core(&self) -> &DeclarationCore {
        &self.inner.core
    }
}

impl PartialEq for ClassDeclaration {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ClassDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDeclaration")
            .field("core", &self.inner.core)
            .field("declarations", &self.inner.declarations)
            .finish()
    }
}

// ============================================================================
// PROPERTY
// ============================================================================

/// A property (top-level or member).
#[derive(Clone)]
pub struct PropertyDeclaration {
    inner: Arc<PropertyInner>,
}

struct PropertyInner {
    core: DeclarationCore,
    property_type: Memo<TypeReferenceNode>,
    extension_receiver: Memo<Option<TypeReferenceNode>>,
}

impl PropertyDeclaration {
    fn new(core: DeclarationCore) -> Self {
        Self {
            inner: Arc::new(PropertyInner {
                core,
                property_type: Memo::new(),
                extension_receiver: Memo::new(),
            }),
        }
    }

    pub fn property_type(&self) -> AdapterResult<&TypeReferenceNode> {
        self.inner
            .property_type
            .get_or_try_init(|| self.inner.core.compute_return_type())
    }

    pub fn extension_receiver(&self) -> AdapterResult<Option<&TypeReferenceNode>> {
        self.inner
            .extension_receiver
            .get_or_try_init(|| self.inner.core.compute_extension_receiver())
            .map(Option::as_ref)
    }

    pub(crate) fn memoized_type_references(&self) -> Vec<TypeReferenceNode> {
        let mut refs: Vec<_> = self.inner.property_type.get().cloned().into_iter().collect();
        refs.extend(self.inner.extension_receiver.get().cloned().flatten());
        refs
    }

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        visitor.visit_property_declaration(self, data)
    }
}

impl Declaration for PropertyDeclaration {
    fn core(&self) -> &DeclarationCore {
        &self.inner.core
    }
}

impl PartialEq for PropertyDeclaration {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for PropertyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDeclaration")
            .field("core", &self.inner.core)
            .finish()
    }
}
