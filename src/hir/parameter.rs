//! Value parameter and type parameter nodes.
//!
//! Both are plain records built in one pass while the owning declaration's
//! session is open.

use smol_str::SmolStr;

use crate::base::Location;
use crate::engine::{NativeSymbol, SymbolPointer};

use super::annotation::AnnotationNode;
use super::error::AdapterResult;
use super::graph::{NodeKey, SymbolGraph};
use super::scoped::Session;
use super::type_ref::TypeReferenceNode;
use super::types::{Origin, Variance};
use super::visitor::SymbolVisitor;

fn native_location(
    graph: &SymbolGraph,
    session: &Session<'_>,
    symbol: NativeSymbol,
) -> AdapterResult<Location> {
    Ok(session
        .syntax_anchor(symbol)?
        .map_or(Location::NonExistent, |anchor| graph.engine().location_of(&anchor)))
}

/// A value parameter of a function.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterNode {
    pointer: SymbolPointer,
    name: SmolStr,
    ty: TypeReferenceNode,
    has_default: bool,
    is_vararg: bool,
    annotations: Vec<AnnotationNode>,
    origin: Origin,
    location: Location,
    parent: NodeKey,
}

impl ParameterNode {
    pub(crate) fn from_native(
        graph: &SymbolGraph,
        session: &Session<'_>,
        symbol: NativeSymbol,
        context: SymbolPointer,
        parent: NodeKey,
    ) -> AdapterResult<Self> {
        let pointer = session.symbol_pointer(symbol)?;
        let info = session.value_parameter_info(symbol)?;
        let origin = Origin::from(session.origin(symbol)?);
        let key = NodeKey::Symbol(pointer);
        let ty = TypeReferenceNode::from_native(graph, session, info.ty, context, key)?;
        let annotations = session
            .annotations(symbol)?
            .into_iter()
            .map(|data| AnnotationNode::from_data(graph, data, origin, key))
            .collect();
        Ok(Self {
            pointer,
            name: info.name,
            ty,
            has_default: info.has_default,
            is_vararg: info.is_vararg,
            annotations,
            origin,
            location: native_location(graph, session, symbol)?,
            parent,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeReferenceNode {
        &self.ty
    }

    pub fn has_default(&self) -> bool {
        self.has_default
    }

    pub fn is_vararg(&self) -> bool {
        self.is_vararg
    }

    pub fn annotations(&self) -> &[AnnotationNode] {
        &self.annotations
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn parent(&self) -> Option<NodeKey> {
        Some(self.parent)
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::Symbol(self.pointer)
    }

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        visitor.visit_value_parameter(self, data)
    }
}

/// A type parameter of a class or function.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeParameterNode {
    pointer: SymbolPointer,
    name: SmolStr,
    variance: Variance,
    is_reified: bool,
    bounds: Vec<TypeReferenceNode>,
    origin: Origin,
    location: Location,
    parent: NodeKey,
}

impl TypeParameterNode {
    pub(crate) fn from_native(
        graph: &SymbolGraph,
        session: &Session<'_>,
        symbol: NativeSymbol,
        context: SymbolPointer,
        parent: NodeKey,
    ) -> AdapterResult<Self> {
        let pointer = session.symbol_pointer(symbol)?;
        let info = session.type_parameter_info(symbol)?;
        let key = NodeKey::Symbol(pointer);
        let bounds = info
            .upper_bounds
            .into_iter()
            .map(|bound| TypeReferenceNode::from_native(graph, session, bound, context, key))
            .collect::<AdapterResult<Vec<_>>>()?;
        Ok(Self {
            pointer,
            name: info.name,
            variance: info.variance,
            is_reified: info.is_reified,
            bounds,
            origin: Origin::from(session.origin(symbol)?),
            location: native_location(graph, session, symbol)?,
            parent,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variance(&self) -> Variance {
        self.variance
    }

    pub fn is_reified(&self) -> bool {
        self.is_reified
    }

    pub fn bounds(&self) -> &[TypeReferenceNode] {
        &self.bounds
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn parent(&self) -> Option<NodeKey> {
        Some(self.parent)
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::Symbol(self.pointer)
    }

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        visitor.visit_type_parameter(self, data)
    }
}
