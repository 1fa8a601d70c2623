//! Annotation nodes.

use smol_str::SmolStr;

use crate::base::Location;
use crate::engine::{AnnotationData, AnnotationValue};

use super::graph::{NodeKey, SymbolGraph};
use super::types::Origin;
use super::visitor::SymbolVisitor;

/// One annotation application, at a declaration or a type usage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationNode {
    short_name: SmolStr,
    qualified_name: Option<SmolStr>,
    use_site_target: Option<SmolStr>,
    arguments: Vec<(SmolStr, AnnotationValue)>,
    origin: Origin,
    location: Location,
    parent: NodeKey,
}

impl AnnotationNode {
    pub(crate) fn from_data(
        graph: &SymbolGraph,
        data: AnnotationData,
        origin: Origin,
        parent: NodeKey,
    ) -> Self {
        let location = data
            .anchor
            .as_ref()
            .map_or(Location::NonExistent, |anchor| graph.engine().location_of(anchor));
        Self {
            short_name: data.short_name,
            qualified_name: data.qualified_name,
            use_site_target: data.use_site_target,
            arguments: data.arguments,
            origin,
            location,
            parent,
        }
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Fully qualified annotation class name, when the engine resolved it.
    pub fn qualified_name(&self) -> Option<&str> {
        self.qualified_name.as_deref()
    }

    /// Use-site target such as `field` or `get`.
    pub fn use_site_target(&self) -> Option<&str> {
        self.use_site_target.as_deref()
    }

    pub fn arguments(&self) -> &[(SmolStr, AnnotationValue)] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.arguments
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| value)
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

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        visitor.visit_annotation(self, data)
    }
}
